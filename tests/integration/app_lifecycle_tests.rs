/*!
 * Integration tests for the controller and command handling
 */

use std::collections::BTreeMap;
use std::sync::Arc;

use glosswatch::app_config::Config;
use glosswatch::app_controller::{parse_text_args, Controller, GlossaryCommand};
use glosswatch::database::Repository;
use glosswatch::providers::mock::MockTranslationApi;
use tempfile::tempdir;

use crate::common::{date, init_test_logging, remote_glossary, texts, DEFAULT_PAIRS};

fn config_with_key() -> Config {
    let mut config = Config::default();
    config.deepl.api_key = "test-key:fx".to_string();
    config
}

fn create_test_controller(config: Config) -> (Controller, Arc<MockTranslationApi>) {
    let api = Arc::new(MockTranslationApi::working().with_pairs(DEFAULT_PAIRS));
    let repo = Repository::new_in_memory().unwrap();
    (Controller::with_parts(config, repo, api.clone()), api)
}

/// Test the create, list, update, delete round of commands
#[tokio::test]
async fn test_run_mutationCommands_shouldReturnUpdatedListing() {
    init_test_logging();
    let (controller, _) = create_test_controller(config_with_key());

    let output = controller
        .run(GlossaryCommand::Create {
            texts: texts(&[("EN", "House"), ("DE", "Haus"), ("FR", "Maison")]),
        })
        .await
        .unwrap();
    let created: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(created["success"], true);

    let entries = created["entries"].as_object().unwrap();
    assert_eq!(entries.len(), 1);
    let identifier = entries.keys().next().unwrap().clone();

    let output = controller
        .run(GlossaryCommand::Update {
            aggregate_identifier: identifier.clone(),
            texts: texts(&[("DE", "Gebäude")]),
        })
        .await
        .unwrap();
    let updated: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(updated["entries"][&identifier]["DE"], "Gebäude");
    assert_eq!(updated["entries"][&identifier]["EN"], "House");

    let output = controller
        .run(GlossaryCommand::Delete { aggregate_identifier: identifier })
        .await
        .unwrap();
    let deleted: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(deleted["success"], true);
    assert!(deleted["entries"].as_object().unwrap().is_empty());
}

/// Test that remote commands need an API key
#[tokio::test]
async fn test_run_withoutApiKey_shouldRejectRemoteCommands() {
    let (controller, api) = create_test_controller(Config::default());

    let result = controller.run(GlossaryCommand::Overview).await;

    assert!(result.is_err());
    assert_eq!(api.request_count(), 0);
}

/// Test that local commands work without an API key
#[tokio::test]
async fn test_run_listAndStats_withoutApiKey_shouldSucceed() {
    let (controller, api) = create_test_controller(Config::default());

    let listing = controller.run(GlossaryCommand::List).await.unwrap();
    assert_eq!(listing.trim(), "{}");

    let stats: serde_json::Value =
        serde_json::from_str(&controller.run(GlossaryCommand::Stats).await.unwrap()).unwrap();
    assert_eq!(stats["entryCount"], 0);
    assert_eq!(api.request_count(), 0);
}

/// Test the overview output shape
#[tokio::test]
async fn test_run_overview_shouldRenderAllSections() {
    let (controller, api) = create_test_controller(config_with_key());
    api.set_glossaries(vec![remote_glossary("EN", "DE", date(2023, 5, 1), true)]);

    let output = controller.run(GlossaryCommand::Overview).await.unwrap();
    let overview: serde_json::Value = serde_json::from_str(&output).unwrap();

    assert!(overview["glossary"].as_object().unwrap().is_empty());
    assert_eq!(overview["languages"], serde_json::json!(["EN", "DE", "FR"]));
    assert_eq!(overview["glossaryStatus"]["EN-DE"]["creationDate"], "01.05.2023 00:00:00");
    assert_eq!(overview["glossaryStatus"]["EN-DE"]["isOutdated"], false);
}

/// Test that a controller built from configuration persists to its database file
#[tokio::test]
async fn test_withConfig_shouldPersistAcrossControllers() {
    let dir = tempdir().unwrap();
    let db_path = dir.path().join("glossary.db");

    let mut config = Config::default();
    config.database.path = Some(db_path.to_string_lossy().to_string());

    let controller = Controller::with_config(config.clone()).unwrap();
    controller
        .service()
        .repository()
        .add(&glosswatch::database::GlossaryEntryRecord::new("a", date(2023, 1, 1), "EN", "House"))
        .await
        .unwrap();
    drop(controller);

    let controller = Controller::with_config(config).unwrap();
    let listing: BTreeMap<String, BTreeMap<String, String>> =
        serde_json::from_str(&controller.run(GlossaryCommand::List).await.unwrap()).unwrap();

    assert_eq!(listing["a"]["EN"], "House");
    assert!(db_path.exists());
}

/// Test that a failed create leaves the store untouched
#[test]
fn test_run_createWithMissingLanguage_shouldFailWithoutWrites() {
    let (controller, _) = create_test_controller(config_with_key());

    let result = tokio_test::block_on(async {
        controller
            .run(GlossaryCommand::Create { texts: texts(&[("EN", "House")]) })
            .await
    });

    let error = result.unwrap_err();
    assert!(error.to_string().contains("There is no text for language DE"));

    let count = tokio_test::block_on(controller.service().repository().count()).unwrap();
    assert_eq!(count, 0);
}

/// Test argument parsing feeds commands
#[test]
fn test_parseTextArgs_shouldBuildTextMap() {
    let parsed = parse_text_args(&["EN=House".to_string(), "DE=Haus".to_string()]).unwrap();
    assert_eq!(parsed, texts(&[("EN", "House"), ("DE", "Haus")]));
}

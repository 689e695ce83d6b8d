/*!
 * Integration tests for remote glossary staleness through the service
 */

use std::sync::Arc;

use glosswatch::database::GlossaryEntryRecord;
use glosswatch::errors::{GlossaryError, ProviderError};
use glosswatch::glossary::{CreateAggregateRequest, UpdateAggregateRequest};
use glosswatch::providers::mock::{MockBehavior, MockTranslationApi};

use crate::common::{create_default_service, create_test_service, date, remote_glossary, texts, DEFAULT_PAIRS};

async fn seed(service: &glosswatch::GlossaryService) {
    let repo = service.repository();
    repo.add(&GlossaryEntryRecord::new("a", date(2023, 1, 1), "EN", "House")).await.unwrap();
    repo.add(&GlossaryEntryRecord::new("a", date(2023, 6, 1), "DE", "Haus")).await.unwrap();
}

/// Test the status flags against local modification times
#[tokio::test]
async fn test_glossaryStatus_shouldFlagGlossariesOlderThanEdits() {
    let (service, api) = create_default_service();
    seed(&service).await;
    api.set_glossaries(vec![
        remote_glossary("EN", "DE", date(2023, 5, 1), true),
        remote_glossary("DE", "FR", date(2023, 7, 1), false),
        remote_glossary("EN", "FR", date(2022, 12, 1), true),
    ]);

    let statuses = service.glossary_status().await.unwrap();

    assert_eq!(statuses.keys().collect::<Vec<_>>(), vec!["DE-FR", "EN-DE", "EN-FR"]);
    assert!(statuses["EN-DE"].is_outdated);
    assert!(statuses["EN-DE"].can_be_used);
    assert!(!statuses["DE-FR"].is_outdated);
    assert!(!statuses["DE-FR"].can_be_used);
    // FR has no entries, EN changed after the glossary was created
    assert!(statuses["EN-FR"].is_outdated);
    assert_eq!(statuses["EN-DE"].creation_date, "01.05.2023 00:00:00");
}

/// Test that an empty store never reports outdated glossaries
#[tokio::test]
async fn test_glossaryStatus_withEmptyStore_shouldNotBeOutdated() {
    let (service, api) = create_default_service();
    api.set_glossaries(vec![remote_glossary("EN", "DE", date(2000, 1, 1), true)]);

    let statuses = service.glossary_status().await.unwrap();

    assert!(!statuses["EN-DE"].is_outdated);
}

/// Test that a later glossary for the same pair replaces the earlier one
#[tokio::test]
async fn test_glossaryStatus_withDuplicatePair_shouldKeepLater() {
    let (service, api) = create_default_service();
    seed(&service).await;
    api.set_glossaries(vec![
        remote_glossary("EN", "DE", date(2023, 5, 1), true),
        remote_glossary("en", "de", date(2023, 8, 1), true),
    ]);

    let statuses = service.glossary_status().await.unwrap();

    assert_eq!(statuses.len(), 1);
    assert!(!statuses["EN-DE"].is_outdated);
    assert_eq!(statuses["EN-DE"].creation_date, "01.08.2023 00:00:00");
}

/// Test that editing a language turns an up to date glossary stale
#[tokio::test]
async fn test_glossaryStatus_afterUpdate_shouldBecomeOutdated() {
    let api = Arc::new(MockTranslationApi::working().with_pairs(DEFAULT_PAIRS));
    let service = create_test_service(api.clone());

    service
        .create(CreateAggregateRequest::new(texts(&[("EN", "a"), ("DE", "b"), ("FR", "c")])))
        .await
        .unwrap();
    let identifier = service.entry_aggregates().await.unwrap().identifiers()[0].to_string();

    api.set_glossaries(vec![remote_glossary("EN", "DE", chrono::Utc::now(), true)]);
    assert!(!service.glossary_status().await.unwrap()["EN-DE"].is_outdated);

    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    service
        .update(UpdateAggregateRequest::new(identifier, texts(&[("DE", "b2")])))
        .await
        .unwrap();

    assert!(service.glossary_status().await.unwrap()["EN-DE"].is_outdated);
}

/// Test the overview combines listing, languages and status
#[tokio::test]
async fn test_index_shouldCombineAllViews() {
    let (service, api) = create_default_service();
    seed(&service).await;
    api.set_glossaries(vec![remote_glossary("EN", "DE", date(2023, 5, 1), true)]);

    let overview = service.index().await.unwrap();

    assert_eq!(overview.glossary.identifiers(), vec!["a"]);
    assert_eq!(overview.languages, vec!["EN", "DE", "FR"]);
    assert!(overview.glossary_status["EN-DE"].is_outdated);

    let json = serde_json::to_value(&overview).unwrap();
    assert_eq!(json["glossary"]["a"]["DE"], "Haus");
    assert_eq!(json["glossaryStatus"]["EN-DE"]["isOutdated"], true);
    assert_eq!(json["glossaryStatus"]["EN-DE"]["canBeUsed"], true);
    assert_eq!(json["glossaryStatus"]["EN-DE"]["sourceLang"], "EN");
}

/// Test that a failing glossary listing fails the overview
#[tokio::test]
async fn test_index_withGlossaryListingFailure_shouldPropagate() {
    let api = Arc::new(MockTranslationApi::new(MockBehavior::GlossariesFailing).with_pairs(DEFAULT_PAIRS));
    let service = create_test_service(api);

    assert_eq!(service.languages().await.unwrap().len(), 3);
    let result = service.index().await;

    assert!(matches!(result, Err(GlossaryError::Provider(ProviderError::ConnectionError(_)))));
}

/*!
 * Common test utilities for the glosswatch test suite
 */

use chrono::{DateTime, TimeZone, Utc};
use std::collections::BTreeMap;
use std::sync::Arc;

use glosswatch::app_config::GlossaryConfig;
use glosswatch::database::Repository;
use glosswatch::glossary::GlossaryService;
use glosswatch::providers::RemoteGlossary;
use glosswatch::providers::mock::MockTranslationApi;

/// Language pairs used by most tests: languages EN, DE, FR
pub const DEFAULT_PAIRS: &[(&str, &str)] = &[("EN", "DE"), ("EN", "FR"), ("DE", "FR")];

/// Build a text map from `(language, text)` pairs
pub fn texts(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(language, text)| (language.to_string(), text.to_string()))
        .collect()
}

/// Midnight UTC on the given day
pub fn date(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
}

/// Remote glossary metadata for a language pair
pub fn remote_glossary(source: &str, target: &str, created: DateTime<Utc>, ready: bool) -> RemoteGlossary {
    RemoteGlossary {
        glossary_id: format!("remote-{}-{}", source, target),
        name: format!("{} to {}", source, target),
        source_lang: source.to_string(),
        target_lang: target.to_string(),
        creation_time: created,
        ready,
        entry_count: 0,
    }
}

/// Service over an in-memory store and the given mock API
pub fn create_test_service(api: Arc<MockTranslationApi>) -> GlossaryService {
    let repo = Repository::new_in_memory().expect("Failed to create in-memory repository");
    GlossaryService::new(repo, api, &GlossaryConfig::default())
}

/// Service with the default language pairs and no remote glossaries
pub fn create_default_service() -> (GlossaryService, Arc<MockTranslationApi>) {
    let api = Arc::new(MockTranslationApi::working().with_pairs(DEFAULT_PAIRS));
    (create_test_service(api.clone()), api)
}

/// Route log output through the test harness; safe to call repeatedly
pub fn init_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

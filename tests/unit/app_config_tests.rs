/*!
 * Tests for configuration loading and validation
 */

use glosswatch::app_config::{Config, LogLevel, MissingSortPolicy};
use glosswatch::providers::LanguagePair;
use std::fs;
use tempfile::tempdir;

/// Test that a missing file is created with defaults
#[test]
fn test_loadOrCreate_withMissingFile_shouldWriteDefaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("conf.json");

    let config = Config::load_or_create(&path).unwrap();

    assert!(path.exists());
    assert_eq!(config.glossary.sort_by_language, "EN");
    assert_eq!(config.glossary.missing_sort_language, MissingSortPolicy::Last);

    let reloaded = Config::from_file(&path).unwrap();
    assert_eq!(reloaded.deepl.timeout_secs, config.deepl.timeout_secs);
}

/// Test that partial files are completed with defaults
#[test]
fn test_fromFile_withPartialJson_shouldFillDefaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("conf.json");
    fs::write(
        &path,
        r#"{
            "glossary": { "sort_by_language": "de", "missing_sort_language": "first" },
            "deepl": { "api_key": "key:fx", "language_pairs": [{ "source": "EN", "target": "DE" }] },
            "log_level": "debug"
        }"#,
    )
    .unwrap();

    let config = Config::from_file(&path).unwrap();

    assert_eq!(config.glossary.sort_language(), "DE");
    assert_eq!(config.glossary.missing_sort_language, MissingSortPolicy::First);
    assert_eq!(config.deepl.language_pairs, vec![LanguagePair::new("EN", "DE")]);
    assert_eq!(config.deepl.timeout_secs, 10);
    assert_eq!(config.log_level, LogLevel::Debug);
    assert!(config.database.path.is_none());
    assert!(config.validate().is_ok());
    assert!(config.validate_api().is_ok());
}

/// Test that malformed JSON is reported
#[test]
fn test_fromFile_withInvalidJson_shouldFail() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("conf.json");
    fs::write(&path, "{ not json").unwrap();

    assert!(Config::from_file(&path).is_err());
}

/// Test that save and load preserve settings
#[test]
fn test_save_thenLoad_shouldPreserveSettings() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("conf.json");

    let mut config = Config::default();
    config.database.path = Some("/tmp/glossary.db".to_string());
    config.glossary.missing_sort_language = MissingSortPolicy::Error;
    config.save(&path).unwrap();

    let loaded = Config::from_file(&path).unwrap();
    assert_eq!(loaded.database.path.as_deref(), Some("/tmp/glossary.db"));
    assert_eq!(loaded.glossary.missing_sort_language, MissingSortPolicy::Error);
}

/// Test that bad values fail validation
#[test]
fn test_validate_withInvalidValues_shouldFail() {
    let mut config = Config::default();
    config.glossary.sort_by_language = "not a language".to_string();
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.deepl.timeout_secs = 0;
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.deepl.language_pairs = vec![LanguagePair::new("EN", "??")];
    assert!(config.validate().is_err());
}

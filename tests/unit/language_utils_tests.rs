/*!
 * Tests for language code utilities
 */

use glosswatch::errors::GlossaryError;
use glosswatch::language_utils::{normalize_code, validate_language_code};

/// Test DeepL style codes with variants
#[test]
fn test_validateLanguageCode_withRegionalVariants_shouldNormalize() {
    assert_eq!(validate_language_code("en-us").unwrap(), "EN-US");
    assert_eq!(validate_language_code(" pt-br ").unwrap(), "PT-BR");
    assert_eq!(validate_language_code("deu").unwrap(), "DEU");
}

/// Test that invalid codes report the original input
#[test]
fn test_validateLanguageCode_withGarbage_shouldReportInput() {
    match validate_language_code("e n") {
        Err(GlossaryError::InvalidLanguageCode(code)) => assert_eq!(code, "e n"),
        other => panic!("Expected InvalidLanguageCode, got {:?}", other),
    }
    assert!(validate_language_code("DE-G B").is_err());
}

/// Test normalization keeps variants intact
#[test]
fn test_normalizeCode_withVariants_shouldUppercaseWholeCode() {
    assert_eq!(normalize_code("en-gb"), "EN-GB");
    assert_ne!(normalize_code("EN-GB"), normalize_code("en-us"));
    assert_eq!(normalize_code("zh-hant"), "ZH-HANT");
}

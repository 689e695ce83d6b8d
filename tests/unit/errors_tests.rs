/*!
 * Tests for error types and conversions
 */

use glosswatch::errors::{AppError, GlossaryError, ProviderError};

/// Test that provider errors render their details
#[test]
fn test_providerError_display_shouldIncludeDetails() {
    let error = ProviderError::ApiError {
        status_code: 456,
        message: "Quota exceeded".to_string(),
    };
    assert_eq!(error.to_string(), "API responded with error: 456 - Quota exceeded");

    let error = ProviderError::Timeout(10);
    assert_eq!(error.to_string(), "Request timed out after 10 seconds");
}

/// Test that provider errors convert into glossary errors
#[test]
fn test_glossaryError_fromProviderError_shouldWrapProvider() {
    let error: GlossaryError = ProviderError::ConnectionError("refused".to_string()).into();

    assert!(matches!(error, GlossaryError::Provider(ProviderError::ConnectionError(_))));
    assert!(error.to_string().contains("refused"));
}

/// Test that store failures convert into glossary errors
#[test]
fn test_glossaryError_fromAnyhow_shouldWrapStore() {
    let error: GlossaryError = anyhow::anyhow!("disk full").into();

    assert!(matches!(error, GlossaryError::Store(_)));
    assert_eq!(error.to_string(), "Store error: disk full");
}

/// Test the missing text message names the language
#[test]
fn test_missingLanguageText_display_shouldNameLanguage() {
    let error = GlossaryError::MissingLanguageText("FR".to_string());
    assert_eq!(error.to_string(), "There is no text for language FR");
}

/// Test that glossary errors nest into the application error
#[test]
fn test_appError_fromGlossaryError_shouldPreserveMessage() {
    let error: AppError = GlossaryError::UnknownAggregate("abc".to_string()).into();

    assert!(matches!(error, AppError::Glossary(GlossaryError::UnknownAggregate(_))));
    assert!(error.to_string().contains("abc"));
}

/// Test io and json errors map to their categories
#[test]
fn test_appError_fromIoAndJson_shouldMapCategories() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
    assert!(matches!(AppError::from(io_error), AppError::File(_)));

    let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    assert!(matches!(AppError::from(json_error), AppError::Config(_)));
}

/*!
 * Error types for the glosswatch application.
 *
 * This module contains custom error types for the different parts of the
 * application, using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors that can occur when talking to the translation API
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The request did not complete within the configured timeout
    #[error("Request timed out after {0} seconds")]
    Timeout(u64),

    /// Error related to rate limiting
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),
}

/// Errors raised by glossary operations
#[derive(Error, Debug)]
pub enum GlossaryError {
    /// A create request carried an aggregate identifier
    #[error("Create request must not have an aggregate identifier set")]
    IdentifierNotAllowed,

    /// An update or delete request carried no aggregate identifier
    #[error("Request requires an aggregate identifier")]
    MissingIdentifier,

    /// A create request is missing the text for a required language
    #[error("There is no text for language {0}")]
    MissingLanguageText(String),

    /// The translation API reported no language pairs
    #[error("No glossary languages are available")]
    NoGlossaryLanguages,

    /// A language code could not be recognized
    #[error("Invalid language code: {0:?}")]
    InvalidLanguageCode(String),

    /// A request names the same language twice (after normalization)
    #[error("Language {0} appears more than once in the request")]
    DuplicateLanguage(String),

    /// No entries exist for the given aggregate
    #[error("Unknown glossary aggregate: {0}")]
    UnknownAggregate(String),

    /// An aggregate has no text in the configured sort language
    #[error("Aggregate {aggregate} has no text for sort language {language}")]
    MissingSortLanguage {
        /// Aggregate identifier
        aggregate: String,
        /// Configured sort language
        language: String,
    },

    /// Error from the translation API
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from the glossary store
    #[error("Store error: {0}")]
    Store(#[from] anyhow::Error),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error in the configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error from the translation API
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from a glossary operation
    #[error("Glossary error: {0}")]
    Glossary(#[from] GlossaryError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::Config(error.to_string())
    }
}

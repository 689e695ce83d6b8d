/*!
 * Clients for translation APIs that host glossaries.
 *
 * This module contains:
 * - The `TranslationApi` trait the glossary service talks to
 * - `deepl`: DeepL API client
 * - `mock`: In-process implementation for tests and offline use
 */

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::errors::ProviderError;

pub mod deepl;
pub mod mock;

/// A supported source → target language combination
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LanguagePair {
    /// Source language code
    pub source: String,
    /// Target language code
    pub target: String,
}

impl LanguagePair {
    /// Create a new language pair
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

/// Metadata of a glossary hosted by the translation API
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteGlossary {
    /// Remote identifier
    pub glossary_id: String,
    /// Display name
    pub name: String,
    /// Source language code
    pub source_lang: String,
    /// Target language code
    pub target_lang: String,
    /// When the remote glossary was created
    pub creation_time: DateTime<Utc>,
    /// Whether the glossary can be used for translations
    pub ready: bool,
    /// Number of entries in the remote glossary
    pub entry_count: u64,
}

/// Common trait for translation APIs hosting glossaries
///
/// Implementations are passed to the glossary service explicitly, allowing
/// the real client and test doubles to be used interchangeably.
#[async_trait]
pub trait TranslationApi: Send + Sync + Debug {
    /// Get the language pairs glossaries can be maintained for
    async fn get_language_pairs(&self) -> Result<Vec<LanguagePair>, ProviderError>;

    /// Get metadata of every glossary hosted by the API
    async fn get_glossaries(&self) -> Result<Vec<RemoteGlossary>, ProviderError>;

    /// Deterministic key identifying the glossary for a language pair
    fn internal_glossary_key(&self, source_lang: &str, target_lang: &str) -> String {
        format!(
            "{}-{}",
            crate::language_utils::normalize_code(source_lang),
            crate::language_utils::normalize_code(target_lang)
        )
    }
}

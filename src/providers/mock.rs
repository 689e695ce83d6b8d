/*!
 * Mock translation API for testing.
 *
 * This module provides an in-process `TranslationApi` with canned data:
 * - `MockTranslationApi::working()` - Serves the configured pairs and glossaries
 * - `MockTranslationApi::failing()` - Always fails with a connection error
 */

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::errors::ProviderError;
use crate::providers::{LanguagePair, RemoteGlossary, TranslationApi};

/// Behavior mode for the mock API
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds with the canned data
    Working,
    /// Always fails with a connection error
    Failing,
    /// Succeeds for language pairs but fails when listing glossaries
    GlossariesFailing,
}

/// Mock translation API
#[derive(Debug)]
pub struct MockTranslationApi {
    /// Behavior mode
    behavior: MockBehavior,
    /// Pairs returned by `get_language_pairs`
    pairs: Vec<LanguagePair>,
    /// Glossaries returned by `get_glossaries`
    glossaries: Mutex<Vec<RemoteGlossary>>,
    /// Number of API calls made
    request_count: Arc<AtomicUsize>,
}

impl MockTranslationApi {
    /// Create a new mock API with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            pairs: Vec::new(),
            glossaries: Mutex::new(Vec::new()),
            request_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Create a working mock API
    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    /// Create a failing mock API
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Set the language pairs to serve
    pub fn with_pairs(mut self, pairs: &[(&str, &str)]) -> Self {
        self.pairs = pairs
            .iter()
            .map(|(source, target)| LanguagePair::new(*source, *target))
            .collect();
        self
    }

    /// Replace the served glossaries after construction
    pub fn set_glossaries(&self, glossaries: Vec<RemoteGlossary>) {
        if let Ok(mut guard) = self.glossaries.lock() {
            *guard = glossaries;
        }
    }

    /// Get the number of API calls made so far
    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    fn record_call(&self) {
        self.request_count.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl TranslationApi for MockTranslationApi {
    async fn get_language_pairs(&self) -> Result<Vec<LanguagePair>, ProviderError> {
        self.record_call();
        match self.behavior {
            MockBehavior::Failing => Err(ProviderError::ConnectionError(
                "Mock API unreachable".to_string(),
            )),
            MockBehavior::Working | MockBehavior::GlossariesFailing => Ok(self.pairs.clone()),
        }
    }

    async fn get_glossaries(&self) -> Result<Vec<RemoteGlossary>, ProviderError> {
        self.record_call();
        match self.behavior {
            MockBehavior::Working => Ok(self
                .glossaries
                .lock()
                .map(|g| g.clone())
                .unwrap_or_default()),
            MockBehavior::Failing | MockBehavior::GlossariesFailing => Err(
                ProviderError::ConnectionError("Mock API unreachable".to_string()),
            ),
        }
    }
}

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use log::{debug, error, warn};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::errors::ProviderError;
use crate::language_utils::normalize_code;

use super::{LanguagePair, RemoteGlossary, TranslationApi};

const DEEPL_PRO_ENDPOINT: &str = "https://api.deepl.com";
const DEEPL_FREE_ENDPOINT: &str = "https://api-free.deepl.com";

/// DeepL client for reading glossary metadata
#[derive(Debug)]
pub struct DeepL {
    /// HTTP client for API requests
    client: Client,
    /// API key for authentication
    api_key: String,
    /// Base URL of the API, without the version path
    endpoint: String,
    /// Request timeout, reported in timeout errors
    timeout_secs: u64,
    /// Language pairs to maintain; empty means every supported pair
    configured_pairs: Vec<LanguagePair>,
}

/// Response of `GET /v2/glossary-language-pairs`
#[derive(Debug, Deserialize)]
pub struct LanguagePairsResponse {
    /// Pairs glossaries can be created for
    pub supported_languages: Vec<LanguagePairEntry>,
}

/// One entry of the language pairs response
#[derive(Debug, Deserialize)]
pub struct LanguagePairEntry {
    /// Source language, lower case
    pub source_lang: String,
    /// Target language, lower case
    pub target_lang: String,
}

/// Response of `GET /v2/glossaries`
#[derive(Debug, Deserialize)]
pub struct GlossaryListResponse {
    /// Every glossary of the account
    pub glossaries: Vec<GlossaryInfo>,
}

/// Glossary metadata as returned by DeepL
#[derive(Debug, Deserialize)]
pub struct GlossaryInfo {
    pub glossary_id: String,
    #[serde(default)]
    pub name: String,
    pub ready: bool,
    pub source_lang: String,
    pub target_lang: String,
    pub creation_time: String,
    #[serde(default)]
    pub entry_count: u64,
}

impl GlossaryInfo {
    /// Convert into the provider-neutral descriptor
    pub fn into_remote(self) -> Result<RemoteGlossary, ProviderError> {
        let creation_time = parse_creation_time(&self.creation_time)?;
        Ok(RemoteGlossary {
            glossary_id: self.glossary_id,
            name: self.name,
            source_lang: normalize_code(&self.source_lang),
            target_lang: normalize_code(&self.target_lang),
            creation_time,
            ready: self.ready,
            entry_count: self.entry_count,
        })
    }
}

/// Parse the creation time reported for a glossary
///
/// DeepL sends RFC 3339 (`2021-08-03T14:16:18.329Z`); a plain
/// `YYYY-MM-DD HH:MM:SS` value is read as UTC.
pub fn parse_creation_time(value: &str) -> Result<DateTime<Utc>, ProviderError> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value.trim()) {
        return Ok(parsed.with_timezone(&Utc));
    }

    NaiveDateTime::parse_from_str(value.trim(), "%Y-%m-%d %H:%M:%S")
        .map(|naive| naive.and_utc())
        .map_err(|e| ProviderError::ParseError(format!("Invalid creation_time {:?}: {}", value, e)))
}

/// Pick the API endpoint for a key: free-plan keys end in `:fx`
pub fn default_endpoint_for_key(api_key: &str) -> &'static str {
    if api_key.ends_with(":fx") {
        DEEPL_FREE_ENDPOINT
    } else {
        DEEPL_PRO_ENDPOINT
    }
}

impl DeepL {
    /// Create a new DeepL client
    ///
    /// An empty endpoint selects the public endpoint matching the key.
    pub fn new(
        api_key: impl Into<String>,
        endpoint: impl Into<String>,
        timeout_secs: u64,
    ) -> Result<Self, ProviderError> {
        let api_key = api_key.into();
        let endpoint = endpoint.into();
        let endpoint = if endpoint.trim().is_empty() {
            default_endpoint_for_key(&api_key).to_string()
        } else {
            endpoint.trim_end_matches('/').to_string()
        };

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| ProviderError::ConnectionError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key,
            endpoint,
            timeout_secs,
            configured_pairs: Vec::new(),
        })
    }

    /// Restrict the language pairs to the given ones
    pub fn with_language_pairs(mut self, pairs: Vec<LanguagePair>) -> Self {
        self.configured_pairs = pairs
            .into_iter()
            .map(|p| LanguagePair::new(normalize_code(&p.source), normalize_code(&p.target)))
            .collect();
        self
    }

    /// Get the base endpoint in use
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn api_url(&self, path: &str) -> Result<Url, ProviderError> {
        Url::parse(&format!("{}/{}", self.endpoint, path.trim_start_matches('/')))
            .map_err(|e| ProviderError::RequestFailed(format!("Invalid API URL: {}", e)))
    }

    fn map_send_error(&self, e: reqwest::Error) -> ProviderError {
        if e.is_timeout() {
            ProviderError::Timeout(self.timeout_secs)
        } else if e.is_connect() {
            ProviderError::ConnectionError(e.to_string())
        } else {
            ProviderError::RequestFailed(e.to_string())
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ProviderError> {
        let url = self.api_url(path)?;
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .header("Authorization", format!("DeepL-Auth-Key {}", self.api_key))
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("DeepL API error ({}): {}", status, error_text);

            return Err(match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                    ProviderError::AuthenticationError(error_text)
                }
                StatusCode::TOO_MANY_REQUESTS => ProviderError::RateLimitExceeded(error_text),
                _ => ProviderError::ApiError {
                    status_code: status.as_u16(),
                    message: error_text,
                },
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))
    }

    /// Keep the configured pairs DeepL supports, in configured order
    fn select_pairs(&self, supported: Vec<LanguagePair>) -> Vec<LanguagePair> {
        if self.configured_pairs.is_empty() {
            return supported;
        }

        self.configured_pairs
            .iter()
            .filter(|pair| {
                let known = supported.contains(pair);
                if !known {
                    warn!(
                        "Configured language pair {}->{} is not supported for glossaries, ignoring it",
                        pair.source, pair.target
                    );
                }
                known
            })
            .cloned()
            .collect()
    }
}

#[async_trait]
impl TranslationApi for DeepL {
    async fn get_language_pairs(&self) -> Result<Vec<LanguagePair>, ProviderError> {
        let response: LanguagePairsResponse = self.get_json("v2/glossary-language-pairs").await?;

        let supported = response
            .supported_languages
            .into_iter()
            .map(|p| LanguagePair::new(normalize_code(&p.source_lang), normalize_code(&p.target_lang)))
            .collect();

        Ok(self.select_pairs(supported))
    }

    async fn get_glossaries(&self) -> Result<Vec<RemoteGlossary>, ProviderError> {
        let response: GlossaryListResponse = self.get_json("v2/glossaries").await?;

        response
            .glossaries
            .into_iter()
            .map(GlossaryInfo::into_remote)
            .collect()
    }
}

/*!
 * Glossary view models and request types.
 *
 * Aggregates are derived from persisted entries; requests are validated into
 * canonical form before any store access happens.
 */

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;

use crate::errors::GlossaryError;
use crate::language_utils::validate_language_code;

/// All language variants of one term
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GlossaryAggregate {
    /// Identifier shared by every entry of the term
    pub aggregate_identifier: String,
    /// Text per language code
    pub texts: BTreeMap<String, String>,
}

impl GlossaryAggregate {
    /// Create an empty aggregate
    pub fn new(aggregate_identifier: impl Into<String>) -> Self {
        Self {
            aggregate_identifier: aggregate_identifier.into(),
            texts: BTreeMap::new(),
        }
    }

    /// Text for a language, if present
    pub fn text(&self, language: &str) -> Option<&str> {
        self.texts.get(language).map(String::as_str)
    }
}

/// Ordered list of aggregates
///
/// Serializes as a JSON object `{identifier: {language: text}}` whose key
/// order is the listing order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregateListing(Vec<GlossaryAggregate>);

impl AggregateListing {
    /// Wrap already ordered aggregates
    pub fn new(aggregates: Vec<GlossaryAggregate>) -> Self {
        Self(aggregates)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &GlossaryAggregate> {
        self.0.iter()
    }

    /// Find an aggregate by identifier
    pub fn get(&self, aggregate_identifier: &str) -> Option<&GlossaryAggregate> {
        self.0
            .iter()
            .find(|a| a.aggregate_identifier == aggregate_identifier)
    }

    /// Identifiers in listing order
    pub fn identifiers(&self) -> Vec<&str> {
        self.0.iter().map(|a| a.aggregate_identifier.as_str()).collect()
    }
}

impl Serialize for AggregateListing {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for aggregate in &self.0 {
            map.serialize_entry(&aggregate.aggregate_identifier, &aggregate.texts)?;
        }
        map.end()
    }
}

/// Status of one remote glossary relative to local edits
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GlossaryStatus {
    pub source_lang: String,
    pub target_lang: String,
    /// Creation time formatted as `dd.mm.yyyy HH:MM:SS` (UTC)
    pub creation_date: String,
    /// Local edits postdate the remote glossary
    pub is_outdated: bool,
    /// Mirrors the remote readiness flag
    pub can_be_used: bool,
}

/// Everything the glossary overview page needs
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GlossaryOverview {
    pub glossary: AggregateListing,
    pub languages: Vec<String>,
    pub glossary_status: BTreeMap<String, GlossaryStatus>,
}

/// Answer to create, update and delete requests
#[derive(Debug, Clone, Serialize)]
pub struct MutationResponse {
    pub success: bool,
    pub entries: AggregateListing,
}

/// Normalize and validate the language keys of a text map
fn normalize_texts(texts: BTreeMap<String, String>) -> Result<BTreeMap<String, String>, GlossaryError> {
    let mut normalized = BTreeMap::new();
    for (language, text) in texts {
        let code = validate_language_code(&language)?;
        if normalized.insert(code.clone(), text).is_some() {
            return Err(GlossaryError::DuplicateLanguage(code));
        }
    }
    Ok(normalized)
}

fn require_identifier(identifier: Option<String>) -> Result<String, GlossaryError> {
    identifier
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty())
        .ok_or(GlossaryError::MissingIdentifier)
}

/// Request to create a new aggregate
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAggregateRequest {
    /// Must be absent; a fresh identifier is allocated
    #[serde(default)]
    pub aggregate_identifier: Option<String>,
    /// Text per language
    #[serde(default)]
    pub texts: BTreeMap<String, String>,
}

impl CreateAggregateRequest {
    pub fn new(texts: BTreeMap<String, String>) -> Self {
        Self {
            aggregate_identifier: None,
            texts,
        }
    }

    /// Validate and return the texts keyed by canonical language code
    pub fn validate(self) -> Result<BTreeMap<String, String>, GlossaryError> {
        if self.aggregate_identifier.is_some() {
            return Err(GlossaryError::IdentifierNotAllowed);
        }
        normalize_texts(self.texts)
    }
}

/// Request to upsert texts of an existing aggregate
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAggregateRequest {
    #[serde(default)]
    pub aggregate_identifier: Option<String>,
    #[serde(default)]
    pub texts: BTreeMap<String, String>,
}

impl UpdateAggregateRequest {
    pub fn new(aggregate_identifier: impl Into<String>, texts: BTreeMap<String, String>) -> Self {
        Self {
            aggregate_identifier: Some(aggregate_identifier.into()),
            texts,
        }
    }

    /// Validate and return the identifier and canonical texts
    pub fn validate(self) -> Result<(String, BTreeMap<String, String>), GlossaryError> {
        let identifier = require_identifier(self.aggregate_identifier)?;
        Ok((identifier, normalize_texts(self.texts)?))
    }
}

/// Request to delete a whole aggregate
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteAggregateRequest {
    #[serde(default)]
    pub aggregate_identifier: Option<String>,
}

impl DeleteAggregateRequest {
    pub fn new(aggregate_identifier: impl Into<String>) -> Self {
        Self {
            aggregate_identifier: Some(aggregate_identifier.into()),
        }
    }

    pub fn validate(self) -> Result<String, GlossaryError> {
        require_identifier(self.aggregate_identifier)
    }
}

/*!
 * Database entity models.
 *
 * These structures map directly to the glossary table and provide
 * type-safe access to persisted data.
 */

use anyhow::{Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};

/// Format a timestamp the way it is stored in the database
///
/// Fixed-width microsecond precision with a `Z` suffix, so that string
/// comparison in SQL agrees with chronological order.
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Parse a timestamp read from the database
pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
    let parsed = DateTime::parse_from_rfc3339(value)
        .with_context(|| format!("Invalid stored timestamp: {}", value))?;
    Ok(parsed.with_timezone(&Utc))
}

/// A single persisted glossary entry: one term in one language
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlossaryEntryRecord {
    /// Identifier shared by all language variants of one term
    pub aggregate_identifier: String,
    /// Language code (upper case)
    pub glossary_language: String,
    /// The term in this language
    pub text: String,
    /// Set once at insert
    pub creation_date_time: DateTime<Utc>,
    /// Refreshed whenever `text` changes
    pub last_modification_date_time: DateTime<Utc>,
}

impl GlossaryEntryRecord {
    /// Create a new entry; both timestamps start at `now`
    pub fn new(
        aggregate_identifier: impl Into<String>,
        now: DateTime<Utc>,
        glossary_language: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            aggregate_identifier: aggregate_identifier.into(),
            glossary_language: glossary_language.into(),
            text: text.into(),
            creation_date_time: now,
            last_modification_date_time: now,
        }
    }

    /// Replace the text if it differs, bumping the modification time
    ///
    /// Returns whether the entry changed.
    pub fn apply_text(&mut self, text: &str, now: DateTime<Utc>) -> bool {
        if self.text == text {
            return false;
        }
        self.text = text.to_string();
        self.last_modification_date_time = now;
        true
    }
}

/// A batch of writes committed together in one transaction
#[derive(Debug, Clone, Default)]
pub struct ChangeSet {
    /// Entries to insert
    pub added: Vec<GlossaryEntryRecord>,
    /// Entries whose text and modification time are overwritten
    pub updated: Vec<GlossaryEntryRecord>,
    /// Entries to delete
    pub removed: Vec<GlossaryEntryRecord>,
}

impl ChangeSet {
    /// Create an empty change set
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an insert
    pub fn add(&mut self, entry: GlossaryEntryRecord) {
        self.added.push(entry);
    }

    /// Queue an update
    pub fn update(&mut self, entry: GlossaryEntryRecord) {
        self.updated.push(entry);
    }

    /// Queue a removal
    pub fn remove(&mut self, entry: GlossaryEntryRecord) {
        self.removed.push(entry);
    }

    /// Whether nothing is queued
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.updated.is_empty() && self.removed.is_empty()
    }

    /// Total number of queued writes
    pub fn len(&self) -> usize {
        self.added.len() + self.updated.len() + self.removed.len()
    }
}

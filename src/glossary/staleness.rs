/*!
 * Staleness detection for remote glossaries.
 *
 * A remote glossary is outdated when a local edit in its source or target
 * language happened after the glossary was created. A language without any
 * local entries has never been modified and cannot make a glossary outdated.
 */

use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashMap};

use crate::language_utils::normalize_code;
use crate::providers::RemoteGlossary;

use super::models::GlossaryStatus;

/// Display format of glossary creation dates
pub const CREATION_DATE_FORMAT: &str = "%d.%m.%Y %H:%M:%S";

/// Compares remote glossaries against local modification times
#[derive(Debug, Clone, Default)]
pub struct StalenessEvaluator {
    last_modified: HashMap<String, DateTime<Utc>>,
}

impl StalenessEvaluator {
    /// Create an evaluator from the per-language last modification times
    pub fn new(last_modified: HashMap<String, DateTime<Utc>>) -> Self {
        let last_modified = last_modified
            .into_iter()
            .map(|(language, ts)| (normalize_code(&language), ts))
            .collect();
        Self { last_modified }
    }

    /// Last local modification of a language, `None` if never modified
    pub fn last_modified(&self, language: &str) -> Option<DateTime<Utc>> {
        self.last_modified.get(&normalize_code(language)).copied()
    }

    /// Whether a glossary created at `created` predates local edits
    pub fn is_outdated(&self, created: DateTime<Utc>, source_lang: &str, target_lang: &str) -> bool {
        let edited_after = |language: &str| {
            self.last_modified(language)
                .is_some_and(|modified| created < modified)
        };
        edited_after(source_lang) || edited_after(target_lang)
    }

    /// Build the status record of one remote glossary
    pub fn status(&self, glossary: &RemoteGlossary) -> GlossaryStatus {
        let source_lang = normalize_code(&glossary.source_lang);
        let target_lang = normalize_code(&glossary.target_lang);

        GlossaryStatus {
            is_outdated: self.is_outdated(glossary.creation_time, &source_lang, &target_lang),
            creation_date: glossary.creation_time.format(CREATION_DATE_FORMAT).to_string(),
            can_be_used: glossary.ready,
            source_lang,
            target_lang,
        }
    }

    /// Evaluate every remote glossary, keyed by `key_for(source, target)`
    ///
    /// The map is ordered by key. If two glossaries share a key, the one
    /// listed later wins.
    pub fn evaluate<F>(&self, glossaries: &[RemoteGlossary], key_for: F) -> BTreeMap<String, GlossaryStatus>
    where
        F: Fn(&str, &str) -> String,
    {
        glossaries
            .iter()
            .map(|glossary| {
                let status = self.status(glossary);
                (key_for(&status.source_lang, &status.target_lang), status)
            })
            .collect()
    }
}

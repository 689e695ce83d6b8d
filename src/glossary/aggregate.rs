/*!
 * Grouping of glossary entries into aggregates and their ordering.
 */

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::app_config::MissingSortPolicy;
use crate::database::GlossaryEntryRecord;
use crate::errors::GlossaryError;

use super::models::{AggregateListing, GlossaryAggregate};

/// Ordering strategy for aggregate listings
///
/// The key is the text of one language; texts compare lexicographically by
/// bytes. Aggregates without that language are placed according to the
/// policy, and ties fall back to the identifier so output is deterministic.
#[derive(Debug, Clone)]
pub struct AggregateSorter {
    sort_by_language: String,
    missing: MissingSortPolicy,
}

impl AggregateSorter {
    pub fn new(sort_by_language: impl Into<String>, missing: MissingSortPolicy) -> Self {
        Self {
            sort_by_language: sort_by_language.into(),
            missing,
        }
    }

    pub fn sort_by_language(&self) -> &str {
        &self.sort_by_language
    }

    fn compare(&self, a: &GlossaryAggregate, b: &GlossaryAggregate) -> Ordering {
        let key_a = a.text(&self.sort_by_language);
        let key_b = b.text(&self.sort_by_language);

        let by_key = match (key_a, key_b) {
            (Some(x), Some(y)) => x.cmp(y),
            (None, None) => Ordering::Equal,
            (Some(_), None) => match self.missing {
                MissingSortPolicy::First => Ordering::Greater,
                _ => Ordering::Less,
            },
            (None, Some(_)) => match self.missing {
                MissingSortPolicy::First => Ordering::Less,
                _ => Ordering::Greater,
            },
        };

        by_key.then_with(|| a.aggregate_identifier.cmp(&b.aggregate_identifier))
    }

    /// Check that an aggregate with these languages can be listed
    ///
    /// Only the `Error` policy rejects an aggregate without a sort-language text.
    pub fn check_languages<'a>(
        &self,
        aggregate_identifier: &str,
        mut languages: impl Iterator<Item = &'a str>,
    ) -> Result<(), GlossaryError> {
        if self.missing == MissingSortPolicy::Error
            && !languages.any(|language| language == self.sort_by_language)
        {
            return Err(GlossaryError::MissingSortLanguage {
                aggregate: aggregate_identifier.to_string(),
                language: self.sort_by_language.clone(),
            });
        }
        Ok(())
    }

    /// Sort aggregates in place
    pub fn sort(&self, aggregates: &mut [GlossaryAggregate]) -> Result<(), GlossaryError> {
        if self.missing == MissingSortPolicy::Error {
            if let Some(missing) = aggregates
                .iter()
                .find(|a| a.text(&self.sort_by_language).is_none())
            {
                return Err(GlossaryError::MissingSortLanguage {
                    aggregate: missing.aggregate_identifier.clone(),
                    language: self.sort_by_language.clone(),
                });
            }
        }

        aggregates.sort_by(|a, b| self.compare(a, b));
        Ok(())
    }
}

/// Group entries by aggregate identifier
///
/// The result is unordered; languages inside an aggregate are keyed by code.
pub fn group_entries(entries: impl IntoIterator<Item = GlossaryEntryRecord>) -> Vec<GlossaryAggregate> {
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut aggregates: Vec<GlossaryAggregate> = Vec::new();

    for entry in entries {
        let index = *positions
            .entry(entry.aggregate_identifier.clone())
            .or_insert_with(|| {
                aggregates.push(GlossaryAggregate::new(entry.aggregate_identifier.clone()));
                aggregates.len() - 1
            });

        aggregates[index]
            .texts
            .insert(entry.glossary_language, entry.text);
    }

    aggregates
}

/// Group entries into aggregates and order them for display
pub fn build_listing(
    entries: impl IntoIterator<Item = GlossaryEntryRecord>,
    sorter: &AggregateSorter,
) -> Result<AggregateListing, GlossaryError> {
    let mut aggregates = group_entries(entries);
    sorter.sort(&mut aggregates)?;
    Ok(AggregateListing::new(aggregates))
}

/*!
 * Glossary service: request-scoped glossary operations.
 *
 * Each operation runs to completion against the store it was constructed
 * with; every mutating operation validates its input first and then commits
 * all of its writes in a single transaction.
 */

use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use std::collections::BTreeMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::app_config::GlossaryConfig;
use crate::database::{ChangeSet, GlossaryEntryRecord, Repository};
use crate::errors::GlossaryError;
use crate::providers::TranslationApi;

use super::aggregate::{build_listing, AggregateSorter};
use super::languages::extract_languages;
use super::models::{
    AggregateListing, CreateAggregateRequest, DeleteAggregateRequest, GlossaryOverview,
    GlossaryStatus, MutationResponse, UpdateAggregateRequest,
};
use super::staleness::StalenessEvaluator;

/// Glossary backend service
pub struct GlossaryService {
    /// Glossary entry store
    repo: Repository,
    /// Translation API hosting the remote glossaries
    api: Arc<dyn TranslationApi>,
    /// Ordering of aggregate listings
    sorter: AggregateSorter,
}

impl GlossaryService {
    /// Create a new service from its collaborators
    pub fn new(repo: Repository, api: Arc<dyn TranslationApi>, config: &GlossaryConfig) -> Self {
        Self {
            repo,
            api,
            sorter: AggregateSorter::new(config.sort_language(), config.missing_sort_language),
        }
    }

    /// Get the underlying repository
    pub fn repository(&self) -> &Repository {
        &self.repo
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// All aggregates, ordered by the configured sort language
    pub async fn entry_aggregates(&self) -> Result<AggregateListing, GlossaryError> {
        let entries = self.repo.list_all().await?;
        build_listing(entries, &self.sorter)
    }

    /// Distinct languages of the supported language pairs
    pub async fn languages(&self) -> Result<Vec<String>, GlossaryError> {
        let pairs = self.api.get_language_pairs().await?;
        let languages = extract_languages(&pairs);
        debug!("Glossary languages: {}", languages.join(", "));
        Ok(languages)
    }

    /// Staleness of every remote glossary, keyed by its internal key
    pub async fn glossary_status(&self) -> Result<BTreeMap<String, GlossaryStatus>, GlossaryError> {
        let last_modified = self.repo.last_modified_per_language().await?;
        let glossaries = self.api.get_glossaries().await?;

        let evaluator = StalenessEvaluator::new(last_modified);
        let statuses = evaluator.evaluate(&glossaries, |source, target| {
            self.api.internal_glossary_key(source, target)
        });

        let outdated = statuses.values().filter(|s| s.is_outdated).count();
        if outdated > 0 {
            info!("{} of {} remote glossaries are outdated", outdated, statuses.len());
        }

        Ok(statuses)
    }

    /// Everything shown on the glossary overview
    pub async fn index(&self) -> Result<GlossaryOverview, GlossaryError> {
        Ok(GlossaryOverview {
            glossary: self.entry_aggregates().await?,
            languages: self.languages().await?,
            glossary_status: self.glossary_status().await?,
        })
    }

    // =========================================================================
    // Writes
    // =========================================================================

    async fn respond(&self) -> Result<MutationResponse, GlossaryError> {
        Ok(MutationResponse {
            success: true,
            entries: self.entry_aggregates().await?,
        })
    }

    /// Create a new aggregate with a text for every glossary language
    pub async fn create(&self, request: CreateAggregateRequest) -> Result<MutationResponse, GlossaryError> {
        let texts = request.validate()?;
        let languages = self.languages().await?;
        let now = Utc::now();

        let identifier = Uuid::new_v4().to_string();
        let changes = plan_create(&identifier, &languages, &texts, now)?;
        self.sorter
            .check_languages(&identifier, languages.iter().map(String::as_str))?;

        self.repo.persist(changes).await?;
        info!("Created glossary aggregate {} ({} languages)", identifier, languages.len());

        self.respond().await
    }

    /// Upsert texts of an existing aggregate
    pub async fn update(&self, request: UpdateAggregateRequest) -> Result<MutationResponse, GlossaryError> {
        let (identifier, texts) = request.validate()?;

        let existing = self.repo.find_by_aggregate(&identifier).await?;
        if existing.is_empty() {
            return Err(GlossaryError::UnknownAggregate(identifier));
        }

        let mut languages: Vec<String> = existing
            .iter()
            .map(|entry| entry.glossary_language.clone())
            .collect();

        let changes = plan_update(&identifier, existing, &texts, Utc::now());
        let changed = changes.len();

        languages.extend(changes.added.iter().map(|entry| entry.glossary_language.clone()));
        self.sorter
            .check_languages(&identifier, languages.iter().map(String::as_str))?;

        self.repo.persist(changes).await?;
        info!("Updated glossary aggregate {} ({} changes)", identifier, changed);

        self.respond().await
    }

    /// Delete every entry of an aggregate
    pub async fn delete(&self, request: DeleteAggregateRequest) -> Result<MutationResponse, GlossaryError> {
        let identifier = request.validate()?;

        let mut changes = ChangeSet::new();
        for entry in self.repo.find_by_aggregate(&identifier).await? {
            changes.remove(entry);
        }

        if changes.is_empty() {
            warn!("Glossary aggregate {} has no entries, nothing to delete", identifier);
        } else {
            let removed = changes.len();
            self.repo.persist(changes).await?;
            info!("Deleted glossary aggregate {} ({} entries)", identifier, removed);
        }

        self.respond().await
    }
}

/// Plan the entries of a new aggregate
///
/// Fails before anything is queued if there are no languages or a language
/// lacks a non-blank text.
pub fn plan_create(
    identifier: &str,
    languages: &[String],
    texts: &BTreeMap<String, String>,
    now: DateTime<Utc>,
) -> Result<ChangeSet, GlossaryError> {
    if languages.is_empty() {
        return Err(GlossaryError::NoGlossaryLanguages);
    }

    if let Some(missing) = languages
        .iter()
        .find(|language| texts.get(*language).is_none_or(|text| text.trim().is_empty()))
    {
        return Err(GlossaryError::MissingLanguageText(missing.clone()));
    }

    for language in texts.keys().filter(|l| !languages.contains(l)) {
        debug!("Ignoring text for unconfigured language {}", language);
    }

    let mut changes = ChangeSet::new();
    for language in languages {
        changes.add(GlossaryEntryRecord::new(identifier, now, language.clone(), texts[language].clone()));
    }
    Ok(changes)
}

/// Plan the writes that bring an aggregate in line with `texts`
///
/// Existing entries change only when their text differs; languages missing
/// from `texts` are untouched; new languages with a non-blank text are added.
pub fn plan_update(
    identifier: &str,
    existing: Vec<GlossaryEntryRecord>,
    texts: &BTreeMap<String, String>,
    now: DateTime<Utc>,
) -> ChangeSet {
    let mut changes = ChangeSet::new();
    let mut remaining = texts.clone();

    for mut entry in existing {
        if let Some(text) = remaining.remove(&entry.glossary_language) {
            if entry.apply_text(&text, now) {
                changes.update(entry);
            }
        }
    }

    for (language, text) in remaining {
        if text.trim().is_empty() {
            debug!("Skipping blank text for new language {}", language);
            continue;
        }
        changes.add(GlossaryEntryRecord::new(identifier, now, language, text));
    }

    changes
}

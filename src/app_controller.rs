use anyhow::{Context, Result};
use log::{debug, info};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::app_config::Config;
use crate::database::{DatabaseConnection, Repository};
use crate::glossary::{
    CreateAggregateRequest, DeleteAggregateRequest, GlossaryService, UpdateAggregateRequest,
};
use crate::providers::TranslationApi;
use crate::providers::deepl::DeepL;

// @module: Application controller for glossary maintenance

/// A glossary operation requested by the user
#[derive(Debug, Clone, PartialEq)]
pub enum GlossaryCommand {
    /// Aggregates, languages and remote glossary status together
    Overview,
    /// Aggregate listing only
    List,
    /// Distinct glossary languages
    Languages,
    /// Remote glossary status only
    Status,
    /// Database statistics
    Stats,
    /// Create a new aggregate
    Create { texts: BTreeMap<String, String> },
    /// Upsert texts of an aggregate
    Update {
        aggregate_identifier: String,
        texts: BTreeMap<String, String>,
    },
    /// Delete an aggregate
    Delete { aggregate_identifier: String },
}

impl GlossaryCommand {
    /// Whether the command talks to the translation API
    pub fn needs_api(&self) -> bool {
        matches!(
            self,
            Self::Overview | Self::Languages | Self::Status | Self::Create { .. }
        )
    }
}

/// Main application controller
pub struct Controller {
    // @field: App configuration
    config: Config,
    // @field: Glossary service wired from the configuration
    service: GlossaryService,
}

impl Controller {
    // @method: Create a controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        let db = match &config.database.path {
            Some(path) => DatabaseConnection::new(path)?,
            None => DatabaseConnection::new_default()?,
        };

        let api = DeepL::new(
            config.deepl.api_key.clone(),
            config.deepl.endpoint.clone(),
            config.deepl.timeout_secs,
        )
        .context("Failed to create DeepL client")?
        .with_language_pairs(config.deepl.language_pairs.clone());

        debug!("Using DeepL endpoint {}", api.endpoint());

        Ok(Self::with_parts(config, Repository::new(db), Arc::new(api)))
    }

    /// Create a controller from explicit collaborators
    pub fn with_parts(config: Config, repo: Repository, api: Arc<dyn TranslationApi>) -> Self {
        let service = GlossaryService::new(repo, api, &config.glossary);
        Self { config, service }
    }

    /// Get the glossary service
    pub fn service(&self) -> &GlossaryService {
        &self.service
    }

    /// Run a command and render its result as pretty JSON
    pub async fn run(&self, command: GlossaryCommand) -> Result<String> {
        if command.needs_api() {
            self.config.validate_api()?;
        }

        info!("Running {:?}", command);

        match command {
            GlossaryCommand::Overview => to_json(&self.service.index().await?),
            GlossaryCommand::List => to_json(&self.service.entry_aggregates().await?),
            GlossaryCommand::Languages => to_json(&self.service.languages().await?),
            GlossaryCommand::Status => to_json(&self.service.glossary_status().await?),
            GlossaryCommand::Stats => to_json(&self.service.repository().connection().stats()?),
            GlossaryCommand::Create { texts } => {
                to_json(&self.service.create(CreateAggregateRequest::new(texts)).await?)
            }
            GlossaryCommand::Update {
                aggregate_identifier,
                texts,
            } => to_json(
                &self
                    .service
                    .update(UpdateAggregateRequest::new(aggregate_identifier, texts))
                    .await?,
            ),
            GlossaryCommand::Delete {
                aggregate_identifier,
            } => to_json(
                &self
                    .service
                    .delete(DeleteAggregateRequest::new(aggregate_identifier))
                    .await?,
            ),
        }
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("Failed to serialize result")
}

/// Parse `LANG=TEXT` arguments into a text map
pub fn parse_text_args(args: &[String]) -> Result<BTreeMap<String, String>> {
    let mut texts = BTreeMap::new();
    for arg in args {
        let (language, text) = arg
            .split_once('=')
            .with_context(|| format!("Expected LANG=TEXT, got {:?}", arg))?;
        texts.insert(language.trim().to_string(), text.to_string());
    }
    Ok(texts)
}

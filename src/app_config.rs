use anyhow::{anyhow, Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::language_utils;
use crate::providers::LanguagePair;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    /// Glossary backend settings
    #[serde(default)]
    pub glossary: GlossaryConfig,

    /// DeepL API settings
    #[serde(default)]
    pub deepl: DeepLConfig,

    /// Database settings
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// What to do with aggregates lacking a text in the sort language
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum MissingSortPolicy {
    /// Place them after all sortable aggregates
    #[default]
    Last,
    /// Place them before all sortable aggregates
    First,
    /// Fail the listing
    Error,
}

/// Glossary backend settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GlossaryConfig {
    /// Language code whose text orders the aggregate listing
    #[serde(default = "default_sort_by_language")]
    pub sort_by_language: String,

    /// Placement of aggregates without a sort-language text
    #[serde(default)]
    pub missing_sort_language: MissingSortPolicy,
}

impl GlossaryConfig {
    /// The sort language in canonical form
    pub fn sort_language(&self) -> String {
        language_utils::normalize_code(&self.sort_by_language)
    }
}

impl Default for GlossaryConfig {
    fn default() -> Self {
        Self {
            sort_by_language: default_sort_by_language(),
            missing_sort_language: MissingSortPolicy::default(),
        }
    }
}

/// DeepL service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DeepLConfig {
    // @field: API key
    #[serde(default = "String::new")]
    pub api_key: String,

    // @field: Service URL, empty selects the public endpoint for the key
    #[serde(default = "String::new")]
    pub endpoint: String,

    // @field: Timeout seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    // @field: Language pairs to maintain, empty means all supported pairs
    #[serde(default)]
    pub language_pairs: Vec<LanguagePair>,
}

impl Default for DeepLConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            endpoint: String::new(),
            timeout_secs: default_timeout_secs(),
            language_pairs: Vec::new(),
        }
    }
}

/// Database configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct DatabaseConfig {
    /// Path of the SQLite file; `None` uses the user's data directory
    #[serde(default)]
    pub path: Option<String>,
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<&LogLevel> for log::LevelFilter {
    fn from(level: &LogLevel) -> Self {
        match level {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_sort_by_language() -> String {
    "EN".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl Config {
    /// Load a configuration file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {}", path.display()))?;

        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Write the configuration as pretty JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let config_json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;

        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write config to file: {}", path.display()))?;

        Ok(())
    }

    /// Load the configuration, creating a default file if none exists
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            return Self::from_file(path);
        }

        warn!("Config file not found at '{}', creating default config.", path.display());
        let config = Config::default();
        config.save(path)?;
        Ok(config)
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        language_utils::validate_language_code(&self.glossary.sort_by_language)
            .map_err(|e| anyhow!("Invalid sort_by_language: {}", e))?;

        if self.deepl.timeout_secs == 0 {
            return Err(anyhow!("DeepL timeout_secs must be greater than zero"));
        }

        for pair in &self.deepl.language_pairs {
            language_utils::validate_language_code(&pair.source)
                .and_then(|_| language_utils::validate_language_code(&pair.target))
                .map_err(|e| anyhow!("Invalid configured language pair: {}", e))?;
        }

        Ok(())
    }

    /// Validate the settings needed to talk to DeepL
    pub fn validate_api(&self) -> Result<()> {
        if self.deepl.api_key.trim().is_empty() {
            return Err(anyhow!("DeepL API key is required"));
        }
        Ok(())
    }

}

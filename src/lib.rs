/*!
 * # glosswatch - multilingual glossary maintenance
 *
 * A Rust library for maintaining glossary terms in several languages and
 * checking whether translation-memory glossaries hosted by DeepL are stale.
 *
 * ## Features
 *
 * - Store glossary terms as aggregates: one identifier, one text per language
 * - Create, update (per-language upsert) and delete whole aggregates
 * - Sorted aggregate listings keyed by a configured language
 * - Language discovery from the API's supported language pairs
 * - Staleness detection comparing remote glossary creation times with local edits
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `database`: SQLite persistence of glossary entries
 * - `glossary`: Aggregates, staleness evaluation and the glossary service
 * - `providers`: Translation API clients (DeepL and a mock)
 * - `app_controller`: Wires configuration, store and API for the CLI
 * - `language_utils`: Language code utilities
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod database;
pub mod errors;
pub mod glossary;
pub mod language_utils;
pub mod providers;

// Re-export main types for easier usage
pub use app_config::Config;
pub use database::Repository;
pub use glossary::{GlossaryService, StalenessEvaluator};
pub use language_utils::{normalize_code, validate_language_code};
pub use errors::{AppError, GlossaryError, ProviderError};

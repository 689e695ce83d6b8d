/*!
 * Database module for persistent storage of glossary entries.
 *
 * This module provides SQLite-based persistence for:
 * - Glossary entries (one row per aggregate and language)
 * - Per-language modification tracking used for staleness checks
 */

pub mod schema;
pub mod connection;
pub mod repository;
pub mod models;

// Re-export main types
pub use connection::{DatabaseConnection, DatabaseStats};
pub use models::{ChangeSet, GlossaryEntryRecord};
pub use repository::Repository;

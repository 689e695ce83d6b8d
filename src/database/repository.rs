/*!
 * Repository layer for glossary entries.
 *
 * This module provides a high-level API for all glossary database
 * operations, abstracting away the SQL details and providing type-safe access.
 */

use anyhow::{Context, Result, anyhow};
use chrono::{DateTime, Utc};
use log::debug;
use rusqlite::{params, Connection, Row};
use std::collections::HashMap;

use super::connection::DatabaseConnection;
use super::models::{format_timestamp, parse_timestamp, ChangeSet, GlossaryEntryRecord};

const SELECT_ENTRY_COLUMNS: &str = r#"
    SELECT aggregate_identifier, glossary_language, text,
           creation_date_time, last_modification_date_time
    FROM glossary_entries
"#;

/// Row as read from SQLite, before timestamps are parsed
struct RawEntryRow {
    aggregate_identifier: String,
    glossary_language: String,
    text: String,
    creation_date_time: String,
    last_modification_date_time: String,
}

impl RawEntryRow {
    fn into_record(self) -> Result<GlossaryEntryRecord> {
        Ok(GlossaryEntryRecord {
            aggregate_identifier: self.aggregate_identifier,
            glossary_language: self.glossary_language,
            text: self.text,
            creation_date_time: parse_timestamp(&self.creation_date_time)?,
            last_modification_date_time: parse_timestamp(&self.last_modification_date_time)?,
        })
    }
}

/// Repository for glossary entry operations
#[derive(Clone)]
pub struct Repository {
    /// Database connection
    db: DatabaseConnection,
}

impl Repository {
    /// Create a new repository with the given database connection
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Create a repository with an in-memory database (for testing)
    pub fn new_in_memory() -> Result<Self> {
        let db = DatabaseConnection::new_in_memory()?;
        Ok(Self::new(db))
    }

    /// Get the underlying connection
    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    fn parse_entry_row(row: &Row) -> rusqlite::Result<RawEntryRow> {
        Ok(RawEntryRow {
            aggregate_identifier: row.get(0)?,
            glossary_language: row.get(1)?,
            text: row.get(2)?,
            creation_date_time: row.get(3)?,
            last_modification_date_time: row.get(4)?,
        })
    }

    fn query_entries<P: rusqlite::Params>(
        conn: &Connection,
        sql: &str,
        params: P,
    ) -> Result<Vec<GlossaryEntryRecord>> {
        let mut stmt = conn.prepare(sql)?;
        let rows = stmt.query_map(params, Self::parse_entry_row)?;

        let mut entries = Vec::new();
        for row in rows {
            entries.push(row?.into_record()?);
        }
        Ok(entries)
    }

    // =========================================================================
    // Lookups
    // =========================================================================

    /// Get all glossary entries, unordered
    pub async fn list_all(&self) -> Result<Vec<GlossaryEntryRecord>> {
        self.db
            .execute_async(|conn| Self::query_entries(conn, SELECT_ENTRY_COLUMNS, []))
            .await
    }

    /// Get every entry belonging to one aggregate
    pub async fn find_by_aggregate(&self, aggregate_identifier: &str) -> Result<Vec<GlossaryEntryRecord>> {
        let aggregate_identifier = aggregate_identifier.to_string();

        self.db
            .execute_async(move |conn| {
                let sql = format!(
                    "{} WHERE aggregate_identifier = ?1 ORDER BY glossary_language",
                    SELECT_ENTRY_COLUMNS
                );
                let entries = Self::query_entries(conn, &sql, [&aggregate_identifier])?;
                debug!(
                    "Found {} entries for aggregate {}",
                    entries.len(),
                    aggregate_identifier
                );
                Ok(entries)
            })
            .await
    }

    /// Get the latest modification time of every language in the store
    pub async fn last_modified_per_language(&self) -> Result<HashMap<String, DateTime<Utc>>> {
        self.db
            .execute_async(|conn| {
                let mut stmt = conn.prepare(
                    r#"
                    SELECT glossary_language, MAX(last_modification_date_time)
                    FROM glossary_entries
                    GROUP BY glossary_language
                    "#,
                )?;

                let rows = stmt.query_map([], |row| {
                    Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
                })?;

                let mut result = HashMap::new();
                for row in rows {
                    let (language, modified) = row?;
                    result.insert(language, parse_timestamp(&modified)?);
                }
                Ok(result)
            })
            .await
    }

    /// Count all stored entries
    pub async fn count(&self) -> Result<i64> {
        self.db
            .execute_async(|conn| {
                Ok(conn.query_row("SELECT COUNT(*) FROM glossary_entries", [], |row| row.get(0))?)
            })
            .await
    }

    // =========================================================================
    // Writes
    // =========================================================================

    fn insert_sync(conn: &Connection, entry: &GlossaryEntryRecord) -> Result<()> {
        conn.execute(
            r#"
            INSERT INTO glossary_entries (
                aggregate_identifier, glossary_language, text,
                creation_date_time, last_modification_date_time
            ) VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                entry.aggregate_identifier,
                entry.glossary_language,
                entry.text,
                format_timestamp(&entry.creation_date_time),
                format_timestamp(&entry.last_modification_date_time),
            ],
        )
        .with_context(|| {
            format!(
                "Failed to add entry {}/{}",
                entry.aggregate_identifier, entry.glossary_language
            )
        })?;
        Ok(())
    }

    fn update_sync(conn: &Connection, entry: &GlossaryEntryRecord) -> Result<()> {
        let changed = conn.execute(
            r#"
            UPDATE glossary_entries
            SET text = ?1, last_modification_date_time = ?2
            WHERE aggregate_identifier = ?3 AND glossary_language = ?4
            "#,
            params![
                entry.text,
                format_timestamp(&entry.last_modification_date_time),
                entry.aggregate_identifier,
                entry.glossary_language,
            ],
        )?;

        if changed == 0 {
            return Err(anyhow!(
                "Unknown glossary entry {}/{}",
                entry.aggregate_identifier,
                entry.glossary_language
            ));
        }
        Ok(())
    }

    fn remove_sync(conn: &Connection, entry: &GlossaryEntryRecord) -> Result<()> {
        conn.execute(
            "DELETE FROM glossary_entries WHERE aggregate_identifier = ?1 AND glossary_language = ?2",
            params![entry.aggregate_identifier, entry.glossary_language],
        )?;
        Ok(())
    }

    /// Insert one entry; fails if the language already exists for the aggregate
    pub async fn add(&self, entry: &GlossaryEntryRecord) -> Result<()> {
        let mut changes = ChangeSet::new();
        changes.add(entry.clone());
        self.persist(changes).await
    }

    /// Overwrite the text and modification time of an existing entry
    pub async fn update(&self, entry: &GlossaryEntryRecord) -> Result<()> {
        let mut changes = ChangeSet::new();
        changes.update(entry.clone());
        self.persist(changes).await
    }

    /// Delete one entry
    pub async fn remove(&self, entry: &GlossaryEntryRecord) -> Result<()> {
        let mut changes = ChangeSet::new();
        changes.remove(entry.clone());
        self.persist(changes).await
    }

    /// Commit a batch of writes atomically
    ///
    /// Removals run first, then updates, then inserts. If any statement fails
    /// the whole batch is rolled back.
    pub async fn persist(&self, changes: ChangeSet) -> Result<()> {
        if changes.is_empty() {
            debug!("Nothing to persist");
            return Ok(());
        }

        let total = changes.len();
        self.db
            .transaction_async(move |tx| {
                for entry in &changes.removed {
                    Self::remove_sync(tx, entry)?;
                }
                for entry in &changes.updated {
                    Self::update_sync(tx, entry)?;
                }
                for entry in &changes.added {
                    Self::insert_sync(tx, entry)?;
                }
                Ok(())
            })
            .await?;

        debug!("Persisted {} glossary changes", total);
        Ok(())
    }
}

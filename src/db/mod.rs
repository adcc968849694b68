#[cfg(test)]
mod memory;
mod schema;

use anyhow::{Context, Result};
use rusqlite::{params, Connection};
use std::path::Path;

use crate::models::ExpenseRecord;

#[cfg(test)]
pub(crate) use memory::MemoryStore;

/// Storage key holding the JSON array of expense records.
pub(crate) const EXPENSES_KEY: &str = "expenses";

/// Load-on-start, save-after-mutation contract the ledger is persisted through.
pub(crate) trait ExpenseStore {
    fn load(&self) -> Result<Vec<ExpenseRecord>>;
    fn save(&mut self, records: &[ExpenseRecord]) -> Result<()>;
}

pub(crate) fn encode_expenses(records: &[ExpenseRecord]) -> Result<String> {
    serde_json::to_string(records).context("Failed to encode expenses")
}

pub(crate) fn decode_expenses(raw: &str) -> Result<Vec<ExpenseRecord>> {
    serde_json::from_str(raw).context("Stored expenses are not valid JSON")
}

/// String key/value store on top of a SQLite file.
pub(crate) struct Database {
    conn: Connection,
}

impl Database {
    pub(crate) fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database: {}", path.display()))?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")
            .context("Failed to set database pragmas")?;
        let mut db = Self { conn };
        db.migrate().context("Database migration failed")?;
        Ok(db)
    }

    #[cfg(test)]
    pub(crate) fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let mut db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&mut self) -> Result<()> {
        let has_version_table: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
            [],
            |row| row.get(0),
        )?;

        if !has_version_table {
            // Fresh database - apply full schema
            self.conn.execute_batch(schema::SCHEMA_V1)?;
            self.conn.execute(
                "INSERT INTO schema_version (version) VALUES (?1)",
                params![schema::CURRENT_VERSION],
            )?;
            log::info!("Created storage schema v{}", schema::CURRENT_VERSION);
            return Ok(());
        }

        let current: i32 = self
            .conn
            .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                row.get(0)
            })
            .unwrap_or(0);

        for &(from_version, sql) in schema::MIGRATIONS {
            if current <= from_version {
                self.conn.execute_batch(sql)?;
            }
        }

        if current < schema::CURRENT_VERSION {
            self.conn.execute(
                "UPDATE schema_version SET version = ?1",
                params![schema::CURRENT_VERSION],
            )?;
            log::info!(
                "Migrated storage schema v{current} -> v{}",
                schema::CURRENT_VERSION
            );
        }

        Ok(())
    }

    pub(crate) fn get(&self, key: &str) -> Result<Option<String>> {
        let result = self.conn.query_row(
            "SELECT value FROM storage WHERE key = ?1",
            params![key],
            |row| row.get(0),
        );
        match result {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Last write wins.
    pub(crate) fn set(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO storage (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = ?2, updated_at = ?3",
            params![key, value, chrono::Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }
}

impl ExpenseStore for Database {
    fn load(&self) -> Result<Vec<ExpenseRecord>> {
        match self.get(EXPENSES_KEY)? {
            Some(raw) => decode_expenses(&raw),
            None => Ok(Vec::new()),
        }
    }

    fn save(&mut self, records: &[ExpenseRecord]) -> Result<()> {
        let raw = encode_expenses(records)?;
        self.set(EXPENSES_KEY, &raw)
            .context("Failed to write expenses")
    }
}

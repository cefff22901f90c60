//! SQLite-backed label corpus.
//!
//! The corpus is produced by an external sync job (out of scope here) and
//! consumed once at startup: `store.load(db.load_records()?)`.

use std::path::Path;

use rusqlite::{params, Connection};
use thiserror::Error;

use crate::models::SafetyRecord;

/// Database errors.
#[derive(Error, Debug)]
pub enum DbError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

pub type DbResult<T> = Result<T, DbError>;

/// Schema matching the label sync job's output.
const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS labels (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    rxcui TEXT,
    generic_name TEXT,
    brand_name TEXT,
    interactions TEXT NOT NULL DEFAULT '',
    contraindications TEXT NOT NULL DEFAULT '',
    warnings TEXT NOT NULL DEFAULT '',
    last_updated TEXT
);
CREATE INDEX IF NOT EXISTS idx_labels_generic ON labels(generic_name);
CREATE INDEX IF NOT EXISTS idx_labels_brand ON labels(brand_name);
"#;

/// Connection wrapper for the label corpus.
pub struct CorpusDb {
    conn: Connection,
}

impl CorpusDb {
    /// Open the corpus at path, creating the schema if needed.
    pub fn open<P: AsRef<Path>>(path: P) -> DbResult<Self> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.initialize()?;
        Ok(db)
    }

    /// Create an in-memory corpus (for testing).
    pub fn open_in_memory() -> DbResult<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.initialize()?;
        Ok(db)
    }

    fn initialize(&self) -> DbResult<()> {
        self.conn.execute_batch(SCHEMA)?;
        Ok(())
    }

    /// Insert one label record.
    pub fn insert_label(&self, record: &SafetyRecord) -> DbResult<()> {
        self.conn.execute(
            r#"
            INSERT INTO labels (rxcui, generic_name, brand_name, interactions, contraindications, warnings)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
            params![
                record.rxcui,
                record.generic_name,
                record.brand_name,
                record.interactions,
                record.contraindications,
                record.warnings,
            ],
        )?;
        Ok(())
    }

    /// Load every label record, ready for [`InteractionStore::load`].
    ///
    /// [`InteractionStore::load`]: crate::interactions::InteractionStore::load
    pub fn load_records(&self) -> DbResult<Vec<SafetyRecord>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT rxcui, generic_name, brand_name, interactions, contraindications, warnings
            FROM labels
            ORDER BY id
            "#,
        )?;

        let rows = stmt.query_map([], |row| {
            Ok(SafetyRecord {
                rxcui: row.get(0)?,
                generic_name: row.get(1)?,
                brand_name: row.get(2)?,
                interactions: row.get(3)?,
                contraindications: row.get(4)?,
                warnings: row.get(5)?,
            })
        })?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row?);
        }
        Ok(records)
    }

    /// Number of label records.
    pub fn label_count(&self) -> DbResult<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM labels", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

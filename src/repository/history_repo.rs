// ==========================================
// Road appraisal - calculation history repository
// ==========================================
// calculation_history: append-only list of saved batches.
// Saving from the session appends the record and clears the
// draft in a single transaction.
// ==========================================

use crate::domain::appraisal::BatchResult;
use crate::domain::history::{HistoryEntry, HistoryRecord};
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::NaiveDateTime;
use rusqlite::{params, Connection, OptionalExtension, Row, Transaction};
use std::sync::{Arc, Mutex};

pub struct HistoryRepository {
    conn: Arc<Mutex<Connection>>,
}

impl HistoryRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// Batch JSON that is guaranteed to load back.
    /// serde_json writes NaN / inf as null, which `find_by_id` could never read.
    fn encode_batch(record: &HistoryRecord) -> RepositoryResult<String> {
        if !record.total_cost.is_finite() {
            return Err(RepositoryError::InvalidPayload(format!(
                "total_cost is not finite: {}",
                record.total_cost
            )));
        }
        let batch_json = serde_json::to_string(&record.batch)?;
        serde_json::from_str::<BatchResult>(&batch_json).map_err(|e| {
            RepositoryError::InvalidPayload(format!(
                "batch {} contains values that cannot be stored: {}",
                record.history_id, e
            ))
        })?;
        Ok(batch_json)
    }

    fn insert_in_tx(
        tx: &Transaction<'_>,
        record: &HistoryRecord,
        batch_json: &str,
    ) -> RepositoryResult<()> {
        tx.execute(
            r#"
            INSERT INTO calculation_history (
              history_id, saved_at, summary, section_count, total_cost, batch_json
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
            params![
                record.history_id,
                record.saved_at,
                record.summary,
                record.section_count as i64,
                record.total_cost,
                batch_json,
            ],
        )?;
        Ok(())
    }

    /// Appends a record without touching the session draft
    pub fn insert(&self, record: &HistoryRecord) -> RepositoryResult<()> {
        let batch_json = Self::encode_batch(record)?;
        let mut conn = self.get_conn()?;
        let tx = conn.transaction()?;
        Self::insert_in_tx(&tx, record, &batch_json)?;
        tx.commit()?;
        Ok(())
    }

    /// Appends the record and clears the session draft atomically.
    /// Returns the number of draft sections removed.
    pub fn append_and_clear_session(&self, record: &HistoryRecord) -> RepositoryResult<usize> {
        let batch_json = Self::encode_batch(record)?;
        let mut conn = self.get_conn()?;
        let tx = conn.transaction()?;
        Self::insert_in_tx(&tx, record, &batch_json)?;
        let cleared = tx.execute("DELETE FROM session_section", [])?;
        tx.commit()?;

        tracing::info!(
            history_id = %record.history_id,
            sections = record.section_count,
            cleared,
            "batch saved to history"
        );
        Ok(cleared)
    }

    /// Newest first
    pub fn list(&self) -> RepositoryResult<Vec<HistoryEntry>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT history_id, saved_at, summary, section_count, total_cost
            FROM calculation_history
            ORDER BY saved_at DESC, rowid DESC
            "#,
        )?;
        let entries = stmt
            .query_map([], map_entry)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(entries)
    }

    pub fn find_by_id(&self, history_id: &str) -> RepositoryResult<Option<HistoryRecord>> {
        let conn = self.get_conn()?;
        let row: Option<(HistoryEntry, String)> = conn
            .query_row(
                r#"
                SELECT history_id, saved_at, summary, section_count, total_cost, batch_json
                FROM calculation_history
                WHERE history_id = ?1
                "#,
                [history_id],
                |row| Ok((map_entry(row)?, row.get::<_, String>(5)?)),
            )
            .optional()?;

        match row {
            None => Ok(None),
            Some((entry, batch_json)) => Ok(Some(HistoryRecord {
                history_id: entry.history_id,
                saved_at: entry.saved_at,
                summary: entry.summary,
                section_count: entry.section_count,
                total_cost: entry.total_cost,
                batch: serde_json::from_str(&batch_json)?,
            })),
        }
    }

    pub fn delete(&self, history_id: &str) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let deleted = conn.execute(
            "DELETE FROM calculation_history WHERE history_id = ?1",
            [history_id],
        )?;
        if deleted == 0 {
            return Err(RepositoryError::NotFound {
                entity: "HistoryRecord".to_string(),
                id: history_id.to_string(),
            });
        }
        Ok(())
    }

    pub fn count(&self) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let n: i64 =
            conn.query_row("SELECT COUNT(*) FROM calculation_history", [], |row| row.get(0))?;
        Ok(n as usize)
    }
}

fn map_entry(row: &Row<'_>) -> rusqlite::Result<HistoryEntry> {
    Ok(HistoryEntry {
        history_id: row.get(0)?,
        saved_at: row.get::<_, NaiveDateTime>(1)?,
        summary: row.get(2)?,
        section_count: row.get::<_, i64>(3)? as usize,
        total_cost: row.get(4)?,
    })
}

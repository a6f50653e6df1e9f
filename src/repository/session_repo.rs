// ==========================================
// Road appraisal - session draft repository
// ==========================================
// The operator's working list of road sections, kept in
// session_section so a restart rehydrates the session.
// Order is the `position` column.
// ==========================================

use crate::domain::road_section::RoadSection;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::{Arc, Mutex};

pub struct SessionRepository {
    conn: Arc<Mutex<Connection>>,
}

impl SessionRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// Sections in draft order
    pub fn load_sections(&self) -> RepositoryResult<Vec<RoadSection>> {
        let conn = self.get_conn()?;
        let mut stmt =
            conn.prepare("SELECT payload_json FROM session_section ORDER BY position ASC")?;
        let payloads = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;

        payloads
            .iter()
            .map(|p| serde_json::from_str(p).map_err(RepositoryError::from))
            .collect()
    }

    /// Replaces the whole draft in one transaction
    pub fn replace_sections(&self, sections: &[RoadSection]) -> RepositoryResult<()> {
        let mut conn = self.get_conn()?;
        let tx = conn.transaction()?;
        tx.execute("DELETE FROM session_section", [])?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO session_section (position, section_id, payload_json, updated_at)
                 VALUES (?1, ?2, ?3, ?4)",
            )?;
            let now = chrono::Local::now().naive_local();
            for (position, section) in sections.iter().enumerate() {
                stmt.execute(params![
                    position as i64,
                    section.id,
                    serde_json::to_string(section)?,
                    now
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    /// Updates a section in place, or appends it at the end of the draft
    pub fn upsert_section(&self, section: &RoadSection) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let payload = serde_json::to_string(section)?;
        let now = chrono::Local::now().naive_local();

        let updated = conn.execute(
            "UPDATE session_section SET payload_json = ?2, updated_at = ?3 WHERE section_id = ?1",
            params![section.id, payload, now],
        )?;
        if updated == 0 {
            conn.execute(
                "INSERT INTO session_section (position, section_id, payload_json, updated_at)
                 VALUES ((SELECT COALESCE(MAX(position), -1) + 1 FROM session_section), ?1, ?2, ?3)",
                params![section.id, payload, now],
            )?;
        }
        Ok(())
    }

    pub fn find_section(&self, section_id: &str) -> RepositoryResult<Option<RoadSection>> {
        let conn = self.get_conn()?;
        let payload: Option<String> = conn
            .query_row(
                "SELECT payload_json FROM session_section WHERE section_id = ?1",
                [section_id],
                |row| row.get(0),
            )
            .optional()?;
        payload
            .map(|p| serde_json::from_str(&p).map_err(RepositoryError::from))
            .transpose()
    }

    pub fn remove_section(&self, section_id: &str) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let deleted = conn.execute(
            "DELETE FROM session_section WHERE section_id = ?1",
            [section_id],
        )?;
        if deleted == 0 {
            return Err(RepositoryError::NotFound {
                entity: "RoadSection".to_string(),
                id: section_id.to_string(),
            });
        }
        Ok(())
    }

    /// Returns the number of removed sections
    pub fn clear(&self) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        Ok(conn.execute("DELETE FROM session_section", [])?)
    }

    pub fn count(&self) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let n: i64 = conn.query_row("SELECT COUNT(*) FROM session_section", [], |row| row.get(0))?;
        Ok(n as usize)
    }
}

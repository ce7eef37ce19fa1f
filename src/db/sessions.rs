use super::store::Store;
use crate::libs::error::CoreError;
use crate::libs::session::SessionRecord;
use rusqlite::{params, Row, Transaction};

const SELECT_SESSIONS: &str =
    "SELECT id, completed_at, duration, task_id FROM sessions ORDER BY completed_at DESC, rowid DESC";
const INSERT_SESSION: &str = "INSERT INTO sessions (id, completed_at, duration, task_id) VALUES (?1, ?2, ?3, ?4)";

impl Store {
    /// Appends one session record. An id collision is a contract violation
    /// and surfaces as `DuplicateKey`.
    pub fn append_session(&mut self, session: &SessionRecord) -> Result<(), CoreError> {
        let result = self.conn()?.execute(
            INSERT_SESSION,
            params![session.id, session.completed_at, session.duration_seconds, session.task_id],
        );
        match result {
            Ok(_) => Ok(()),
            Err(e) if is_constraint_violation(&e) => Err(CoreError::DuplicateKey(session.id.clone())),
            Err(e) => Err(e.into()),
        }
    }

    /// Returns all session records, newest first.
    pub fn get_session_history(&self) -> Result<Vec<SessionRecord>, CoreError> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(SELECT_SESSIONS)?;
        let sessions = stmt.query_map([], session_from_row)?.collect::<Result<Vec<_>, _>>()?;
        Ok(sessions)
    }
}

pub(crate) fn write_sessions(tx: &Transaction, sessions: &[SessionRecord]) -> Result<(), CoreError> {
    tx.execute("DELETE FROM sessions", [])?;
    for session in sessions {
        tx.execute(
            INSERT_SESSION,
            params![session.id, session.completed_at, session.duration_seconds, session.task_id],
        )?;
    }
    Ok(())
}

fn is_constraint_violation(e: &rusqlite::Error) -> bool {
    matches!(
        e,
        rusqlite::Error::SqliteFailure(err, _) if err.code == rusqlite::ErrorCode::ConstraintViolation
    )
}

fn session_from_row(row: &Row) -> rusqlite::Result<SessionRecord> {
    Ok(SessionRecord {
        id: row.get(0)?,
        completed_at: row.get(1)?,
        duration_seconds: row.get(2)?,
        task_id: row.get(3)?,
    })
}

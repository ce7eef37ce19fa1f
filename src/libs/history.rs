//! Session history repository: an append-and-read log of completed focus
//! intervals, newest first. Records are created only by the timer engine's
//! completion callback and are immutable afterwards; the only deletion
//! path is a full store wipe.

use crate::db::store::Store;
use crate::libs::error::CoreError;
use crate::libs::messages::Message;
use crate::libs::session::SessionRecord;
use crate::msg_warning;
use std::cell::RefCell;
use std::rc::Rc;

pub struct SessionHistory {
    store: Rc<RefCell<Store>>,
    sessions: Vec<SessionRecord>,
}

impl SessionHistory {
    pub fn load(store: Rc<RefCell<Store>>) -> Result<Self, CoreError> {
        let sessions = store.borrow().get_session_history()?;
        Ok(SessionHistory { store, sessions })
    }

    /// Stamps and appends one record. A duplicate id is a broken id
    /// contract and surfaces; other storage failures are logged and the
    /// in-memory record kept.
    pub fn add_session(&mut self, duration_seconds: u32, task_id: Option<String>) -> Result<&SessionRecord, CoreError> {
        let record = SessionRecord::new(duration_seconds, task_id);
        match self.store.borrow_mut().append_session(&record) {
            Ok(()) => {}
            Err(e @ CoreError::DuplicateKey(_)) => return Err(e),
            Err(e) => {
                msg_warning!(Message::SessionSaveFailed(e.to_string()));
            }
        }
        self.sessions.insert(0, record);
        Ok(&self.sessions[0])
    }

    pub fn history(&self) -> &[SessionRecord] {
        &self.sessions
    }
}

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One completed focus interval. Records are immutable once created; the
/// history is append-only and only ever emptied by a full store wipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    pub id: String,
    pub completed_at: i64,
    // Legacy records stored this field as `duration`.
    #[serde(alias = "duration")]
    pub duration_seconds: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,
}

impl SessionRecord {
    pub fn new(duration_seconds: u32, task_id: Option<String>) -> Self {
        SessionRecord {
            id: Uuid::new_v4().to_string(),
            completed_at: Utc::now().timestamp_millis(),
            duration_seconds,
            task_id,
        }
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Append-only record of a mutation performed through the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityLog {
    pub id: Uuid,
    pub user_id: String,
    pub action: String,
    pub target_table: String,
    pub target_id: Option<String>,
    pub detail: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

impl ActivityLog {
    /// Builds a log row for the given actor and mutation.
    pub fn record(
        user_id: &str,
        action: &str,
        target_table: &str,
        target_id: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: user_id.to_string(),
            action: action.to_string(),
            target_table: target_table.to_string(),
            target_id: Some(target_id.into()),
            detail: None,
            created_at: Utc::now(),
        }
    }
}

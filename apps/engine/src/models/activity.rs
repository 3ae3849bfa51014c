use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

pub const RESUME_SCORED: &str = "RESUME_SCORED";

/// Audit entry written after each scoring transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub user_id: Option<Uuid>,
    pub action: String,
    pub metadata: Value,
    pub created_at: DateTime<Utc>,
}

impl ActivityEntry {
    pub fn new(user_id: Option<Uuid>, action: &str, metadata: Value) -> Self {
        Self {
            user_id,
            action: action.to_string(),
            metadata,
            created_at: Utc::now(),
        }
    }
}

//! Storage collaborator seams.
//!
//! The engine never owns persistence; it hands finished values to these traits
//! and lets the implementation assign durable identity.

use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

use crate::models::activity::ActivityEntry;
use crate::models::score::{NewScore, ScoreRecord, SuggestionRecord};
use crate::suggestions::models::SuggestionItem;

pub mod memory;

pub use memory::InMemoryStore;

#[async_trait]
pub trait ScoreStore: Send + Sync {
    async fn insert_score(&self, score: NewScore) -> Result<ScoreRecord>;

    /// Persists `items` in order; `position` follows slice order.
    async fn insert_suggestions(
        &self,
        score_id: Uuid,
        items: &[SuggestionItem],
    ) -> Result<Vec<SuggestionRecord>>;
}

#[async_trait]
pub trait ActivityLog: Send + Sync {
    async fn record(&self, entry: ActivityEntry) -> Result<()>;
}

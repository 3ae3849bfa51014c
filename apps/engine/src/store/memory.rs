use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::activity::ActivityEntry;
use crate::models::score::{NewScore, ScoreRecord, SuggestionRecord};
use crate::store::{ActivityLog, ScoreStore};
use crate::suggestions::models::SuggestionItem;

#[derive(Default)]
struct Tables {
    scores: Vec<ScoreRecord>,
    suggestions: Vec<SuggestionRecord>,
    activities: Vec<ActivityEntry>,
}

/// Process-local store for the CLI and tests. Cloning shares the tables.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn scores(&self) -> Vec<ScoreRecord> {
        self.tables.read().await.scores.clone()
    }

    /// Suggestions for a score, ordered by position.
    pub async fn suggestions_for(&self, score_id: Uuid) -> Vec<SuggestionRecord> {
        let mut found: Vec<SuggestionRecord> = self
            .tables
            .read()
            .await
            .suggestions
            .iter()
            .filter(|s| s.score_id == score_id)
            .cloned()
            .collect();
        found.sort_by_key(|s| s.position);
        found
    }

    pub async fn activities(&self) -> Vec<ActivityEntry> {
        self.tables.read().await.activities.clone()
    }

    pub async fn latest_score_for_resume(&self, resume_id: Uuid) -> Option<ScoreRecord> {
        self.tables
            .read()
            .await
            .scores
            .iter()
            .filter(|s| s.resume_id == resume_id)
            .max_by_key(|s| s.created_at)
            .cloned()
    }
}

#[async_trait]
impl ScoreStore for InMemoryStore {
    async fn insert_score(&self, score: NewScore) -> Result<ScoreRecord> {
        let record = ScoreRecord {
            id: Uuid::new_v4(),
            resume_id: score.resume_id,
            overall_score: score.overall_score,
            skills_score: score.skills_score,
            experience_score: score.experience_score,
            keywords_score: score.keywords_score,
            formatting_score: score.formatting_score,
            engine_label: score.engine_label,
            engine_version: score.engine_version,
            details: score.details,
            created_at: Utc::now(),
        };
        self.tables.write().await.scores.push(record.clone());
        Ok(record)
    }

    async fn insert_suggestions(
        &self,
        score_id: Uuid,
        items: &[SuggestionItem],
    ) -> Result<Vec<SuggestionRecord>> {
        let mut tables = self.tables.write().await;
        if !tables.scores.iter().any(|s| s.id == score_id) {
            anyhow::bail!("Score {score_id} not found");
        }

        let now = Utc::now();
        let records: Vec<SuggestionRecord> = items
            .iter()
            .enumerate()
            .map(|(position, item)| SuggestionRecord {
                id: Uuid::new_v4(),
                score_id,
                position: position as u32,
                item: item.clone(),
                created_at: now,
            })
            .collect();
        tables.suggestions.extend(records.iter().cloned());
        Ok(records)
    }
}

#[async_trait]
impl ActivityLog for InMemoryStore {
    async fn record(&self, entry: ActivityEntry) -> Result<()> {
        self.tables.write().await.activities.push(entry);
        Ok(())
    }
}

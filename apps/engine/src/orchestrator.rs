//! Scoring orchestrator: one scoring transaction per (resume, job info) pair.
//!
//! Flow: validate text → AI score (else fallback) → persist score →
//!       suggestions (fed the sub-scores) → persist suggestions → activity entry.
//!
//! Only a blank resume or a failure to persist the score reaches the caller.
//! Suggestions and the activity entry are best-effort.

use std::sync::Arc;

use anyhow::Result;
use serde::Serialize;
use serde_json::json;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::{Config, FallbackMode};
use crate::errors::EngineError;
use crate::llm_client::{AiOutcome, GeminiClient, GenerativeModel};
use crate::models::activity::{ActivityEntry, RESUME_SCORED};
use crate::models::score::{NewScore, ScoreRecord, SuggestionRecord};
use crate::scoring::models::{EngineLabel, ScoreResult};
use crate::scoring::{AiScoringClient, HeuristicScorer};
use crate::store::{ActivityLog, ScoreStore};
use crate::suggestions::{AiSuggestionClient, ScoreContext, SuggestionItem};

#[derive(Debug, Clone)]
pub struct ScoreRequest {
    pub resume_id: Uuid,
    /// Owner of the resume, for the activity entry. `None` for guests.
    pub user_id: Option<Uuid>,
    pub resume_text: String,
    pub job_info: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScoringOutcome {
    pub score: ScoreRecord,
    pub result: ScoreResult,
    pub suggestions: Vec<SuggestionRecord>,
    pub used_ai: bool,
}

pub struct ScoringOrchestrator {
    scoring: AiScoringClient,
    heuristic: HeuristicScorer,
    suggestions: AiSuggestionClient,
    store: Arc<dyn ScoreStore>,
    activity: Arc<dyn ActivityLog>,
    fallback_mode: FallbackMode,
}

impl ScoringOrchestrator {
    /// Wires both AI clients to one shared HTTP transport.
    pub fn new(
        config: &Config,
        store: Arc<dyn ScoreStore>,
        activity: Arc<dyn ActivityLog>,
    ) -> Result<Self> {
        let model: Arc<dyn GenerativeModel> = Arc::new(GeminiClient::new(&config.ai)?);
        Ok(Self::with_clients(
            AiScoringClient::with_model(config.ai.clone(), model.clone()),
            AiSuggestionClient::with_model(config.ai.clone(), model),
            store,
            activity,
            config.fallback_mode,
        ))
    }

    pub fn with_clients(
        scoring: AiScoringClient,
        suggestions: AiSuggestionClient,
        store: Arc<dyn ScoreStore>,
        activity: Arc<dyn ActivityLog>,
        fallback_mode: FallbackMode,
    ) -> Self {
        Self {
            scoring,
            heuristic: HeuristicScorer,
            suggestions,
            store,
            activity,
            fallback_mode,
        }
    }

    /// Scores text without persisting anything.
    pub async fn score_text(
        &self,
        resume_text: &str,
        job_info: Option<&str>,
    ) -> Result<ScoreResult, EngineError> {
        if resume_text.trim().is_empty() {
            return Err(EngineError::NoExtractedText);
        }

        match self.scoring.score(resume_text, job_info).await {
            AiOutcome::Available(result) => Ok(result),
            AiOutcome::Unavailable(reason) => {
                info!(
                    "AI scoring unavailable ({reason}); fallback mode {:?}",
                    self.fallback_mode
                );
                Ok(match self.fallback_mode {
                    FallbackMode::Heuristic => self.heuristic.score(resume_text, job_info),
                    FallbackMode::ZeroScore => ScoreResult::unavailable(),
                })
            }
        }
    }

    pub async fn generate_suggestions(
        &self,
        resume_text: &str,
        job_info: Option<&str>,
        context: &ScoreContext,
    ) -> Vec<SuggestionItem> {
        self.suggestions
            .generate_suggestions(resume_text, job_info, context)
            .await
    }

    /// Full transaction: score, persist, suggest, persist, audit.
    pub async fn score_resume(&self, request: ScoreRequest) -> Result<ScoringOutcome, EngineError> {
        let job_info = request.job_info.as_deref();
        let result = self.score_text(&request.resume_text, job_info).await?;
        let used_ai = result.engine == EngineLabel::Ai;

        let score = self
            .store
            .insert_score(NewScore::from_result(request.resume_id, &result))
            .await
            .map_err(EngineError::Storage)?;
        info!(
            "Scored resume {}: overall={:.1} engine={}",
            request.resume_id,
            score.overall_score,
            score.engine_version
        );

        let suggestions = self
            .suggest_and_persist(&score, &result, &request.resume_text, job_info)
            .await;

        let metadata = json!({
            "resumeId": request.resume_id,
            "scoreId": score.id,
            "overallScore": score.overall_score,
            "skillsScore": score.skills_score,
            "engineVersion": score.engine_version,
            "usedAI": used_ai,
            "jobInfoLength": job_info.map_or(0, |j| j.chars().count()),
            "suggestionCount": suggestions.len(),
        });
        if let Err(e) = self
            .activity
            .record(ActivityEntry::new(request.user_id, RESUME_SCORED, metadata))
            .await
        {
            warn!("Failed to record scoring activity for score {}: {e:#}", score.id);
        }

        Ok(ScoringOutcome {
            score,
            result,
            suggestions,
            used_ai,
        })
    }

    /// Never fails: a score with zero suggestions is a valid end state.
    async fn suggest_and_persist(
        &self,
        score: &ScoreRecord,
        result: &ScoreResult,
        resume_text: &str,
        job_info: Option<&str>,
    ) -> Vec<SuggestionRecord> {
        let context = ScoreContext::from_result(result);
        let mut items = self
            .generate_suggestions(resume_text, job_info, &context)
            .await;
        if items.is_empty() {
            return Vec::new();
        }

        // Stable: the model's order is kept within a priority band.
        items.sort_by_key(|item| item.priority);

        match self.store.insert_suggestions(score.id, &items).await {
            Ok(records) => {
                info!("Persisted {} suggestions for score {}", records.len(), score.id);
                records
            }
            Err(e) => {
                warn!("Failed to persist suggestions for score {}: {e:#}", score.id);
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AiConfig;
    use crate::llm_client::testing::{active_config, ScriptedModel};
    use crate::llm_client::LlmError;
    use crate::store::InMemoryStore;
    use crate::suggestions::{Priority, SuggestionCategory};
    use async_trait::async_trait;

    const RESUME: &str = "Senior engineer with 6 years experience. Skills: Python, AWS, Docker.";
    const JOB: &str = "Looking for Python AWS engineer";

    fn orchestrator(
        config: AiConfig,
        model: Arc<ScriptedModel>,
        store: InMemoryStore,
        mode: FallbackMode,
    ) -> ScoringOrchestrator {
        ScoringOrchestrator::with_clients(
            AiScoringClient::with_model(config.clone(), model.clone()),
            AiSuggestionClient::with_model(config, model),
            Arc::new(store.clone()),
            Arc::new(store),
            mode,
        )
    }

    fn request(text: &str, job: Option<&str>) -> ScoreRequest {
        ScoreRequest {
            resume_id: Uuid::new_v4(),
            user_id: Some(Uuid::new_v4()),
            resume_text: text.to_string(),
            job_info: job.map(str::to_owned),
        }
    }

    struct FailingStore;

    #[async_trait]
    impl ScoreStore for FailingStore {
        async fn insert_score(&self, _score: NewScore) -> Result<ScoreRecord> {
            anyhow::bail!("database unavailable")
        }

        async fn insert_suggestions(
            &self,
            _score_id: Uuid,
            _items: &[SuggestionItem],
        ) -> Result<Vec<SuggestionRecord>> {
            anyhow::bail!("database unavailable")
        }
    }

    #[async_trait]
    impl ActivityLog for FailingStore {
        async fn record(&self, _entry: ActivityEntry) -> Result<()> {
            anyhow::bail!("audit log unavailable")
        }
    }

    /// Persists scores but refuses suggestions.
    struct ScoreOnlyStore(InMemoryStore);

    #[async_trait]
    impl ScoreStore for ScoreOnlyStore {
        async fn insert_score(&self, score: NewScore) -> Result<ScoreRecord> {
            self.0.insert_score(score).await
        }

        async fn insert_suggestions(
            &self,
            _score_id: Uuid,
            _items: &[SuggestionItem],
        ) -> Result<Vec<SuggestionRecord>> {
            anyhow::bail!("suggestions table locked")
        }
    }

    #[tokio::test]
    async fn test_heuristic_path_end_to_end() {
        let model = Arc::new(ScriptedModel::new(vec![]));
        let store = InMemoryStore::new();
        let engine = orchestrator(
            AiConfig::disabled(),
            model.clone(),
            store.clone(),
            FallbackMode::Heuristic,
        );

        let outcome = engine.score_resume(request(RESUME, Some(JOB))).await.unwrap();

        assert_eq!(model.calls(), 0);
        assert!(!outcome.used_ai);
        assert_eq!(outcome.result.engine, EngineLabel::Heuristic);
        assert_eq!(outcome.score.engine_version, "v1.0-basic");
        // python, aws, engineer of five job tokens: 40 + 0.6*60
        assert!((outcome.result.skills - 76.0).abs() < 1e-9, "skills was {}", outcome.result.skills);
        // min(100, 30 + 6*7) + 5 for "senior"
        assert_eq!(outcome.result.experience, 77.0);
        let expected = 0.35 * outcome.result.skills
            + 0.30 * outcome.result.experience
            + 0.20 * outcome.result.keywords
            + 0.15 * outcome.result.formatting;
        assert!((outcome.result.overall - expected).abs() < 1e-9);
        assert!((outcome.result.overall - 72.1).abs() < 1e-9);
        assert!(outcome.suggestions.is_empty());

        assert_eq!(store.scores().await.len(), 1);
        let activities = store.activities().await;
        assert_eq!(activities.len(), 1);
        assert_eq!(activities[0].action, RESUME_SCORED);
        assert_eq!(activities[0].metadata["usedAI"], false);
        assert_eq!(activities[0].metadata["engineVersion"], "v1.0-basic");
        assert_eq!(activities[0].metadata["jobInfoLength"], JOB.len());
    }

    #[tokio::test]
    async fn test_ai_path_persists_sorted_suggestions() {
        let model = Arc::new(ScriptedModel::new(vec![
            Ok(r#"{"overall": 81, "skills": 85, "experience": 78, "keywords": 80, "formatting": 79, "details": {"inferredRole": "Backend Engineer"}}"#.to_string()),
            Ok(r#"{"suggestions": [
                {"category": "format", "message": "Use consistent dates", "priority": "low"},
                {"category": "keywords", "message": "Mention Terraform", "priority": "high"},
                {"category": "career_growth", "message": "Get certified", "priority": "medium",
                 "recommendationType": "certificate", "programName": "AWS Solutions Architect Associate",
                 "programUrl": "https://aws.amazon.com/certification/", "duration": "2-3 months", "costRange": "$150"}
            ]}"#.to_string()),
        ]));
        let store = InMemoryStore::new();
        let engine = orchestrator(active_config(), model.clone(), store.clone(), FallbackMode::Heuristic);

        let outcome = engine.score_resume(request(RESUME, Some(JOB))).await.unwrap();

        assert!(outcome.used_ai);
        assert_eq!(outcome.result.overall, 81.0);
        assert_eq!(outcome.score.engine_version, "v2.0-ai");
        assert!(outcome.score.details.contains("Backend Engineer"));

        let priorities: Vec<Priority> = outcome.suggestions.iter().map(|s| s.item.priority).collect();
        assert_eq!(priorities, vec![Priority::High, Priority::Medium, Priority::Low]);
        assert_eq!(outcome.suggestions[1].item.category, SuggestionCategory::CareerGrowth);
        assert_eq!(outcome.suggestions[1].position, 1);
        assert_eq!(store.suggestions_for(outcome.score.id).await.len(), 3);

        // The suggestion prompt saw the AI details and the sub-scores.
        let prompts = model.prompts();
        assert_eq!(prompts.len(), 2);
        assert!(prompts[1].0.contains("Backend Engineer"));
        assert!(prompts[1].0.contains("\"skillsScore\":85.0"));
    }

    #[tokio::test]
    async fn test_ai_failure_falls_back_to_heuristic() {
        let model = Arc::new(ScriptedModel::new(vec![
            Err(LlmError::Timeout(crate::llm_client::REQUEST_TIMEOUT)),
            Ok("not json at all".to_string()),
        ]));
        let store = InMemoryStore::new();
        let engine = orchestrator(active_config(), model.clone(), store, FallbackMode::Heuristic);

        let outcome = engine.score_resume(request(RESUME, Some(JOB))).await.unwrap();
        assert_eq!(outcome.result.engine, EngineLabel::Heuristic);
        assert!(!outcome.used_ai);
        assert!(outcome.suggestions.is_empty());
        assert_eq!(model.calls(), 2);
    }

    #[tokio::test]
    async fn test_zero_score_mode() {
        let model = Arc::new(ScriptedModel::new(vec![]));
        let engine = orchestrator(
            AiConfig::disabled(),
            model,
            InMemoryStore::new(),
            FallbackMode::ZeroScore,
        );
        let result = engine.score_text(RESUME, None).await.unwrap();
        assert_eq!(result.overall, 0.0);
        assert_eq!(result.engine, EngineLabel::Unavailable);
        assert_eq!(result.details["notes"], "AI unavailable");
    }

    #[tokio::test]
    async fn test_blank_resume_rejected_and_nothing_persisted() {
        let model = Arc::new(ScriptedModel::new(vec![]));
        let store = InMemoryStore::new();
        let engine = orchestrator(active_config(), model.clone(), store.clone(), FallbackMode::Heuristic);

        let err = engine.score_resume(request("   \n\t", Some(JOB))).await.unwrap_err();
        assert!(matches!(err, EngineError::NoExtractedText));
        assert_eq!(model.calls(), 0);
        assert!(store.scores().await.is_empty());
        assert!(store.activities().await.is_empty());
    }

    #[tokio::test]
    async fn test_score_storage_failure_surfaces() {
        let model = Arc::new(ScriptedModel::new(vec![]));
        let engine = ScoringOrchestrator::with_clients(
            AiScoringClient::with_model(AiConfig::disabled(), model.clone()),
            AiSuggestionClient::with_model(AiConfig::disabled(), model),
            Arc::new(FailingStore),
            Arc::new(FailingStore),
            FallbackMode::Heuristic,
        );
        let err = engine.score_resume(request(RESUME, None)).await.unwrap_err();
        assert!(matches!(err, EngineError::Storage(_)));
    }

    #[tokio::test]
    async fn test_suggestion_and_activity_failures_keep_score() {
        let model = Arc::new(ScriptedModel::new(vec![
            Ok(r#"{"overall": 70, "skills": 70, "experience": 70, "keywords": 70, "formatting": 70, "details": {}}"#.to_string()),
            Ok(r#"{"suggestions": [{"category": "skills", "message": "Add Go"}]}"#.to_string()),
        ]));
        let inner = InMemoryStore::new();
        let engine = ScoringOrchestrator::with_clients(
            AiScoringClient::with_model(active_config(), model.clone()),
            AiSuggestionClient::with_model(active_config(), model),
            Arc::new(ScoreOnlyStore(inner.clone())),
            Arc::new(FailingStore),
            FallbackMode::Heuristic,
        );

        let outcome = engine.score_resume(request(RESUME, Some(JOB))).await.unwrap();
        assert_eq!(outcome.score.overall_score, 70.0);
        assert!(outcome.suggestions.is_empty());
        assert_eq!(inner.scores().await.len(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_invocations_are_independent() {
        let model = Arc::new(ScriptedModel::new(vec![]));
        let store = InMemoryStore::new();
        let engine = Arc::new(orchestrator(
            AiConfig::disabled(),
            model,
            store.clone(),
            FallbackMode::Heuristic,
        ));

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let engine = engine.clone();
                tokio::spawn(async move {
                    let text = format!("Engineer with {i} years experience");
                    engine.score_resume(request(&text, None)).await
                })
            })
            .collect();

        for handle in handles {
            let outcome = handle.await.unwrap().unwrap();
            assert!((0.0..=100.0).contains(&outcome.result.overall));
        }
        assert_eq!(store.scores().await.len(), 8);
        assert_eq!(store.activities().await.len(), 8);
    }
}

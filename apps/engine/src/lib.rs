pub mod config;
pub mod errors;
pub mod extract;
pub mod llm_client;
pub mod models;
pub mod orchestrator;
pub mod scoring;
pub mod store;
pub mod suggestions;

pub use config::{AiConfig, Config, FallbackMode};
pub use errors::EngineError;
pub use orchestrator::{ScoreRequest, ScoringOrchestrator, ScoringOutcome};
pub use scoring::{EngineLabel, ScoreResult};
pub use suggestions::SuggestionItem;

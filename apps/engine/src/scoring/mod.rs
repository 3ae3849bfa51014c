// Scoring: AI-assisted scorer, deterministic heuristic fallback, and the
// shared weighting/bounding rules both of them obey.

pub mod ai;
pub mod heuristic;
pub mod models;
pub mod prompts;
pub mod weights;

pub use ai::AiScoringClient;
pub use heuristic::HeuristicScorer;
pub use models::{EngineLabel, ScoreResult};

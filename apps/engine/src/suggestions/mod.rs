// Suggestions: AI-generated improvement advice, conditioned on the computed scores.

pub mod client;
pub mod models;
pub mod prompts;

pub use client::AiSuggestionClient;
pub use models::{Priority, ScoreContext, SuggestionCategory, SuggestionItem};

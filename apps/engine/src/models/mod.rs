pub mod activity;
pub mod score;

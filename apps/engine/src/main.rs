use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use uuid::Uuid;

use skillup_engine::extract::extract_text;
use skillup_engine::store::InMemoryStore;
use skillup_engine::{Config, ScoreRequest, ScoringOrchestrator};

/// Score a resume, optionally against a job description, and print the outcome as JSON.
#[derive(Parser, Debug)]
#[command(name = "skillup-score", version)]
struct Cli {
    /// Resume file (.pdf, or anything else read as text)
    #[arg(long)]
    resume: PathBuf,

    /// Job description file
    #[arg(long, conflicts_with = "job_text")]
    job: Option<PathBuf>,

    /// Job description given inline
    #[arg(long)]
    job_text: Option<String>,

    #[arg(long)]
    resume_id: Option<Uuid>,

    #[arg(long)]
    user_id: Option<Uuid>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "skillup_engine={0},skillup_score={0}",
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!(
        "skillup-score v{} (AI scoring {}, fallback {:?})",
        env!("CARGO_PKG_VERSION"),
        if config.ai.is_active() { "on" } else { "off" },
        config.fallback_mode
    );

    let resume_text = extract_text(&cli.resume).await?;
    let job_info = match (cli.job, cli.job_text) {
        (Some(path), _) => Some(
            tokio::fs::read_to_string(&path)
                .await
                .with_context(|| format!("Failed to read job description {}", path.display()))?,
        ),
        (None, text) => text,
    };

    let store = InMemoryStore::new();
    let orchestrator =
        ScoringOrchestrator::new(&config, Arc::new(store.clone()), Arc::new(store))?;

    let outcome = orchestrator
        .score_resume(ScoreRequest {
            resume_id: cli.resume_id.unwrap_or_else(Uuid::new_v4),
            user_id: cli.user_id,
            resume_text,
            job_info,
        })
        .await
        .with_context(|| format!("Scoring {} failed", cli.resume.display()))?;

    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(())
}

mod config;
mod errors;
mod llm_client;
mod screening;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::screening::{load_system_prompt, run_batch};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting resume screener v{}", env!("CARGO_PKG_VERSION"));

    // Assemble the system prompt from the operator-owned files
    let system_prompt =
        load_system_prompt(&config.prompt_template_path, &config.requirements_path)?;
    info!(
        "System prompt assembled from {} ({} chars)",
        config.prompt_template_path.display(),
        system_prompt.len()
    );

    // Initialize LLM client
    let llm = LlmClient::new(config.openai_api_key.clone());
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    let summary = run_batch(&config, &llm, &system_prompt).await?;

    info!(
        "Screening complete: {} passed, {} failed ({} malformed replies), {} skipped",
        summary.passed, summary.failed, summary.malformed_replies, summary.skipped
    );

    Ok(())
}

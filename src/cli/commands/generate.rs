//! Generate command handler

use crate::config::Config;
use crate::services::GenerationRequest;
use crate::state::SharedState;

pub async fn cmd_generate(config: Config, idea: &str) -> anyhow::Result<()> {
    if !config.llm_configured() {
        eprintln!("No OpenAI API key configured, printing fallback copy.");
    }

    let state = SharedState::new(config)?;
    let outcome = state
        .landing_pages
        .generate(GenerationRequest {
            idea: idea.to_string(),
            source: Some("cli".to_string()),
            startup_id: None,
        })
        .await;

    println!("{}", serde_json::to_string_pretty(&outcome.content)?);

    if outcome.stored {
        eprintln!("Saved as landing page {}", outcome.startup_id);
    }

    Ok(())
}

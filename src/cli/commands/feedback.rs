//! List feedback command handler

use crate::config::Config;
use crate::state::SharedState;

pub async fn cmd_feedback(config: Config, startup_id: Option<&str>) -> anyhow::Result<()> {
    let state = SharedState::new(config)?;
    let feedback = state.feedback.list(startup_id).await;

    if feedback.is_empty() {
        println!("No feedback recorded.");
        return Ok(());
    }

    println!("Feedback ({} total)", feedback.len());
    println!("{:-<70}", "");

    for entry in feedback {
        let stars = "★".repeat(usize::from(entry.rating));
        println!("{stars:<5} {} [{}]", entry.feedback, entry.source);
        println!("  Page: {} | {}", entry.startup_id, entry.created_at);
    }

    Ok(())
}

//! List landing pages command handler

use crate::config::Config;
use crate::state::SharedState;

pub async fn cmd_pages(config: Config) -> anyhow::Result<()> {
    let state = SharedState::new(config)?;
    let pages = state.landing_pages.list().await;

    if pages.is_empty() {
        println!("No landing pages yet.");
        println!();
        println!("Create one with: marketpulse generate \"your idea\"");
        return Ok(());
    }

    println!("Landing Pages ({} total)", pages.len());
    println!("{:-<70}", "");

    for page in pages {
        println!("• {} [{}]", page.idea, page.content.industry);
        println!(
            "  ID: {} | Source: {} | Created: {}",
            page.startup_id, page.source, page.created_at
        );
        println!("  {}", page.content.headline);
    }

    Ok(())
}

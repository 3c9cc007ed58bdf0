//! List signups command handler

use crate::config::Config;
use crate::state::SharedState;

pub async fn cmd_signups(config: Config, startup_id: Option<&str>) -> anyhow::Result<()> {
    let state = SharedState::new(config)?;
    let signups = state.signups.list(startup_id).await;

    if signups.is_empty() {
        println!("No signups recorded.");
        return Ok(());
    }

    println!("Signups ({} total)", signups.len());
    println!("{:-<70}", "");

    for signup in signups {
        let intent = match (signup.would_pay, signup.price_point) {
            (true, Some(price)) => format!("would pay {price}"),
            (true, None) => "would pay".to_string(),
            (false, _) => "-".to_string(),
        };
        println!(
            "{} {} [{}] {}",
            signup.created_at, signup.email, signup.source, intent
        );
        println!("  Page: {}", signup.startup_id);
    }

    Ok(())
}

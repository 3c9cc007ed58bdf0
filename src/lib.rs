pub mod api;
pub mod cli;
pub mod clients;
pub mod config;
pub mod constants;
pub mod db;
pub mod domain;
pub mod entities;
pub mod parser;
pub mod render;
pub mod services;
pub mod state;

use anyhow::Context;
use clap::Parser;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
pub use config::Config;

pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = Config::load()?;
    config.validate()?;

    let command = cli.command.unwrap_or(Commands::Serve);
    let serving = matches!(command, Commands::Serve);

    // Only the server exports metrics
    let prometheus_handle = if serving && config.observability.metrics_enabled {
        use metrics_exporter_prometheus::PrometheusBuilder;
        let handle = PrometheusBuilder::new()
            .install_recorder()
            .context("Failed to install Prometheus recorder")?;
        Some(handle)
    } else {
        None
    };

    init_tracing(&config, serving)?;

    if prometheus_handle.is_some() {
        info!("Prometheus metrics recorder initialized");
    }

    match command {
        Commands::Serve => run_server(config, prometheus_handle).await,
        Commands::Init => cli::cmd_init(),
        Commands::Generate { idea } => cli::cmd_generate(config, &idea.join(" ")).await,
        Commands::Signups { startup_id } => cli::cmd_signups(config, startup_id.as_deref()).await,
        Commands::Feedback { startup_id } => {
            cli::cmd_feedback(config, startup_id.as_deref()).await
        }
        Commands::Pages => cli::cmd_pages(config).await,
    }
}

fn init_tracing(config: &Config, serving: bool) -> anyhow::Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    // Keep one-shot commands quiet unless asked otherwise
    let log_level = if serving {
        config.general.log_level.clone()
    } else {
        "warn".to_string()
    };

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_level));

    let registry = tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer());

    if serving && config.observability.loki_enabled {
        let url = url::Url::parse(&config.observability.loki_url).context("Invalid Loki URL")?;

        let mut builder = tracing_loki::builder();
        for (key, value) in &config.observability.loki_labels {
            builder = builder.label(key, value)?;
        }
        let (layer, task) = builder.build_url(url)?;

        tokio::spawn(task);

        registry.with(layer).init();
        info!(
            "Loki logging initialized at {}",
            config.observability.loki_url
        );
    } else {
        registry.init();
    }

    Ok(())
}

async fn run_server(
    config: Config,
    prometheus_handle: Option<metrics_exporter_prometheus::PrometheusHandle>,
) -> anyhow::Result<()> {
    info!("MarketPulse v{} starting...", env!("CARGO_PKG_VERSION"));

    if !config.llm_configured() {
        warn!("No OpenAI API key configured, landing pages will use fallback copy");
    }
    if config.store.database_url.is_none() {
        warn!("No database configured, signups and feedback will not be kept");
    }

    let port = config.server.port;
    let app_state = api::create_app_state_from_config(config, prometheus_handle)?;

    // Connect eagerly so a broken store shows up in the startup logs
    let store = app_state.shared.store().await;
    if store.is_available() {
        info!("Record store connected");
    } else {
        warn!(
            store = store.status(),
            "Record store unavailable, running without persistence"
        );
    }

    let app = api::router(app_state).await;

    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!("Web server running at http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => error!("Error listening for shutdown: {}", e),
    }
}

use std::sync::Arc;
use tokio::sync::RwLock;

use crate::clients::openai::{CompletionClient, OpenAiClient};
use crate::config::Config;
use crate::db::{StoreGateway, StoreHandle};
use crate::services::{
    AnalyticsService, ContentService, FeedbackService, LandingPageService, SignupService,
};

/// Build a shared HTTP client for the completion endpoint.
fn build_shared_http_client(timeout_seconds: u64) -> anyhow::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_seconds))
        .user_agent("MarketPulse/1.0")
        .pool_max_idle_per_host(10)
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build shared HTTP client: {e}"))
}

#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<RwLock<Config>>,

    pub gateway: Arc<StoreGateway>,

    pub landing_pages: Arc<LandingPageService>,

    pub signups: Arc<SignupService>,

    pub feedback: Arc<FeedbackService>,

    pub analytics: Arc<AnalyticsService>,
}

impl SharedState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let http_client = build_shared_http_client(config.llm.request_timeout_seconds)?;
        let client = Arc::new(OpenAiClient::with_shared_client(http_client, &config.llm));
        Ok(Self::with_completion_client(config, client))
    }

    /// Wire the services around any completion backend. The store is not
    /// touched until the first request needs it.
    #[must_use]
    pub fn with_completion_client(config: Config, client: Arc<dyn CompletionClient>) -> Self {
        let gateway = Arc::new(StoreGateway::new(config.store.clone()));
        Self::with_gateway(config, gateway, client)
    }

    fn with_gateway(
        config: Config,
        gateway: Arc<StoreGateway>,
        client: Arc<dyn CompletionClient>,
    ) -> Self {
        let content = Arc::new(ContentService::new(client));

        Self {
            config: Arc::new(RwLock::new(config)),
            landing_pages: Arc::new(LandingPageService::new(gateway.clone(), content)),
            signups: Arc::new(SignupService::new(gateway.clone())),
            feedback: Arc::new(FeedbackService::new(gateway.clone())),
            analytics: Arc::new(AnalyticsService::new(gateway.clone())),
            gateway,
        }
    }

    pub async fn store(&self) -> StoreHandle {
        self.gateway.get().await
    }
}

use std::sync::Arc;
use tracing::{info, warn};

use super::content::ContentService;
use super::non_blank;
use crate::constants::DEFAULT_SOURCE;
use crate::db::{GenerationRecord, StoreGateway, StoreHandle, timestamp_now};
use crate::domain::GeneratedContent;
use crate::domain::ids::generate_id;

#[derive(Debug, Clone, Default)]
pub struct GenerationRequest {
    pub idea: String,
    pub source: Option<String>,
    pub startup_id: Option<String>,
}

#[derive(Debug, Clone)]
pub struct GenerationOutcome {
    pub startup_id: String,
    pub source: String,
    pub content: GeneratedContent,
    /// `false` when the store was unavailable or the same generation was
    /// already recorded.
    pub stored: bool,
}

/// Generates landing pages and keeps a record of them for the listing view.
pub struct LandingPageService {
    gateway: Arc<StoreGateway>,
    content: Arc<ContentService>,
}

impl LandingPageService {
    #[must_use]
    pub const fn new(gateway: Arc<StoreGateway>, content: Arc<ContentService>) -> Self {
        Self { gateway, content }
    }

    pub async fn generate(&self, request: GenerationRequest) -> GenerationOutcome {
        let idea = request.idea.trim().to_string();
        let startup_id = non_blank(request.startup_id).unwrap_or_else(generate_id);
        let source = non_blank(request.source).unwrap_or_else(|| DEFAULT_SOURCE.to_string());

        let content = self.content.generate(&idea).await;

        let record = GenerationRecord {
            startup_id,
            idea,
            source,
            content,
            created_at: timestamp_now(),
        };

        let stored = match self.gateway.get().await {
            StoreHandle::Available(store) => match store.add_generation(&record).await {
                Ok(inserted) => {
                    if inserted {
                        info!(startup_id = %record.startup_id, "Recorded generation");
                    }
                    inserted
                }
                Err(e) => {
                    warn!(error = %e, startup_id = %record.startup_id, "Failed to record generation");
                    false
                }
            },
            StoreHandle::Unavailable(_) => false,
        };

        GenerationOutcome {
            startup_id: record.startup_id,
            source: record.source,
            content: record.content,
            stored,
        }
    }

    /// Every recorded generation, newest first. Store problems yield an empty list.
    pub async fn list(&self) -> Vec<GenerationRecord> {
        match self.gateway.get().await {
            StoreHandle::Available(store) => store.list_generations().await.unwrap_or_else(|e| {
                warn!(error = %e, "Failed to list landing pages");
                Vec::new()
            }),
            StoreHandle::Unavailable(_) => {
                warn!("Store not available, returning no landing pages");
                Vec::new()
            }
        }
    }

    pub async fn find(&self, startup_id: &str) -> Option<GenerationRecord> {
        match self.gateway.get().await {
            StoreHandle::Available(store) => store
                .latest_generation(startup_id)
                .await
                .unwrap_or_else(|e| {
                    warn!(error = %e, startup_id, "Failed to load landing page");
                    None
                }),
            StoreHandle::Unavailable(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StoreConfig;
    use crate::db::Store;
    use crate::services::content::tests::ScriptedClient;

    const REPLY: &str = r#"{"headline": "Walkies, Sorted", "industry": "Mobile Apps"}"#;

    async fn service_with_store(replies: usize) -> LandingPageService {
        let config = StoreConfig::default();
        let store = Store::connect("sqlite::memory:", &config).await.unwrap();
        let gateway = Arc::new(StoreGateway::with_store(config, store));
        let client = Arc::new(ScriptedClient::new(
            (0..replies).map(|_| Ok(REPLY.to_string())).collect(),
        ));
        LandingPageService::new(gateway, Arc::new(ContentService::new(client)))
    }

    fn request(startup_id: Option<&str>) -> GenerationRequest {
        GenerationRequest {
            idea: "  dog walking app ".to_string(),
            source: None,
            startup_id: startup_id.map(ToString::to_string),
        }
    }

    #[tokio::test]
    async fn test_generate_records_once_per_startup_idea_source() {
        let service = service_with_store(2).await;

        let first = service.generate(request(Some("s1"))).await;
        assert!(first.stored);
        assert_eq!(first.source, "direct");
        assert_eq!(first.content.headline, "Walkies, Sorted");

        let second = service.generate(request(Some("s1"))).await;
        assert!(!second.stored);
        assert_eq!(second.content.headline, "Walkies, Sorted");

        let pages = service.list().await;
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].idea, "dog walking app");

        let found = service.find("s1").await.unwrap();
        assert_eq!(found.content.industry, crate::domain::Industry::MobileApps);
        assert!(service.find("missing").await.is_none());
    }

    #[tokio::test]
    async fn test_generate_assigns_startup_id() {
        let service = service_with_store(1).await;

        let outcome = service.generate(request(None)).await;
        assert!(!outcome.startup_id.is_empty());
        assert!(service.find(&outcome.startup_id).await.is_some());
    }

    #[tokio::test]
    async fn test_generate_without_store() {
        let gateway = Arc::new(StoreGateway::new(StoreConfig {
            database_url: None,
            ..StoreConfig::default()
        }));
        let client = Arc::new(ScriptedClient::new(Vec::new()));
        let service = LandingPageService::new(gateway, Arc::new(ContentService::new(client)));

        let outcome = service.generate(request(Some("s1"))).await;
        assert!(!outcome.stored);
        assert_eq!(outcome.content.headline, "Revolutionary dog walking app");
        assert!(service.list().await.is_empty());
    }
}

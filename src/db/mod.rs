use anyhow::Result;
use sea_orm::sqlx::sqlite::SqlitePoolOptions;
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, SqlxSqliteConnector, Statement,
};
use std::path::Path;
use std::time::Duration;
use tokio::sync::OnceCell;
use tracing::{info, warn};

use crate::config::StoreConfig;

pub mod migrator;
pub mod repositories;

pub use repositories::feedback::FeedbackRecord;
pub use repositories::generations::GenerationRecord;
pub use repositories::signups::{InsertOutcome, SignupRecord};

/// Creation timestamp in the format every table stores.
///
/// Fixed-width RFC 3339 with microseconds, so string order is time order.
#[must_use]
pub fn timestamp_now() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Micros, true)
}

/// Unix milliseconds for a stored timestamp, 0 when it cannot be read.
#[must_use]
pub fn timestamp_millis(created_at: &str) -> i64 {
    chrono::DateTime::parse_from_rfc3339(created_at)
        .map(|t| t.timestamp_millis())
        .unwrap_or_default()
}

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn connect(db_url: &str, config: &StoreConfig) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        let in_memory = db_url.contains(":memory:");

        if db_url.starts_with("sqlite:") && !in_memory {
            let path_str = db_url
                .trim_start_matches("sqlite://")
                .trim_start_matches("sqlite:")
                .split('?')
                .next()
                .unwrap_or_default();
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        // Every pooled connection to an in-memory sqlite url opens its own
        // database, so the single connection must never be reaped or recycled.
        let (conn, max_connections, min_connections) = if in_memory {
            let pool = SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds))
                .idle_timeout(None::<Duration>)
                .max_lifetime(None::<Duration>)
                .connect(db_url)
                .await?;
            (SqlxSqliteConnector::from_sqlx_sqlite_pool(pool), 1, 1)
        } else {
            let mut opt = ConnectOptions::new(db_url.to_string());
            opt.max_connections(config.max_connections)
                .min_connections(config.min_connections)
                .connect_timeout(Duration::from_secs(config.connect_timeout_seconds))
                .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds))
                .idle_timeout(Duration::from_secs(30))
                .sqlx_logging(false);
            (
                Database::connect(opt).await?,
                config.max_connections,
                config.min_connections,
            )
        };

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Store connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn generation_repo(&self) -> repositories::generations::GenerationRepository {
        repositories::generations::GenerationRepository::new(self.conn.clone())
    }

    fn signup_repo(&self) -> repositories::signups::SignupRepository {
        repositories::signups::SignupRepository::new(self.conn.clone())
    }

    fn feedback_repo(&self) -> repositories::feedback::FeedbackRepository {
        repositories::feedback::FeedbackRepository::new(self.conn.clone())
    }

    pub async fn add_generation(&self, record: &GenerationRecord) -> Result<bool> {
        self.generation_repo().add(record).await
    }

    pub async fn list_generations(&self) -> Result<Vec<GenerationRecord>> {
        self.generation_repo().list_recent().await
    }

    pub async fn latest_generation(&self, startup_id: &str) -> Result<Option<GenerationRecord>> {
        self.generation_repo().latest_for_startup(startup_id).await
    }

    pub async fn count_generations(&self, startup_id: Option<&str>) -> Result<u64> {
        self.generation_repo().count(startup_id).await
    }

    pub async fn add_signup(&self, record: &SignupRecord) -> Result<InsertOutcome> {
        self.signup_repo().add(record).await
    }

    pub async fn list_signups(&self, startup_id: Option<&str>) -> Result<Vec<SignupRecord>> {
        self.signup_repo().list(startup_id).await
    }

    pub async fn add_feedback(&self, record: &FeedbackRecord) -> Result<()> {
        self.feedback_repo().add(record).await
    }

    pub async fn list_feedback(&self, startup_id: Option<&str>) -> Result<Vec<FeedbackRecord>> {
        self.feedback_repo().list(startup_id).await
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnavailableReason {
    NotConfigured,
    ConnectFailed(String),
}

/// What a caller gets from the gateway. Both arms must be handled.
#[derive(Clone)]
pub enum StoreHandle {
    Available(Store),
    Unavailable(UnavailableReason),
}

impl StoreHandle {
    #[must_use]
    pub const fn is_available(&self) -> bool {
        matches!(self, Self::Available(_))
    }

    #[must_use]
    pub const fn status(&self) -> &'static str {
        match self {
            Self::Available(_) => "connected",
            Self::Unavailable(UnavailableReason::NotConfigured) => "not_configured",
            Self::Unavailable(UnavailableReason::ConnectFailed(_)) => "unreachable",
        }
    }
}

/// Lazily connects to the record store on first use and shares the
/// connection for the rest of the process.
///
/// A failed attempt is not remembered; the next caller tries again.
pub struct StoreGateway {
    config: StoreConfig,
    store: OnceCell<Store>,
}

impl StoreGateway {
    #[must_use]
    pub fn new(config: StoreConfig) -> Self {
        Self {
            config,
            store: OnceCell::new(),
        }
    }

    /// Gateway over an already connected store.
    #[must_use]
    pub fn with_store(config: StoreConfig, store: Store) -> Self {
        Self {
            config,
            store: OnceCell::new_with(Some(store)),
        }
    }

    pub async fn get(&self) -> StoreHandle {
        if let Some(store) = self.store.get() {
            return StoreHandle::Available(store.clone());
        }

        let Some(db_url) = self
            .config
            .database_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
        else {
            return StoreHandle::Unavailable(UnavailableReason::NotConfigured);
        };

        match self
            .store
            .get_or_try_init(|| Store::connect(db_url, &self.config))
            .await
        {
            Ok(store) => StoreHandle::Available(store.clone()),
            Err(e) => {
                warn!(error = %e, "Record store unavailable, continuing without persistence");
                StoreHandle::Unavailable(UnavailableReason::ConnectFailed(e.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_format_orders_lexically() {
        let earlier = "2026-10-18T09:00:00.000001Z";
        let later = "2026-10-18T10:00:00.000000Z";
        assert!(earlier < later);

        let now = timestamp_now();
        assert_eq!(now.len(), earlier.len());
        assert!(now.ends_with('Z'));
    }

    #[test]
    fn test_timestamp_millis() {
        assert_eq!(timestamp_millis("1970-01-01T00:00:01.500000Z"), 1500);
        assert_eq!(timestamp_millis("garbage"), 0);
    }

    #[tokio::test]
    async fn test_gateway_without_url_is_unavailable() {
        let config = StoreConfig {
            database_url: None,
            ..StoreConfig::default()
        };
        let gateway = StoreGateway::new(config);

        let handle = gateway.get().await;
        assert!(!handle.is_available());
        assert_eq!(handle.status(), "not_configured");
    }

    #[tokio::test]
    async fn test_gateway_with_bad_url_is_unavailable() {
        let config = StoreConfig {
            database_url: Some("postgres://nowhere.invalid:1/db".to_string()),
            connect_timeout_seconds: 1,
            ..StoreConfig::default()
        };
        let gateway = StoreGateway::new(config);

        let handle = gateway.get().await;
        assert_eq!(handle.status(), "unreachable");
    }

    #[tokio::test]
    async fn test_gateway_reuses_connection() {
        let config = StoreConfig {
            database_url: Some("sqlite::memory:".to_string()),
            ..StoreConfig::default()
        };
        let gateway = StoreGateway::new(config);

        let StoreHandle::Available(first) = gateway.get().await else {
            panic!("in-memory store should connect");
        };
        first.ping().await.unwrap();

        let record = SignupRecord {
            id: "a1".to_string(),
            email: "a@b.co".to_string(),
            startup_id: "s1".to_string(),
            source: "direct".to_string(),
            would_pay: false,
            price_point: None,
            created_at: timestamp_now(),
        };
        first.add_signup(&record).await.unwrap();

        let StoreHandle::Available(second) = gateway.get().await else {
            panic!("second call should reuse the store");
        };
        assert_eq!(second.list_signups(None).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_in_memory_connection_is_never_recycled() {
        let store = Store::connect("sqlite::memory:", &StoreConfig::default())
            .await
            .unwrap();

        let options = store.conn.get_sqlite_connection_pool().options();
        assert_eq!(options.get_max_connections(), 1);
        assert_eq!(options.get_max_lifetime(), None);
        assert_eq!(options.get_idle_timeout(), None);
        store.ping().await.unwrap();
    }
}

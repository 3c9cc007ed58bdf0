use crate::domain::PricePoint;
use crate::entities::{prelude::*, signups};
use anyhow::Result;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    SqlErr,
};
use tracing::info;

/// Repository for email signups
pub struct SignupRepository {
    conn: DatabaseConnection,
}

impl SignupRepository {
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn map_model(row: signups::Model) -> SignupRecord {
        SignupRecord {
            id: row.id,
            email: row.email,
            startup_id: row.startup_id,
            source: row.source,
            would_pay: row.would_pay,
            price_point: row.price_point.and_then(|p| PricePoint::new(i64::from(p))),
            created_at: row.created_at,
        }
    }

    /// Single insert guarded by the `(email, startup_id)` unique index.
    pub async fn add(&self, record: &SignupRecord) -> Result<InsertOutcome> {
        let active_model = signups::ActiveModel {
            id: Set(record.id.clone()),
            email: Set(record.email.clone()),
            startup_id: Set(record.startup_id.clone()),
            source: Set(record.source.clone()),
            would_pay: Set(record.would_pay),
            price_point: Set(record.price_point.map(|p| i32::from(p.value()))),
            created_at: Set(record.created_at.clone()),
        };

        match Signups::insert(active_model)
            .exec_without_returning(&self.conn)
            .await
        {
            Ok(_) => {
                info!(startup_id = %record.startup_id, "Recorded signup");
                Ok(InsertOutcome::Inserted)
            }
            Err(err) if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                // Only the (email, startup_id) index means "already signed up".
                if self.exists(&record.email, &record.startup_id).await? {
                    Ok(InsertOutcome::Duplicate)
                } else {
                    Err(err.into())
                }
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn exists(&self, email: &str, startup_id: &str) -> Result<bool> {
        let count = Signups::find()
            .filter(signups::Column::Email.eq(email))
            .filter(signups::Column::StartupId.eq(startup_id))
            .count(&self.conn)
            .await?;
        Ok(count > 0)
    }

    pub async fn list(&self, startup_id: Option<&str>) -> Result<Vec<SignupRecord>> {
        let mut query = Signups::find().order_by_desc(signups::Column::CreatedAt);

        if let Some(id) = startup_id {
            query = query.filter(signups::Column::StartupId.eq(id));
        }

        let rows = query.all(&self.conn).await?;
        Ok(rows.into_iter().map(Self::map_model).collect())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted,
    Duplicate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupRecord {
    pub id: String,
    pub email: String,
    pub startup_id: String,
    pub source: String,
    pub would_pay: bool,
    pub price_point: Option<PricePoint>,
    pub created_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StoreConfig;
    use crate::db::{Store, timestamp_now};

    fn record(id: &str, email: &str) -> SignupRecord {
        SignupRecord {
            id: id.to_string(),
            email: email.to_string(),
            startup_id: "s1".to_string(),
            source: "direct".to_string(),
            would_pay: false,
            price_point: None,
            created_at: timestamp_now(),
        }
    }

    async fn repo() -> SignupRepository {
        let store = Store::connect("sqlite::memory:", &StoreConfig::default())
            .await
            .unwrap();
        SignupRepository::new(store.conn)
    }

    #[tokio::test]
    async fn test_same_email_and_startup_is_duplicate() {
        let repo = repo().await;

        let first = repo.add(&record("a1", "a@b.co")).await.unwrap();
        assert_eq!(first, InsertOutcome::Inserted);

        let second = repo.add(&record("a2", "a@b.co")).await.unwrap();
        assert_eq!(second, InsertOutcome::Duplicate);
    }

    #[tokio::test]
    async fn test_id_collision_is_an_error_not_a_duplicate() {
        let repo = repo().await;

        repo.add(&record("a1", "a@b.co")).await.unwrap();
        assert!(repo.add(&record("a1", "other@b.co")).await.is_err());

        assert_eq!(repo.list(Some("s1")).await.unwrap().len(), 1);
    }
}

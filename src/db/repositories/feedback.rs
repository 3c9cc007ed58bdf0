use crate::entities::{feedback, prelude::*};
use anyhow::Result;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};
use tracing::info;

/// Repository for visitor feedback
pub struct FeedbackRepository {
    conn: DatabaseConnection,
}

impl FeedbackRepository {
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn map_model(row: feedback::Model) -> FeedbackRecord {
        FeedbackRecord {
            id: row.id,
            startup_id: row.startup_id,
            feedback: row.feedback,
            rating: u8::try_from(row.rating).unwrap_or_default(),
            source: row.source,
            created_at: row.created_at,
        }
    }

    pub async fn add(&self, record: &FeedbackRecord) -> Result<()> {
        let active_model = feedback::ActiveModel {
            id: Set(record.id.clone()),
            startup_id: Set(record.startup_id.clone()),
            feedback: Set(record.feedback.clone()),
            rating: Set(i32::from(record.rating)),
            source: Set(record.source.clone()),
            created_at: Set(record.created_at.clone()),
        };

        Feedback::insert(active_model)
            .exec_without_returning(&self.conn)
            .await?;
        info!(startup_id = %record.startup_id, rating = record.rating, "Recorded feedback");
        Ok(())
    }

    pub async fn list(&self, startup_id: Option<&str>) -> Result<Vec<FeedbackRecord>> {
        let mut query = Feedback::find().order_by_desc(feedback::Column::CreatedAt);

        if let Some(id) = startup_id {
            query = query.filter(feedback::Column::StartupId.eq(id));
        }

        let rows = query.all(&self.conn).await?;
        Ok(rows.into_iter().map(Self::map_model).collect())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackRecord {
    pub id: String,
    pub startup_id: String,
    pub feedback: String,
    pub rating: u8,
    pub source: String,
    pub created_at: String,
}

use crate::domain::{GeneratedContent, Industry};
use crate::entities::{generations, prelude::*};
use anyhow::Result;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    sea_query::OnConflict,
};
use tracing::debug;

/// Repository for generated landing pages
pub struct GenerationRepository {
    conn: DatabaseConnection,
}

impl GenerationRepository {
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn map_model(row: generations::Model) -> GenerationRecord {
        let features = serde_json::from_str(&row.features).unwrap_or_default();

        GenerationRecord {
            startup_id: row.startup_id,
            idea: row.idea,
            source: row.source,
            content: GeneratedContent {
                headline: row.headline,
                pitch: row.pitch,
                cta: row.cta,
                features,
                industry: Industry::classify(&row.industry),
            },
            created_at: row.created_at,
        }
    }

    /// Returns `false` when a generation for the same startup, idea and
    /// source already exists; the existing row is left untouched.
    pub async fn add(&self, record: &GenerationRecord) -> Result<bool> {
        let active_model = generations::ActiveModel {
            startup_id: Set(record.startup_id.clone()),
            idea: Set(record.idea.clone()),
            source: Set(record.source.clone()),
            industry: Set(record.content.industry.label().to_string()),
            headline: Set(record.content.headline.clone()),
            pitch: Set(record.content.pitch.clone()),
            cta: Set(record.content.cta.clone()),
            features: Set(serde_json::to_string(&record.content.features)?),
            created_at: Set(record.created_at.clone()),
            ..Default::default()
        };

        let inserted = Generations::insert(active_model)
            .on_conflict(
                OnConflict::columns([
                    generations::Column::StartupId,
                    generations::Column::Idea,
                    generations::Column::Source,
                ])
                .do_nothing()
                .to_owned(),
            )
            .exec_without_returning(&self.conn)
            .await?;

        if inserted == 0 {
            debug!(startup_id = %record.startup_id, "Generation already recorded");
        }

        Ok(inserted > 0)
    }

    pub async fn list_recent(&self) -> Result<Vec<GenerationRecord>> {
        let rows = Generations::find()
            .order_by_desc(generations::Column::CreatedAt)
            .all(&self.conn)
            .await?;

        Ok(rows.into_iter().map(Self::map_model).collect())
    }

    pub async fn latest_for_startup(&self, startup_id: &str) -> Result<Option<GenerationRecord>> {
        let row = Generations::find()
            .filter(generations::Column::StartupId.eq(startup_id))
            .order_by_desc(generations::Column::CreatedAt)
            .one(&self.conn)
            .await?;

        Ok(row.map(Self::map_model))
    }

    pub async fn count(&self, startup_id: Option<&str>) -> Result<u64> {
        let mut query = Generations::find();

        if let Some(id) = startup_id {
            query = query.filter(generations::Column::StartupId.eq(id));
        }

        Ok(query.count(&self.conn).await?)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRecord {
    pub startup_id: String,
    pub idea: String,
    pub source: String,
    pub content: GeneratedContent,
    pub created_at: String,
}

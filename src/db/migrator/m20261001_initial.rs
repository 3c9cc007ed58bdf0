use crate::entities::{feedback, generations, prelude::*, signups};
use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::Schema;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let backend = manager.get_database_backend();
        let schema = Schema::new(backend);

        manager
            .create_table(
                schema
                    .create_table_from_entity(Generations)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(Signups)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(Feedback)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        // A repeated generation for the same idea from the same source is kept once.
        manager
            .create_index(
                Index::create()
                    .name("idx_generations_startup_idea_source")
                    .table(Generations)
                    .col(generations::Column::StartupId)
                    .col(generations::Column::Idea)
                    .col(generations::Column::Source)
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_generations_created_at")
                    .table(Generations)
                    .col(generations::Column::CreatedAt)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        // One signup per email and landing page.
        manager
            .create_index(
                Index::create()
                    .name("idx_signups_email_startup")
                    .table(Signups)
                    .col(signups::Column::Email)
                    .col(signups::Column::StartupId)
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_signups_startup_created_at")
                    .table(Signups)
                    .col(signups::Column::StartupId)
                    .col(signups::Column::CreatedAt)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_feedback_startup_created_at")
                    .table(Feedback)
                    .col(feedback::Column::StartupId)
                    .col(feedback::Column::CreatedAt)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Feedback).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Signups).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Generations).to_owned())
            .await
    }
}

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "generations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub startup_id: String,
    pub idea: String,
    pub source: String,
    pub industry: String,
    pub headline: String,
    pub pitch: String,
    pub cta: String,
    /// JSON array of feature phrases.
    pub features: String,
    pub created_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

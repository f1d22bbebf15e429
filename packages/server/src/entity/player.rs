use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A team or competitor referenced by events as side A / side B.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "players")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub name: String,
    pub symbol: String,
    /// Public URL of the uploaded image asset.
    pub url: String,

    pub category_id: i32,
    #[sea_orm(belongs_to, from = "category_id", to = "id")]
    pub category: HasOne<super::category::Entity>,

    /// NULL for players not tied to a tournament.
    pub tournament_id: Option<i32>,
    #[sea_orm(belongs_to, from = "tournament_id", to = "id")]
    pub tournament: BelongsTo<Option<super::tournament::Entity>>,

    /// Rows flagged here are appended to every player listing.
    pub is_prediction: bool,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}

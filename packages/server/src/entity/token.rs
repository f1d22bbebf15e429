use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tokens")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub name: String,
    pub symbol: String,
    /// Contract address on the owning chain.
    pub address: String,
    pub decimals: i32,
    pub image_url: Option<String>,

    pub chain_id: i64,
    #[sea_orm(belongs_to, from = "chain_id", to = "chain_id")]
    pub chain: HasOne<super::chain::Entity>,

    #[sea_orm(has_many)]
    pub events: HasMany<super::event::Entity>,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}

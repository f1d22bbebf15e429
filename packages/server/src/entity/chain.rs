use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "chains")]
pub struct Model {
    /// The EVM chain id (e.g. 40 for Telos); assigned, not generated.
    #[sea_orm(primary_key, auto_increment = false)]
    pub chain_id: i64,

    pub name: String,
    pub explorer_url: String,
    pub is_mainnet: bool,
    pub is_active: bool,
    pub image_url: Option<String>,

    #[sea_orm(has_many)]
    pub tokens: HasMany<super::token::Entity>,

    #[sea_orm(has_many)]
    pub events: HasMany<super::event::Entity>,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "category")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub name: String,
    pub image_url: Option<String>,

    #[sea_orm(has_many)]
    pub tournaments: HasMany<super::tournament::Entity>,

    #[sea_orm(has_many)]
    pub players: HasMany<super::player::Entity>,

    #[sea_orm(has_many)]
    pub events: HasMany<super::event::Entity>,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}

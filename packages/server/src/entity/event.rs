use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A proposition with two sides, a sale window, and chain/token bindings.
///
/// Events are never hard-deleted: listings hide rows with `is_deleted`
/// set, and the admin "deleted events" view restores them by clearing it.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "events")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub code: String,

    /// Unix seconds; 0 means "unset/immediately open".
    #[sea_orm(default_value = 0)]
    pub sale_start: i64,
    /// Unix seconds; end of the sale window.
    pub sale_end: i64,

    pub is_featured: bool,
    pub is_deployed: bool,
    pub is_deleted: bool,

    pub category_id: i32,
    #[sea_orm(belongs_to, from = "category_id", to = "id")]
    pub category: HasOne<super::category::Entity>,

    /// NULL for events not tied to a tournament.
    pub tournament_id: Option<i32>,
    #[sea_orm(belongs_to, from = "tournament_id", to = "id")]
    pub tournament: BelongsTo<Option<super::tournament::Entity>>,

    /// The two sides reference the players table twice; listings join it
    /// under independent aliases (see `handlers::event`).
    pub team_a: i32,
    pub team_b: i32,

    pub token_id: i32,
    #[sea_orm(belongs_to, from = "token_id", to = "id")]
    pub token: HasOne<super::token::Entity>,

    pub chain_id: i64,
    #[sea_orm(belongs_to, from = "chain_id", to = "chain_id")]
    pub chain: HasOne<super::chain::Entity>,

    /// Outcome condition labels stored as a JSON array of strings.
    #[sea_orm(column_type = "JsonBinary")]
    pub conditions: serde_json::Value,

    /// Optional per-side adjustment shown next to the side's symbol.
    pub handicap_team_a: Option<String>,
    pub handicap_team_b: Option<String>,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}

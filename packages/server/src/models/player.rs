use chrono::{DateTime, Utc};
use sea_orm::FromQueryResult;
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::shared::{double_option, validate_name};

#[derive(Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePlayerRequest {
    pub name: String,
    pub symbol: String,
    pub category_id: i32,
    pub tournament_id: Option<i32>,
    /// Object key of the uploaded image; the server derives the public URL.
    pub image_name: String,
    #[serde(default)]
    pub is_prediction: bool,
}

#[derive(Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePlayerRequest {
    pub id: i32,
    pub name: Option<String>,
    pub symbol: Option<String>,
    pub category_id: Option<i32>,
    #[serde(default, deserialize_with = "double_option")]
    pub tournament_id: Option<Option<i32>>,
    /// When present, the image URL is recomputed from this object key.
    pub image_name: Option<String>,
    pub is_prediction: Option<bool>,
}

#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlayerResponse {
    pub id: i32,
    pub name: String,
    pub symbol: String,
    pub url: String,
    pub category_id: i32,
    pub tournament_id: Option<i32>,
    pub is_prediction: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One row of the player listing, with joined category and tournament names.
#[derive(Serialize, FromQueryResult, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlayerListItem {
    pub id: i32,
    pub name: String,
    pub symbol: String,
    pub url: String,
    pub category: String,
    pub tournament: Option<String>,
    pub is_prediction: bool,
}

#[derive(Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct PlayerListQuery {
    pub category_id: Option<String>,
    pub tournament_id: Option<String>,
    pub search: Option<String>,
    pub limit: Option<String>,
    pub page: Option<String>,
}

impl From<crate::entity::player::Model> for PlayerResponse {
    fn from(m: crate::entity::player::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            symbol: m.symbol,
            url: m.url,
            category_id: m.category_id,
            tournament_id: m.tournament_id,
            is_prediction: m.is_prediction,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

/// Append always-include rows to a page, de-duplicating by id with the
/// paginated rows taking precedence.
pub fn merge_always_include(
    mut page_rows: Vec<PlayerListItem>,
    always: Vec<PlayerListItem>,
) -> Vec<PlayerListItem> {
    let seen: std::collections::HashSet<i32> = page_rows.iter().map(|r| r.id).collect();
    page_rows.extend(always.into_iter().filter(|r| !seen.contains(&r.id)));
    page_rows
}

pub fn validate_create_player(req: &CreatePlayerRequest) -> Result<(), AppError> {
    validate_name(&req.name, "Player name", 255)?;
    validate_name(&req.symbol, "Player symbol", 63)
}

pub fn validate_update_player(req: &UpdatePlayerRequest) -> Result<(), AppError> {
    if let Some(ref name) = req.name {
        validate_name(name, "Player name", 255)?;
    }
    if let Some(ref symbol) = req.symbol {
        validate_name(symbol, "Player symbol", 63)?;
    }
    Ok(())
}

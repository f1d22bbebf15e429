use chrono::{DateTime, Utc};
use sea_orm::FromQueryResult;
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::shared::{double_option, validate_name};

#[derive(Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTournamentRequest {
    pub name: String,
    pub category_id: i32,
    pub image_url: Option<String>,
}

#[derive(Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTournamentRequest {
    pub id: i32,
    pub name: Option<String>,
    pub category_id: Option<i32>,
    #[serde(default, deserialize_with = "double_option")]
    pub image_url: Option<Option<String>>,
}

#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TournamentResponse {
    pub id: i32,
    pub name: String,
    pub category_id: i32,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One row of the tournament listing, with the joined category name.
#[derive(Serialize, FromQueryResult, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TournamentListItem {
    pub id: i32,
    pub name: String,
    pub image_url: Option<String>,
    pub category_id: i32,
    pub category: String,
}

#[derive(Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct TournamentListQuery {
    pub category_id: Option<String>,
    pub search: Option<String>,
    pub limit: Option<String>,
    pub page: Option<String>,
}

impl From<crate::entity::tournament::Model> for TournamentResponse {
    fn from(m: crate::entity::tournament::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            category_id: m.category_id,
            image_url: m.image_url,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

pub fn validate_create_tournament(req: &CreateTournamentRequest) -> Result<(), AppError> {
    validate_name(&req.name, "Tournament name", 128)
}

pub fn validate_update_tournament(req: &UpdateTournamentRequest) -> Result<(), AppError> {
    if let Some(ref name) = req.name {
        validate_name(name, "Tournament name", 128)?;
    }
    Ok(())
}

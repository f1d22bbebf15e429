use chrono::{DateTime, Utc};
use sea_orm::FromQueryResult;
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::shared::{double_option, validate_name};

#[derive(Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateChainRequest {
    pub chain_id: i64,
    pub name: String,
    pub explorer_url: String,
    pub is_mainnet: bool,
    #[serde(default)]
    pub is_active: bool,
    pub image_url: Option<String>,
}

#[derive(Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateChainRequest {
    pub chain_id: i64,
    pub name: Option<String>,
    pub explorer_url: Option<String>,
    pub is_mainnet: Option<bool>,
    pub is_active: Option<bool>,
    #[serde(default, deserialize_with = "double_option")]
    pub image_url: Option<Option<String>>,
}

#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChainResponse {
    pub chain_id: i64,
    pub name: String,
    pub explorer_url: String,
    pub is_mainnet: bool,
    pub is_active: bool,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Serialize, FromQueryResult, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChainListItem {
    pub chain_id: i64,
    pub name: String,
    pub explorer_url: String,
    pub is_mainnet: bool,
    pub is_active: bool,
    pub image_url: Option<String>,
}

#[derive(Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ChainListQuery {
    pub search: Option<String>,
    /// Only the literal "true" filters to active chains.
    pub active: Option<String>,
    pub limit: Option<String>,
    pub page: Option<String>,
}

impl From<crate::entity::chain::Model> for ChainResponse {
    fn from(m: crate::entity::chain::Model) -> Self {
        Self {
            chain_id: m.chain_id,
            name: m.name,
            explorer_url: m.explorer_url,
            is_mainnet: m.is_mainnet,
            is_active: m.is_active,
            image_url: m.image_url,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

pub fn validate_create_chain(req: &CreateChainRequest) -> Result<(), AppError> {
    if req.chain_id <= 0 {
        return Err(AppError::Validation("chainId must be positive".into()));
    }
    validate_name(&req.name, "Chain name", 63)?;
    validate_name(&req.explorer_url, "Explorer URL", 255)
}

pub fn validate_update_chain(req: &UpdateChainRequest) -> Result<(), AppError> {
    if let Some(ref name) = req.name {
        validate_name(name, "Chain name", 63)?;
    }
    if let Some(ref url) = req.explorer_url {
        validate_name(url, "Explorer URL", 255)?;
    }
    Ok(())
}

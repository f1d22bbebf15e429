use chrono::{DateTime, Utc};
use sea_orm::FromQueryResult;
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::shared::{double_option, validate_name};

#[derive(Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTokenRequest {
    pub name: String,
    pub symbol: String,
    pub address: String,
    pub chain_id: i64,
    pub decimals: i32,
    pub image_url: Option<String>,
}

#[derive(Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTokenRequest {
    pub id: i32,
    pub name: Option<String>,
    pub symbol: Option<String>,
    pub address: Option<String>,
    pub chain_id: Option<i64>,
    pub decimals: Option<i32>,
    #[serde(default, deserialize_with = "double_option")]
    pub image_url: Option<Option<String>>,
}

#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    pub id: i32,
    pub name: String,
    pub symbol: String,
    pub address: String,
    pub chain_id: i64,
    pub decimals: i32,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One row of the token listing, with the joined chain name.
#[derive(Serialize, FromQueryResult, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TokenListItem {
    pub id: i32,
    pub name: String,
    pub symbol: String,
    pub address: String,
    pub decimals: i32,
    pub image_url: Option<String>,
    pub chain_id: i64,
    pub chain_name: String,
}

#[derive(Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct TokenListQuery {
    pub chain_id: Option<String>,
    pub search: Option<String>,
    pub limit: Option<String>,
    pub page: Option<String>,
}

impl From<crate::entity::token::Model> for TokenResponse {
    fn from(m: crate::entity::token::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            symbol: m.symbol,
            address: m.address,
            chain_id: m.chain_id,
            decimals: m.decimals,
            image_url: m.image_url,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

pub fn validate_create_token(req: &CreateTokenRequest) -> Result<(), AppError> {
    validate_name(&req.name, "Token name", 63)?;
    validate_name(&req.symbol, "Token symbol", 31)?;
    validate_name(&req.address, "Token address", 63)?;
    if !(0..=36).contains(&req.decimals) {
        return Err(AppError::Validation("decimals must be 0-36".into()));
    }
    Ok(())
}

pub fn validate_update_token(req: &UpdateTokenRequest) -> Result<(), AppError> {
    if let Some(ref name) = req.name {
        validate_name(name, "Token name", 63)?;
    }
    if let Some(ref symbol) = req.symbol {
        validate_name(symbol, "Token symbol", 31)?;
    }
    if let Some(ref address) = req.address {
        validate_name(address, "Token address", 63)?;
    }
    if let Some(decimals) = req.decimals
        && !(0..=36).contains(&decimals)
    {
        return Err(AppError::Validation("decimals must be 0-36".into()));
    }
    Ok(())
}

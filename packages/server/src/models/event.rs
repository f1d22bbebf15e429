use chrono::{DateTime, Utc};
use sea_orm::FromQueryResult;
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::shared::{double_option, validate_name};

#[derive(Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    pub code: String,
    /// Unix seconds; omitted means 0 ("unset/immediately open").
    #[serde(default)]
    pub sale_start: i64,
    /// Unix seconds; required.
    pub sale_end: i64,
    #[serde(default)]
    pub is_featured: bool,
    pub category_id: i32,
    pub tournament_id: Option<i32>,
    pub team_a: i32,
    pub team_b: i32,
    pub token_id: i32,
    pub chain_id: i64,
    #[serde(default)]
    pub conditions: Vec<String>,
    pub handicap_team_a: Option<String>,
    pub handicap_team_b: Option<String>,
}

#[derive(Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventRequest {
    pub id: i32,
    pub code: Option<String>,
    pub sale_start: Option<i64>,
    pub sale_end: Option<i64>,
    pub is_featured: Option<bool>,
    pub is_deployed: Option<bool>,
    /// Soft delete (`true`) or restore (`false`).
    pub is_deleted: Option<bool>,
    pub category_id: Option<i32>,
    #[serde(default, deserialize_with = "double_option")]
    pub tournament_id: Option<Option<i32>>,
    pub team_a: Option<i32>,
    pub team_b: Option<i32>,
    pub token_id: Option<i32>,
    pub chain_id: Option<i64>,
    pub conditions: Option<Vec<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub handicap_team_a: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub handicap_team_b: Option<Option<String>>,
}

#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventResponse {
    pub id: i32,
    pub code: String,
    pub sale_start: i64,
    pub sale_end: i64,
    pub is_featured: bool,
    pub is_deployed: bool,
    pub is_deleted: bool,
    pub category_id: i32,
    pub tournament_id: Option<i32>,
    pub team_a: i32,
    pub team_b: i32,
    pub token_id: i32,
    pub chain_id: i64,
    pub conditions: Vec<String>,
    pub handicap_team_a: Option<String>,
    pub handicap_team_b: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct EventListQuery {
    pub chain_id: Option<String>,
    pub category_id: Option<String>,
    pub tournament_id: Option<String>,
    /// Matches the event code, case-insensitively.
    pub search: Option<String>,
    /// Only the literal "true" filters to featured events.
    pub featured: Option<String>,
    /// Inclusive sale-end window (unix seconds).
    pub from_time: Option<String>,
    pub to_time: Option<String>,
    /// Soft-deleted events are hidden unless this is "true".
    pub include_deleted: Option<String>,
    /// One of `saleEnd` (default), `saleStart`, `code`, `id`.
    pub sort_by: Option<String>,
    /// `asc` or `desc` (default).
    pub sort_dir: Option<String>,
    pub limit: Option<String>,
    pub page: Option<String>,
}

/// Flat row produced by the joined event query; shaped into
/// [`EventListItem`] before leaving the handler.
#[derive(Debug, FromQueryResult)]
pub struct EventListRow {
    pub id: i32,
    pub code: String,
    pub sale_start: i64,
    pub sale_end: i64,
    pub is_featured: bool,
    pub is_deployed: bool,
    pub is_deleted: bool,
    pub category_id: i32,
    pub category: String,
    pub tournament_id: Option<i32>,
    pub tournament: Option<String>,
    pub chain_id: i64,
    pub chain_name: String,
    pub token_symbol: String,
    pub token_address: String,
    pub token_decimals: i32,
    pub conditions: serde_json::Value,
    pub handicap_team_a: Option<String>,
    pub handicap_team_b: Option<String>,
    pub side_a_id: i32,
    pub side_a_name: String,
    pub side_a_symbol: String,
    pub side_a_img: String,
    pub side_b_id: i32,
    pub side_b_name: String,
    pub side_b_symbol: String,
    pub side_b_img: String,
}

/// One side of an event as it appears in listings. `name` carries the
/// display label (symbol plus handicap, when any).
#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventSide {
    pub id: i32,
    pub name: String,
    pub symbol: String,
    pub img: String,
}

#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventTokenRef {
    pub symbol: String,
    pub address: String,
    pub decimals: i32,
}

#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventListItem {
    pub id: i32,
    pub code: String,
    pub sale_start: i64,
    pub sale_end: i64,
    pub is_featured: bool,
    pub is_deployed: bool,
    pub is_deleted: bool,
    pub category_id: i32,
    pub category: String,
    pub tournament_id: Option<i32>,
    pub tournament: Option<String>,
    pub chain_id: i64,
    pub chain_name: String,
    pub token: EventTokenRef,
    pub conditions: Vec<String>,
    pub handicap_team_a: Option<String>,
    pub handicap_team_b: Option<String>,
    pub team_a: EventSide,
    pub team_b: EventSide,
}

impl From<EventListRow> for EventListItem {
    fn from(r: EventListRow) -> Self {
        let team_a = EventSide {
            id: r.side_a_id,
            name: side_label(&r.side_a_symbol, r.handicap_team_a.as_deref()),
            symbol: r.side_a_symbol,
            img: r.side_a_img,
        };
        let team_b = EventSide {
            id: r.side_b_id,
            name: side_label(&r.side_b_symbol, r.handicap_team_b.as_deref()),
            symbol: r.side_b_symbol,
            img: r.side_b_img,
        };
        Self {
            id: r.id,
            code: r.code,
            sale_start: r.sale_start,
            sale_end: r.sale_end,
            is_featured: r.is_featured,
            is_deployed: r.is_deployed,
            is_deleted: r.is_deleted,
            category_id: r.category_id,
            category: r.category,
            tournament_id: r.tournament_id,
            tournament: r.tournament,
            chain_id: r.chain_id,
            chain_name: r.chain_name,
            token: EventTokenRef {
                symbol: r.token_symbol,
                address: r.token_address,
                decimals: r.token_decimals,
            },
            conditions: conditions_from_json(&r.conditions),
            handicap_team_a: r.handicap_team_a,
            handicap_team_b: r.handicap_team_b,
            team_a,
            team_b,
        }
    }
}

impl From<crate::entity::event::Model> for EventResponse {
    fn from(m: crate::entity::event::Model) -> Self {
        Self {
            id: m.id,
            code: m.code,
            sale_start: m.sale_start,
            sale_end: m.sale_end,
            is_featured: m.is_featured,
            is_deployed: m.is_deployed,
            is_deleted: m.is_deleted,
            category_id: m.category_id,
            tournament_id: m.tournament_id,
            team_a: m.team_a,
            team_b: m.team_b,
            token_id: m.token_id,
            chain_id: m.chain_id,
            conditions: conditions_from_json(&m.conditions),
            handicap_team_a: m.handicap_team_a,
            handicap_team_b: m.handicap_team_b,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

/// Display label for one side: the symbol, with the handicap appended when
/// one is set. A handicap of `"0"` is a real handicap, not an absent one.
pub fn side_label(symbol: &str, handicap: Option<&str>) -> String {
    match handicap {
        Some(h) => format!("{symbol} {h}"),
        None => symbol.to_string(),
    }
}

/// Conditions are stored as a JSONB array of strings.
pub fn conditions_to_json(conditions: &[String]) -> serde_json::Value {
    serde_json::Value::Array(
        conditions
            .iter()
            .map(|c| serde_json::Value::String(c.clone()))
            .collect(),
    )
}

pub fn conditions_from_json(value: &serde_json::Value) -> Vec<String> {
    value
        .as_array()
        .map(|arr| {
            arr.iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

pub fn validate_create_event(req: &CreateEventRequest) -> Result<(), AppError> {
    validate_name(&req.code, "Event code", 255)?;
    if req.sale_end <= 0 {
        return Err(AppError::Validation(
            "saleEnd is required and must be a positive unix timestamp".into(),
        ));
    }
    if req.sale_start < 0 {
        return Err(AppError::Validation("saleStart must not be negative".into()));
    }
    if req.team_a == req.team_b {
        return Err(AppError::Validation(
            "teamA and teamB must reference distinct players".into(),
        ));
    }
    Ok(())
}

pub fn validate_update_event(req: &UpdateEventRequest) -> Result<(), AppError> {
    if let Some(ref code) = req.code {
        validate_name(code, "Event code", 255)?;
    }
    if let Some(sale_end) = req.sale_end
        && sale_end <= 0
    {
        return Err(AppError::Validation(
            "saleEnd must be a positive unix timestamp".into(),
        ));
    }
    if let Some(sale_start) = req.sale_start
        && sale_start < 0
    {
        return Err(AppError::Validation("saleStart must not be negative".into()));
    }
    Ok(())
}

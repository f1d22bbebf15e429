use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::*;
use tracing::instrument;

use crate::entity::{chain, token};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AdminUser;
use crate::extractors::json::AppJson;
use crate::listing::{Envelope, Page, contains_ci, parse_i64, run_paged};
use crate::models::token::*;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/api/v1/list/tokens",
    tag = "Tokens",
    operation_id = "listTokens",
    summary = "List tokens with pagination, chain filter, and symbol search",
    params(TokenListQuery),
    responses(
        (status = 200, description = "Paginated tokens", body = Envelope<TokenListItem>),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (EMAIL_NOT_ALLOWED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _admin, query))]
pub async fn list_tokens(
    _admin: AdminUser,
    State(state): State<AppState>,
    Query(query): Query<TokenListQuery>,
) -> Result<Json<Envelope<TokenListItem>>, AppError> {
    let page = Page::from_params(&query.page, &query.limit, state.config.listing.default_limit);

    let mut select = token::Entity::find().join(
        JoinType::InnerJoin,
        token::Entity::belongs_to(chain::Entity)
            .from(token::Column::ChainId)
            .to(chain::Column::ChainId)
            .into(),
    );

    if let Some(chain_id) = parse_i64(&query.chain_id) {
        select = select.filter(token::Column::ChainId.eq(chain_id));
    }
    if let Some(ref search) = query.search
        && let Some(expr) = contains_ci((token::Entity, token::Column::Symbol), search)
    {
        select = select.filter(expr);
    }

    let select = select
        .select_only()
        .column(token::Column::Id)
        .column(token::Column::Name)
        .column(token::Column::Symbol)
        .column(token::Column::Address)
        .column(token::Column::Decimals)
        .column(token::Column::ImageUrl)
        .column(token::Column::ChainId)
        .column_as(chain::Column::Name, "chain_name")
        .order_by_asc(token::Column::Id);

    let (data, metadata) = run_paged::<token::Entity, TokenListItem>(&state.db, select, &page).await?;

    Ok(Json(Envelope { data, metadata }))
}

#[utoipa::path(
    post,
    path = "/api/v1/create/token",
    tag = "Tokens",
    operation_id = "createToken",
    summary = "Register a token on a chain",
    request_body = CreateTokenRequest,
    responses(
        (status = 201, description = "Token created", body = TokenResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (EMAIL_NOT_ALLOWED)", body = ErrorBody),
        (status = 404, description = "Chain not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _admin, payload), fields(symbol = %payload.symbol))]
pub async fn create_token(
    _admin: AdminUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateTokenRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_token(&payload)?;

    find_chain(&state.db, payload.chain_id).await?;

    let now = chrono::Utc::now();
    let new_token = token::ActiveModel {
        name: Set(payload.name.trim().to_string()),
        symbol: Set(payload.symbol.trim().to_string()),
        address: Set(payload.address.trim().to_string()),
        chain_id: Set(payload.chain_id),
        decimals: Set(payload.decimals),
        image_url: Set(payload.image_url),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let model = new_token.insert(&state.db).await?;

    Ok((StatusCode::CREATED, Json(TokenResponse::from(model))))
}

#[utoipa::path(
    put,
    path = "/api/v1/update/token",
    tag = "Tokens",
    operation_id = "updateToken",
    summary = "Update an existing token",
    request_body = UpdateTokenRequest,
    responses(
        (status = 200, description = "Token updated", body = TokenResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (EMAIL_NOT_ALLOWED)", body = ErrorBody),
        (status = 404, description = "Token or chain not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _admin, payload), fields(id = %payload.id))]
pub async fn update_token(
    _admin: AdminUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<UpdateTokenRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    validate_update_token(&payload)?;

    let txn = state.db.begin().await?;

    let existing = token::Entity::find_by_id(payload.id)
        .one(&txn)
        .await?
        .ok_or_else(|| AppError::NotFound("Token not found".into()))?;

    if let Some(chain_id) = payload.chain_id {
        find_chain(&txn, chain_id).await?;
    }

    let mut active: token::ActiveModel = existing.into();

    if let Some(ref name) = payload.name {
        active.name = Set(name.trim().to_string());
    }
    if let Some(ref symbol) = payload.symbol {
        active.symbol = Set(symbol.trim().to_string());
    }
    if let Some(ref address) = payload.address {
        active.address = Set(address.trim().to_string());
    }
    if let Some(chain_id) = payload.chain_id {
        active.chain_id = Set(chain_id);
    }
    if let Some(decimals) = payload.decimals {
        active.decimals = Set(decimals);
    }
    match payload.image_url {
        Some(Some(url)) => active.image_url = Set(Some(url)),
        Some(None) => active.image_url = Set(None),
        None => {}
    }
    active.updated_at = Set(chrono::Utc::now());

    let model = active.update(&txn).await?;
    txn.commit().await?;

    Ok(Json(model.into()))
}

async fn find_chain<C: ConnectionTrait>(db: &C, chain_id: i64) -> Result<chain::Model, AppError> {
    chain::Entity::find_by_id(chain_id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Chain not found".into()))
}

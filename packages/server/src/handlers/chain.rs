use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::*;
use tracing::instrument;

use crate::entity::chain;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AdminUser;
use crate::extractors::json::AppJson;
use crate::listing::{Envelope, Page, contains_ci, flag_is_true, run_paged};
use crate::models::chain::*;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/api/v1/list/chains",
    tag = "Chains",
    operation_id = "listChains",
    summary = "List chains with pagination and search",
    params(ChainListQuery),
    responses(
        (status = 200, description = "Paginated chains", body = Envelope<ChainListItem>),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (EMAIL_NOT_ALLOWED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _admin, query))]
pub async fn list_chains(
    _admin: AdminUser,
    State(state): State<AppState>,
    Query(query): Query<ChainListQuery>,
) -> Result<Json<Envelope<ChainListItem>>, AppError> {
    let page = Page::from_params(&query.page, &query.limit, state.config.listing.default_limit);

    let mut select = chain::Entity::find();

    if let Some(ref search) = query.search
        && let Some(expr) = contains_ci((chain::Entity, chain::Column::Name), search)
    {
        select = select.filter(expr);
    }
    if flag_is_true(&query.active) {
        select = select.filter(chain::Column::IsActive.eq(true));
    }

    let select = select
        .select_only()
        .column(chain::Column::ChainId)
        .column(chain::Column::Name)
        .column(chain::Column::ExplorerUrl)
        .column(chain::Column::IsMainnet)
        .column(chain::Column::IsActive)
        .column(chain::Column::ImageUrl)
        .order_by_asc(chain::Column::ChainId);

    let (data, metadata) = run_paged::<chain::Entity, ChainListItem>(&state.db, select, &page).await?;

    Ok(Json(Envelope { data, metadata }))
}

#[utoipa::path(
    post,
    path = "/api/v1/create/chain",
    tag = "Chains",
    operation_id = "createChain",
    summary = "Register a new chain",
    request_body = CreateChainRequest,
    responses(
        (status = 201, description = "Chain created", body = ChainResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (EMAIL_NOT_ALLOWED)", body = ErrorBody),
        (status = 409, description = "Chain id already registered (CONFLICT)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _admin, payload), fields(chain_id = %payload.chain_id))]
pub async fn create_chain(
    _admin: AdminUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateChainRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_chain(&payload)?;

    let existing = chain::Entity::find_by_id(payload.chain_id)
        .one(&state.db)
        .await?;
    if existing.is_some() {
        return Err(AppError::Conflict(format!(
            "Chain {} is already registered",
            payload.chain_id
        )));
    }

    let now = chrono::Utc::now();
    let new_chain = chain::ActiveModel {
        chain_id: Set(payload.chain_id),
        name: Set(payload.name.trim().to_string()),
        explorer_url: Set(payload.explorer_url.trim().to_string()),
        is_mainnet: Set(payload.is_mainnet),
        is_active: Set(payload.is_active),
        image_url: Set(payload.image_url),
        created_at: Set(now),
        updated_at: Set(now),
    };

    let model = new_chain.insert(&state.db).await?;

    Ok((StatusCode::CREATED, Json(ChainResponse::from(model))))
}

#[utoipa::path(
    put,
    path = "/api/v1/update/chain",
    tag = "Chains",
    operation_id = "updateChain",
    summary = "Update an existing chain",
    request_body = UpdateChainRequest,
    responses(
        (status = 200, description = "Chain updated", body = ChainResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (EMAIL_NOT_ALLOWED)", body = ErrorBody),
        (status = 404, description = "Chain not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _admin, payload), fields(chain_id = %payload.chain_id))]
pub async fn update_chain(
    _admin: AdminUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<UpdateChainRequest>,
) -> Result<Json<ChainResponse>, AppError> {
    validate_update_chain(&payload)?;

    let txn = state.db.begin().await?;

    let existing = chain::Entity::find_by_id(payload.chain_id)
        .one(&txn)
        .await?
        .ok_or_else(|| AppError::NotFound("Chain not found".into()))?;

    let mut active: chain::ActiveModel = existing.into();

    if let Some(ref name) = payload.name {
        active.name = Set(name.trim().to_string());
    }
    if let Some(ref explorer_url) = payload.explorer_url {
        active.explorer_url = Set(explorer_url.trim().to_string());
    }
    if let Some(is_mainnet) = payload.is_mainnet {
        active.is_mainnet = Set(is_mainnet);
    }
    if let Some(is_active) = payload.is_active {
        active.is_active = Set(is_active);
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

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::*;
use tracing::instrument;

use crate::entity::{category, tournament};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AdminUser;
use crate::extractors::json::AppJson;
use crate::listing::{Envelope, Page, contains_ci, parse_i32, run_paged};
use crate::models::tournament::*;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/api/v1/list/tournaments",
    tag = "Tournaments",
    operation_id = "listTournaments",
    summary = "List tournaments with pagination, category filter, and search",
    params(TournamentListQuery),
    responses(
        (status = 200, description = "Paginated tournaments", body = Envelope<TournamentListItem>),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (EMAIL_NOT_ALLOWED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _admin, query))]
pub async fn list_tournaments(
    _admin: AdminUser,
    State(state): State<AppState>,
    Query(query): Query<TournamentListQuery>,
) -> Result<Json<Envelope<TournamentListItem>>, AppError> {
    let page = Page::from_params(&query.page, &query.limit, state.config.listing.default_limit);

    let mut select = tournament::Entity::find().join(
        JoinType::InnerJoin,
        tournament::Entity::belongs_to(category::Entity)
            .from(tournament::Column::CategoryId)
            .to(category::Column::Id)
            .into(),
    );

    if let Some(category_id) = parse_i32(&query.category_id) {
        select = select.filter(tournament::Column::CategoryId.eq(category_id));
    }
    if let Some(ref search) = query.search
        && let Some(expr) = contains_ci((tournament::Entity, tournament::Column::Name), search)
    {
        select = select.filter(expr);
    }

    let select = select
        .select_only()
        .column(tournament::Column::Id)
        .column(tournament::Column::Name)
        .column(tournament::Column::ImageUrl)
        .column(tournament::Column::CategoryId)
        .column_as(category::Column::Name, "category")
        .order_by_asc(tournament::Column::Id);

    let (data, metadata) =
        run_paged::<tournament::Entity, TournamentListItem>(&state.db, select, &page).await?;

    Ok(Json(Envelope { data, metadata }))
}

#[utoipa::path(
    post,
    path = "/api/v1/create/tournament",
    tag = "Tournaments",
    operation_id = "createTournament",
    summary = "Create a new tournament under a category",
    request_body = CreateTournamentRequest,
    responses(
        (status = 201, description = "Tournament created", body = TournamentResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (EMAIL_NOT_ALLOWED)", body = ErrorBody),
        (status = 404, description = "Category not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _admin, payload), fields(name = %payload.name))]
pub async fn create_tournament(
    _admin: AdminUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateTournamentRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_tournament(&payload)?;

    find_category(&state.db, payload.category_id).await?;

    let now = chrono::Utc::now();
    let new_tournament = tournament::ActiveModel {
        name: Set(payload.name.trim().to_string()),
        category_id: Set(payload.category_id),
        image_url: Set(payload.image_url),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let model = new_tournament.insert(&state.db).await?;

    Ok((StatusCode::CREATED, Json(TournamentResponse::from(model))))
}

#[utoipa::path(
    put,
    path = "/api/v1/update/tournament",
    tag = "Tournaments",
    operation_id = "updateTournament",
    summary = "Update an existing tournament",
    request_body = UpdateTournamentRequest,
    responses(
        (status = 200, description = "Tournament updated", body = TournamentResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (EMAIL_NOT_ALLOWED)", body = ErrorBody),
        (status = 404, description = "Tournament or category not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _admin, payload), fields(id = %payload.id))]
pub async fn update_tournament(
    _admin: AdminUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<UpdateTournamentRequest>,
) -> Result<Json<TournamentResponse>, AppError> {
    validate_update_tournament(&payload)?;

    let txn = state.db.begin().await?;

    let existing = find_tournament(&txn, payload.id).await?;

    if let Some(category_id) = payload.category_id {
        find_category(&txn, category_id).await?;
    }

    let mut active: tournament::ActiveModel = existing.into();

    if let Some(ref name) = payload.name {
        active.name = Set(name.trim().to_string());
    }
    if let Some(category_id) = payload.category_id {
        active.category_id = Set(category_id);
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

async fn find_tournament<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<tournament::Model, AppError> {
    tournament::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Tournament not found".into()))
}

async fn find_category<C: ConnectionTrait>(db: &C, id: i32) -> Result<category::Model, AppError> {
    category::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Category not found".into()))
}

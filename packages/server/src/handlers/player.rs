use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::*;
use tracing::instrument;

use crate::entity::{category, player, tournament};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AdminUser;
use crate::extractors::json::AppJson;
use crate::listing::{Envelope, Page, contains_ci, parse_i32, run_paged};
use crate::models::player::*;
use crate::state::AppState;

/// The joined, projected player select shared by the paginated query and
/// the always-include query, so both see the same join graph.
fn player_select() -> Select<player::Entity> {
    player::Entity::find()
        .join(
            JoinType::InnerJoin,
            player::Entity::belongs_to(category::Entity)
                .from(player::Column::CategoryId)
                .to(category::Column::Id)
                .into(),
        )
        .join(
            JoinType::LeftJoin,
            player::Entity::belongs_to(tournament::Entity)
                .from(player::Column::TournamentId)
                .to(tournament::Column::Id)
                .into(),
        )
        .select_only()
        .column(player::Column::Id)
        .column(player::Column::Name)
        .column(player::Column::Symbol)
        .column(player::Column::Url)
        .column(player::Column::IsPrediction)
        .column_as(category::Column::Name, "category")
        .column_as(tournament::Column::Name, "tournament")
}

#[utoipa::path(
    get,
    path = "/api/v1/list/players",
    tag = "Players",
    operation_id = "listPlayers",
    summary = "List players with pagination, filters, and search",
    description = "Returns a paginated list of players (teams/competitors). The category \
        filter also matches the configured always-include category, and rows flagged \
        `isPrediction` are appended to every page regardless of the active filters.",
    params(PlayerListQuery),
    responses(
        (status = 200, description = "Paginated players", body = Envelope<PlayerListItem>),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (EMAIL_NOT_ALLOWED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _admin, query))]
pub async fn list_players(
    _admin: AdminUser,
    State(state): State<AppState>,
    Query(query): Query<PlayerListQuery>,
) -> Result<Json<Envelope<PlayerListItem>>, AppError> {
    let page = Page::from_params(&query.page, &query.limit, state.config.listing.default_limit);

    let mut select = player_select();

    if let Some(category_id) = parse_i32(&query.category_id) {
        // The catch-all category is matched alongside the requested one.
        let always_include = state.config.listing.always_include_category_id;
        select = select.filter(
            Condition::any()
                .add(player::Column::CategoryId.eq(category_id))
                .add(player::Column::CategoryId.eq(always_include)),
        );
    }
    if let Some(tournament_id) = parse_i32(&query.tournament_id) {
        select = select.filter(player::Column::TournamentId.eq(tournament_id));
    }
    if let Some(ref search) = query.search
        && let Some(expr) = contains_ci((player::Entity, player::Column::Name), search)
    {
        select = select.filter(expr);
    }

    let select = select.order_by_asc(player::Column::Id);

    let (rows, metadata) =
        run_paged::<player::Entity, PlayerListItem>(&state.db, select, &page).await?;

    let always = player_select()
        .filter(player::Column::IsPrediction.eq(true))
        .order_by_asc(player::Column::Id)
        .into_model::<PlayerListItem>()
        .all(&state.db)
        .await?;

    Ok(Json(Envelope {
        data: merge_always_include(rows, always),
        metadata,
    }))
}

#[utoipa::path(
    post,
    path = "/api/v1/create/player",
    tag = "Players",
    operation_id = "createPlayer",
    summary = "Create a player from an uploaded image",
    description = "Creates a player referencing an already-uploaded image object; the \
        public image URL is derived from the object key.",
    request_body = CreatePlayerRequest,
    responses(
        (status = 201, description = "Player created", body = PlayerResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (EMAIL_NOT_ALLOWED)", body = ErrorBody),
        (status = 404, description = "Category or tournament not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _admin, payload), fields(name = %payload.name))]
pub async fn create_player(
    _admin: AdminUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreatePlayerRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_player(&payload)?;

    let key = crate::utils::filename::validate_object_key(&payload.image_name)
        .map_err(|e| AppError::Validation(e.message().into()))?;
    let url = state.store.public_url(key);

    find_category(&state.db, payload.category_id).await?;
    if let Some(tournament_id) = payload.tournament_id {
        find_tournament(&state.db, tournament_id).await?;
    }

    let now = chrono::Utc::now();
    let new_player = player::ActiveModel {
        name: Set(payload.name.trim().to_string()),
        symbol: Set(payload.symbol.trim().to_string()),
        url: Set(url),
        category_id: Set(payload.category_id),
        tournament_id: Set(payload.tournament_id),
        is_prediction: Set(payload.is_prediction),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let model = new_player.insert(&state.db).await?;

    Ok((StatusCode::CREATED, Json(PlayerResponse::from(model))))
}

#[utoipa::path(
    put,
    path = "/api/v1/update/player",
    tag = "Players",
    operation_id = "updatePlayer",
    summary = "Update an existing player",
    description = "Partially updates a player. Sending `imageName` recomputes the public \
        image URL; sending `tournamentId: null` detaches the player from its tournament.",
    request_body = UpdatePlayerRequest,
    responses(
        (status = 200, description = "Player updated", body = PlayerResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (EMAIL_NOT_ALLOWED)", body = ErrorBody),
        (status = 404, description = "Player, category, or tournament not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _admin, payload), fields(id = %payload.id))]
pub async fn update_player(
    _admin: AdminUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<UpdatePlayerRequest>,
) -> Result<Json<PlayerResponse>, AppError> {
    validate_update_player(&payload)?;

    let txn = state.db.begin().await?;

    let existing = find_player(&txn, payload.id).await?;

    if let Some(category_id) = payload.category_id {
        find_category(&txn, category_id).await?;
    }
    if let Some(Some(tournament_id)) = payload.tournament_id {
        find_tournament(&txn, tournament_id).await?;
    }

    let mut active: player::ActiveModel = existing.into();

    if let Some(ref name) = payload.name {
        active.name = Set(name.trim().to_string());
    }
    if let Some(ref symbol) = payload.symbol {
        active.symbol = Set(symbol.trim().to_string());
    }
    if let Some(category_id) = payload.category_id {
        active.category_id = Set(category_id);
    }
    match payload.tournament_id {
        Some(Some(tournament_id)) => active.tournament_id = Set(Some(tournament_id)),
        Some(None) => active.tournament_id = Set(None),
        None => {}
    }
    if let Some(ref image_name) = payload.image_name {
        let key = crate::utils::filename::validate_object_key(image_name)
            .map_err(|e| AppError::Validation(e.message().into()))?;
        active.url = Set(state.store.public_url(key));
    }
    if let Some(is_prediction) = payload.is_prediction {
        active.is_prediction = Set(is_prediction);
    }
    active.updated_at = Set(chrono::Utc::now());

    let model = active.update(&txn).await?;
    txn.commit().await?;

    Ok(Json(model.into()))
}

async fn find_player<C: ConnectionTrait>(db: &C, id: i32) -> Result<player::Model, AppError> {
    player::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Player not found".into()))
}

async fn find_category<C: ConnectionTrait>(db: &C, id: i32) -> Result<category::Model, AppError> {
    category::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Category not found".into()))
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

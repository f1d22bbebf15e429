use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::prelude::Expr;
use sea_orm::sea_query::Alias;
use sea_orm::*;
use tracing::instrument;

use crate::entity::{category, chain, event, player, token, tournament};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AdminUser;
use crate::extractors::json::AppJson;
use crate::listing::{
    Envelope, Page, TimeWindow, contains_ci, flag_is_true, parse_i32, parse_i64, run_paged,
    sort_order,
};
use crate::models::event::*;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/api/v1/list/events",
    tag = "Events",
    operation_id = "listEvents",
    summary = "List events with pagination, filters, sorting, and search",
    description = "Returns a paginated list of events with their category, optional \
        tournament, chain, token, and both sides resolved. Soft-deleted events are \
        hidden unless `includeDeleted=true`. The sale-end window defaults to the \
        configured number of days either side of now.",
    params(EventListQuery),
    responses(
        (status = 200, description = "Paginated events", body = Envelope<EventListItem>),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (EMAIL_NOT_ALLOWED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _admin, query))]
pub async fn list_events(
    _admin: AdminUser,
    State(state): State<AppState>,
    Query(query): Query<EventListQuery>,
) -> Result<Json<Envelope<EventListItem>>, AppError> {
    let page = Page::from_params(&query.page, &query.limit, state.config.listing.default_limit);

    // The same player table joined twice under independent aliases.
    let side_a = Alias::new("side_a");
    let side_b = Alias::new("side_b");

    let mut select = event::Entity::find()
        .join(
            JoinType::InnerJoin,
            event::Entity::belongs_to(category::Entity)
                .from(event::Column::CategoryId)
                .to(category::Column::Id)
                .into(),
        )
        .join(
            JoinType::InnerJoin,
            event::Entity::belongs_to(token::Entity)
                .from(event::Column::TokenId)
                .to(token::Column::Id)
                .into(),
        )
        .join(
            JoinType::InnerJoin,
            event::Entity::belongs_to(chain::Entity)
                .from(event::Column::ChainId)
                .to(chain::Column::ChainId)
                .into(),
        )
        .join(
            JoinType::LeftJoin,
            event::Entity::belongs_to(tournament::Entity)
                .from(event::Column::TournamentId)
                .to(tournament::Column::Id)
                .into(),
        )
        .join_as(
            JoinType::InnerJoin,
            event::Entity::belongs_to(player::Entity)
                .from(event::Column::TeamA)
                .to(player::Column::Id)
                .into(),
            side_a.clone(),
        )
        .join_as(
            JoinType::InnerJoin,
            event::Entity::belongs_to(player::Entity)
                .from(event::Column::TeamB)
                .to(player::Column::Id)
                .into(),
            side_b.clone(),
        );

    if let Some(chain_id) = parse_i64(&query.chain_id) {
        select = select.filter(event::Column::ChainId.eq(chain_id));
    }
    if let Some(category_id) = parse_i32(&query.category_id) {
        select = select.filter(event::Column::CategoryId.eq(category_id));
    }
    if let Some(tournament_id) = parse_i32(&query.tournament_id) {
        select = select.filter(event::Column::TournamentId.eq(tournament_id));
    }
    if flag_is_true(&query.featured) {
        select = select.filter(event::Column::IsFeatured.eq(true));
    }
    if !flag_is_true(&query.include_deleted) {
        select = select.filter(event::Column::IsDeleted.eq(false));
    }
    if let Some(ref search) = query.search
        && let Some(expr) = contains_ci((event::Entity, event::Column::Code), search)
    {
        select = select.filter(expr);
    }

    let window = TimeWindow::resolve(
        &query.from_time,
        &query.to_time,
        state.config.listing.time_window_days,
        chrono::Utc::now().timestamp(),
    );
    select = select
        .filter(event::Column::SaleEnd.gte(window.from))
        .filter(event::Column::SaleEnd.lte(window.to));

    // Sortable columns are an allow-list; anything else falls back to the
    // default sale-end ordering.
    let sort_column = match query.sort_by.as_deref().map(str::trim) {
        Some("saleStart") => event::Column::SaleStart,
        Some("code") => event::Column::Code,
        Some("id") => event::Column::Id,
        _ => event::Column::SaleEnd,
    };
    let select = select
        .order_by(sort_column, sort_order(&query.sort_dir))
        // Tiebreak keeps pages disjoint when sort keys collide.
        .order_by_asc(event::Column::Id);

    let select = select
        .select_only()
        .column(event::Column::Id)
        .column(event::Column::Code)
        .column(event::Column::SaleStart)
        .column(event::Column::SaleEnd)
        .column(event::Column::IsFeatured)
        .column(event::Column::IsDeployed)
        .column(event::Column::IsDeleted)
        .column(event::Column::CategoryId)
        .column_as(category::Column::Name, "category")
        .column(event::Column::TournamentId)
        .column_as(tournament::Column::Name, "tournament")
        .column(event::Column::ChainId)
        .column_as(chain::Column::Name, "chain_name")
        .column_as(token::Column::Symbol, "token_symbol")
        .column_as(token::Column::Address, "token_address")
        .column_as(token::Column::Decimals, "token_decimals")
        .column(event::Column::Conditions)
        .column(event::Column::HandicapTeamA)
        .column(event::Column::HandicapTeamB)
        .column_as(Expr::col((side_a.clone(), player::Column::Id)), "side_a_id")
        .column_as(
            Expr::col((side_a.clone(), player::Column::Name)),
            "side_a_name",
        )
        .column_as(
            Expr::col((side_a.clone(), player::Column::Symbol)),
            "side_a_symbol",
        )
        .column_as(Expr::col((side_a, player::Column::Url)), "side_a_img")
        .column_as(Expr::col((side_b.clone(), player::Column::Id)), "side_b_id")
        .column_as(
            Expr::col((side_b.clone(), player::Column::Name)),
            "side_b_name",
        )
        .column_as(
            Expr::col((side_b.clone(), player::Column::Symbol)),
            "side_b_symbol",
        )
        .column_as(Expr::col((side_b, player::Column::Url)), "side_b_img");

    let (rows, metadata) = run_paged::<event::Entity, EventListRow>(&state.db, select, &page).await?;

    Ok(Json(Envelope {
        data: rows.into_iter().map(EventListItem::from).collect(),
        metadata,
    }))
}

#[utoipa::path(
    post,
    path = "/api/v1/create/event",
    tag = "Events",
    operation_id = "createEvent",
    summary = "Create a new event",
    description = "Creates an event referencing an existing category, two distinct \
        players, a token, a chain, and optionally a tournament.",
    request_body = CreateEventRequest,
    responses(
        (status = 201, description = "Event created", body = EventResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (EMAIL_NOT_ALLOWED)", body = ErrorBody),
        (status = 404, description = "Referenced row not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _admin, payload), fields(code = %payload.code))]
pub async fn create_event(
    _admin: AdminUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateEventRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_event(&payload)?;

    find_category(&state.db, payload.category_id).await?;
    find_player(&state.db, payload.team_a).await?;
    find_player(&state.db, payload.team_b).await?;
    find_token(&state.db, payload.token_id).await?;
    find_chain(&state.db, payload.chain_id).await?;
    if let Some(tournament_id) = payload.tournament_id {
        find_tournament(&state.db, tournament_id).await?;
    }

    let now = chrono::Utc::now();
    let new_event = event::ActiveModel {
        code: Set(payload.code.trim().to_string()),
        sale_start: Set(payload.sale_start),
        sale_end: Set(payload.sale_end),
        is_featured: Set(payload.is_featured),
        is_deployed: Set(false),
        is_deleted: Set(false),
        category_id: Set(payload.category_id),
        tournament_id: Set(payload.tournament_id),
        team_a: Set(payload.team_a),
        team_b: Set(payload.team_b),
        token_id: Set(payload.token_id),
        chain_id: Set(payload.chain_id),
        conditions: Set(conditions_to_json(&payload.conditions)),
        handicap_team_a: Set(payload.handicap_team_a),
        handicap_team_b: Set(payload.handicap_team_b),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let model = new_event.insert(&state.db).await?;

    Ok((StatusCode::CREATED, Json(EventResponse::from(model))))
}

#[utoipa::path(
    put,
    path = "/api/v1/update/event",
    tag = "Events",
    operation_id = "updateEvent",
    summary = "Update an existing event",
    description = "Partially updates an event. `isDeleted` soft-deletes or restores \
        the row; `tournamentId: null` and `handicapTeamA/B: null` clear those fields. \
        Cross-field checks keep the two sides distinct and the sale window ordered \
        even when only one of the pair changes.",
    request_body = UpdateEventRequest,
    responses(
        (status = 200, description = "Event updated", body = EventResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (EMAIL_NOT_ALLOWED)", body = ErrorBody),
        (status = 404, description = "Event or referenced row not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _admin, payload), fields(id = %payload.id))]
pub async fn update_event(
    _admin: AdminUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<UpdateEventRequest>,
) -> Result<Json<EventResponse>, AppError> {
    validate_update_event(&payload)?;

    let txn = state.db.begin().await?;

    let existing = find_event(&txn, payload.id).await?;

    // Cross-field checks against the effective values.
    let effective_team_a = payload.team_a.unwrap_or(existing.team_a);
    let effective_team_b = payload.team_b.unwrap_or(existing.team_b);
    if effective_team_a == effective_team_b {
        return Err(AppError::Validation(
            "teamA and teamB must reference distinct players".into(),
        ));
    }
    let effective_start = payload.sale_start.unwrap_or(existing.sale_start);
    let effective_end = payload.sale_end.unwrap_or(existing.sale_end);
    if effective_start > 0 && effective_end < effective_start {
        return Err(AppError::Validation(
            "saleEnd must not be before saleStart".into(),
        ));
    }

    if let Some(category_id) = payload.category_id {
        find_category(&txn, category_id).await?;
    }
    if let Some(Some(tournament_id)) = payload.tournament_id {
        find_tournament(&txn, tournament_id).await?;
    }
    if let Some(team_a) = payload.team_a {
        find_player(&txn, team_a).await?;
    }
    if let Some(team_b) = payload.team_b {
        find_player(&txn, team_b).await?;
    }
    if let Some(token_id) = payload.token_id {
        find_token(&txn, token_id).await?;
    }
    if let Some(chain_id) = payload.chain_id {
        find_chain(&txn, chain_id).await?;
    }

    let mut active: event::ActiveModel = existing.into();

    if let Some(ref code) = payload.code {
        active.code = Set(code.trim().to_string());
    }
    if let Some(sale_start) = payload.sale_start {
        active.sale_start = Set(sale_start);
    }
    if let Some(sale_end) = payload.sale_end {
        active.sale_end = Set(sale_end);
    }
    if let Some(is_featured) = payload.is_featured {
        active.is_featured = Set(is_featured);
    }
    if let Some(is_deployed) = payload.is_deployed {
        active.is_deployed = Set(is_deployed);
    }
    if let Some(is_deleted) = payload.is_deleted {
        active.is_deleted = Set(is_deleted);
    }
    if let Some(category_id) = payload.category_id {
        active.category_id = Set(category_id);
    }
    match payload.tournament_id {
        Some(Some(tournament_id)) => active.tournament_id = Set(Some(tournament_id)),
        Some(None) => active.tournament_id = Set(None),
        None => {}
    }
    if let Some(team_a) = payload.team_a {
        active.team_a = Set(team_a);
    }
    if let Some(team_b) = payload.team_b {
        active.team_b = Set(team_b);
    }
    if let Some(token_id) = payload.token_id {
        active.token_id = Set(token_id);
    }
    if let Some(chain_id) = payload.chain_id {
        active.chain_id = Set(chain_id);
    }
    if let Some(ref conditions) = payload.conditions {
        active.conditions = Set(conditions_to_json(conditions));
    }
    match payload.handicap_team_a {
        Some(Some(h)) => active.handicap_team_a = Set(Some(h)),
        Some(None) => active.handicap_team_a = Set(None),
        None => {}
    }
    match payload.handicap_team_b {
        Some(Some(h)) => active.handicap_team_b = Set(Some(h)),
        Some(None) => active.handicap_team_b = Set(None),
        None => {}
    }
    active.updated_at = Set(chrono::Utc::now());

    let model = active.update(&txn).await?;
    txn.commit().await?;

    Ok(Json(model.into()))
}

async fn find_event<C: ConnectionTrait>(db: &C, id: i32) -> Result<event::Model, AppError> {
    event::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Event not found".into()))
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

async fn find_player<C: ConnectionTrait>(db: &C, id: i32) -> Result<player::Model, AppError> {
    player::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Player not found".into()))
}

async fn find_token<C: ConnectionTrait>(db: &C, id: i32) -> Result<token::Model, AppError> {
    token::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Token not found".into()))
}

async fn find_chain<C: ConnectionTrait>(db: &C, chain_id: i64) -> Result<chain::Model, AppError> {
    chain::Entity::find_by_id(chain_id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Chain not found".into()))
}

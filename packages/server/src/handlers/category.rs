use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::*;
use tracing::instrument;

use crate::entity::category;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AdminUser;
use crate::extractors::json::AppJson;
use crate::listing::{Envelope, Page, contains_ci, run_paged};
use crate::models::category::*;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/api/v1/list/categories",
    tag = "Categories",
    operation_id = "listCategories",
    summary = "List categories with pagination and search",
    params(CategoryListQuery),
    responses(
        (status = 200, description = "Paginated categories", body = Envelope<CategoryListItem>),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (EMAIL_NOT_ALLOWED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _admin, query))]
pub async fn list_categories(
    _admin: AdminUser,
    State(state): State<AppState>,
    Query(query): Query<CategoryListQuery>,
) -> Result<Json<Envelope<CategoryListItem>>, AppError> {
    let page = Page::from_params(&query.page, &query.limit, state.config.listing.default_limit);

    let mut select = category::Entity::find();

    if let Some(ref search) = query.search
        && let Some(expr) = contains_ci((category::Entity, category::Column::Name), search)
    {
        select = select.filter(expr);
    }

    let select = select
        .select_only()
        .column(category::Column::Id)
        .column(category::Column::Name)
        .column(category::Column::ImageUrl)
        .order_by_asc(category::Column::Id);

    let (data, metadata) =
        run_paged::<category::Entity, CategoryListItem>(&state.db, select, &page).await?;

    Ok(Json(Envelope { data, metadata }))
}

#[utoipa::path(
    post,
    path = "/api/v1/create/category",
    tag = "Categories",
    operation_id = "createCategory",
    summary = "Create a new category",
    request_body = CreateCategoryRequest,
    responses(
        (status = 201, description = "Category created", body = CategoryResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (EMAIL_NOT_ALLOWED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _admin, payload), fields(name = %payload.name))]
pub async fn create_category(
    _admin: AdminUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateCategoryRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_category(&payload)?;

    let now = chrono::Utc::now();
    let new_category = category::ActiveModel {
        name: Set(payload.name.trim().to_string()),
        image_url: Set(payload.image_url),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let model = new_category.insert(&state.db).await?;

    Ok((StatusCode::CREATED, Json(CategoryResponse::from(model))))
}

#[utoipa::path(
    put,
    path = "/api/v1/update/category",
    tag = "Categories",
    operation_id = "updateCategory",
    summary = "Update an existing category",
    request_body = UpdateCategoryRequest,
    responses(
        (status = 200, description = "Category updated", body = CategoryResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (EMAIL_NOT_ALLOWED)", body = ErrorBody),
        (status = 404, description = "Category not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _admin, payload), fields(id = %payload.id))]
pub async fn update_category(
    _admin: AdminUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<UpdateCategoryRequest>,
) -> Result<Json<CategoryResponse>, AppError> {
    validate_update_category(&payload)?;

    let txn = state.db.begin().await?;

    let existing = find_category(&txn, payload.id).await?;
    let mut active: category::ActiveModel = existing.into();

    if let Some(ref name) = payload.name {
        active.name = Set(name.trim().to_string());
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

async fn find_category<C: ConnectionTrait>(db: &C, id: i32) -> Result<category::Model, AppError> {
    category::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Category not found".into()))
}

use axum::Json;
use axum::extract::{Query, State};
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AdminUser;
use crate::models::upload::{UploadUrlQuery, UploadUrlResponse};
use crate::state::AppState;
use crate::utils::filename::validate_object_key;

#[utoipa::path(
    get,
    path = "/api/v1/upload-url",
    tag = "Uploads",
    operation_id = "getUploadUrl",
    summary = "Issue a pre-signed upload URL for an object key",
    description = "Returns a time-limited pre-signed PUT URL; the client uploads the \
        image directly to object storage.",
    params(UploadUrlQuery),
    responses(
        (status = 200, description = "Pre-signed PUT URL", body = UploadUrlResponse),
        (status = 400, description = "Missing or invalid key (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (EMAIL_NOT_ALLOWED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _admin, query))]
pub async fn upload_url(
    _admin: AdminUser,
    State(state): State<AppState>,
    Query(query): Query<UploadUrlQuery>,
) -> Result<Json<UploadUrlResponse>, AppError> {
    let name = query
        .name
        .as_deref()
        .ok_or_else(|| AppError::Validation("Missing 'name' query parameter".into()))?;
    let key = validate_object_key(name).map_err(|e| AppError::Validation(e.message().into()))?;

    let url = state.store.presign_put(key).await?;

    Ok(Json(UploadUrlResponse { url }))
}

#[utoipa::path(
    get,
    path = "/api/v1/image-url",
    tag = "Uploads",
    operation_id = "getImageUrl",
    summary = "Resolve the public URL of an uploaded object",
    params(UploadUrlQuery),
    responses(
        (status = 200, description = "Public object URL", body = UploadUrlResponse),
        (status = 400, description = "Missing or invalid key (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (EMAIL_NOT_ALLOWED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _admin, query))]
pub async fn image_url(
    _admin: AdminUser,
    State(state): State<AppState>,
    Query(query): Query<UploadUrlQuery>,
) -> Result<Json<UploadUrlResponse>, AppError> {
    let name = query
        .name
        .as_deref()
        .ok_or_else(|| AppError::Validation("Missing 'name' query parameter".into()))?;
    let key = validate_object_key(name).map_err(|e| AppError::Validation(e.message().into()))?;

    Ok(Json(UploadUrlResponse {
        url: state.store.public_url(key),
    }))
}

use axum::Json;
use axum::extract::{Query, State};
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AdminUser;
use crate::listing::{Envelope, Page, PageMeta};
use crate::models::outcome::*;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/api/v1/list/outcomes",
    tag = "Outcomes",
    operation_id = "listOutcomes",
    summary = "List the fixed outcome-label options",
    description = "Returns the static outcome labels the admin UI offers when \
        composing event conditions, in the standard list envelope.",
    params(OutcomeListQuery),
    responses(
        (status = 200, description = "Outcome options", body = Envelope<OutcomeOption>),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (EMAIL_NOT_ALLOWED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _admin, query))]
pub async fn list_outcomes(
    _admin: AdminUser,
    State(state): State<AppState>,
    Query(query): Query<OutcomeListQuery>,
) -> Result<Json<Envelope<OutcomeOption>>, AppError> {
    let page = Page::from_params(&query.page, &query.limit, state.config.listing.default_limit);

    let total = OUTCOME_OPTIONS.len() as u64;
    let data: Vec<OutcomeOption> = OUTCOME_OPTIONS
        .iter()
        .skip(page.offset() as usize)
        .take(page.limit as usize)
        .cloned()
        .collect();

    Ok(Json(Envelope {
        data,
        metadata: PageMeta::new(total, &page),
    }))
}

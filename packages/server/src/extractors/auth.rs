use axum::{extract::FromRequestParts, http::request::Parts};

use crate::error::AppError;
use crate::state::AppState;
use crate::utils::jwt;

/// Administrator extracted from the `Authorization: Bearer <token>` header.
///
/// Tokens are issued by the external identity provider and verified here
/// against the shared secret; the email claim must additionally be on the
/// configured admin allow-list. Add this as a handler parameter to gate an
/// endpoint.
pub struct AdminUser {
    pub email: String,
}

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("Authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or(AppError::TokenMissing)?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or(AppError::TokenInvalid)?;

        let claims = jwt::verify(token, &state.config.auth.jwt_secret)
            .map_err(|_| AppError::TokenInvalid)?;

        let allowed = state
            .config
            .auth
            .admin_emails
            .iter()
            .any(|e| e.eq_ignore_ascii_case(&claims.sub));
        if !allowed {
            tracing::warn!(email = %claims.sub, "rejected non-admin token");
            return Err(AppError::EmailNotAllowed);
        }

        Ok(AdminUser { email: claims.sub })
    }
}

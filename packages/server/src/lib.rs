pub mod config;
pub mod database;
pub mod entity;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod listing;
pub mod models;
pub mod routes;
pub mod seed;
pub mod state;
pub mod utils;

use std::time::Duration;

use axum::http::{HeaderValue, Method, header};
use tower_http::cors::{AllowOrigin, CorsLayer};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_scalar::{Scalar, Servable as ScalarServable};
use utoipa_swagger_ui::SwaggerUi;

use crate::config::CorsConfig;
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Versus Admin API",
        version = "1.0.0",
        description = "Admin backend for prediction-market reference data and events"
    ),
    paths(
        handlers::category::list_categories,
        handlers::category::create_category,
        handlers::category::update_category,
        handlers::tournament::list_tournaments,
        handlers::tournament::create_tournament,
        handlers::tournament::update_tournament,
        handlers::player::list_players,
        handlers::player::create_player,
        handlers::player::update_player,
        handlers::chain::list_chains,
        handlers::chain::create_chain,
        handlers::chain::update_chain,
        handlers::token::list_tokens,
        handlers::token::create_token,
        handlers::token::update_token,
        handlers::event::list_events,
        handlers::event::create_event,
        handlers::event::update_event,
        handlers::outcome::list_outcomes,
        handlers::upload::upload_url,
        handlers::upload::image_url,
    ),
    tags(
        (name = "Categories", description = "Category reference data"),
        (name = "Tournaments", description = "Tournament reference data"),
        (name = "Players", description = "Teams/competitors and their images"),
        (name = "Chains", description = "Supported chains"),
        (name = "Tokens", description = "Tokens per chain"),
        (name = "Events", description = "Event management"),
        (name = "Outcomes", description = "Static outcome-label options"),
        (name = "Uploads", description = "Pre-signed image upload URLs"),
    ),
    modifiers(&SecurityAddon),
)]
struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_default();
        components.add_security_scheme(
            "jwt",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

fn cors_layer(cfg: &CorsConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = cfg
        .allow_origins
        .iter()
        .filter_map(|o| o.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .max_age(Duration::from_secs(cfg.max_age))
}

/// Build the application router.
pub fn build_router(state: AppState) -> axum::Router {
    let api = ApiDoc::openapi();
    let cors = cors_layer(&state.config.server.cors);

    axum::Router::new()
        .nest("/api", routes::api_routes())
        .with_state(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api.clone()))
        .merge(Scalar::with_url("/scalar", api))
        .layer(cors)
}

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::handlers;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(list_routes())
        .merge(create_routes())
        .merge(update_routes())
        .merge(upload_routes())
}

fn list_routes() -> Router<AppState> {
    Router::new()
        .route("/list/categories", get(handlers::category::list_categories))
        .route(
            "/list/tournaments",
            get(handlers::tournament::list_tournaments),
        )
        .route("/list/players", get(handlers::player::list_players))
        .route("/list/chains", get(handlers::chain::list_chains))
        .route("/list/tokens", get(handlers::token::list_tokens))
        .route("/list/events", get(handlers::event::list_events))
        .route("/list/outcomes", get(handlers::outcome::list_outcomes))
}

fn create_routes() -> Router<AppState> {
    Router::new()
        .route("/create/category", post(handlers::category::create_category))
        .route(
            "/create/tournament",
            post(handlers::tournament::create_tournament),
        )
        .route("/create/player", post(handlers::player::create_player))
        .route("/create/chain", post(handlers::chain::create_chain))
        .route("/create/token", post(handlers::token::create_token))
        .route("/create/event", post(handlers::event::create_event))
}

fn update_routes() -> Router<AppState> {
    Router::new()
        .route("/update/category", put(handlers::category::update_category))
        .route(
            "/update/tournament",
            put(handlers::tournament::update_tournament),
        )
        .route("/update/player", put(handlers::player::update_player))
        .route("/update/chain", put(handlers::chain::update_chain))
        .route("/update/token", put(handlers::token::update_token))
        .route("/update/event", put(handlers::event::update_event))
}

fn upload_routes() -> Router<AppState> {
    Router::new()
        .route("/upload-url", get(handlers::upload::upload_url))
        .route("/image-url", get(handlers::upload::image_url))
}

//! HTTP API for the poker session server.
//!
//! A game is created with `POST /api/newgame` and then driven through
//! its stages with `PUT` requests. Every game response is a projection;
//! the undealt deck never appears in a payload.
//!
//! # Endpoints
//!
//! ```text
//! GET  /health                        - Health check
//! POST /api/newgame                   - Create a game, returns its id
//! GET  /api/game/{id}                 - Current game state
//! PUT  /api/game/{id}/addplayer       - Seat a player
//! PUT  /api/game/{id}/dealcards       - Deal hole cards
//! PUT  /api/game/{id}/flop            - Reveal the flop
//! PUT  /api/game/{id}/turn            - Reveal the turn
//! PUT  /api/game/{id}/river           - Reveal the river
//! ```

pub mod games;

use std::sync::Arc;

use axum::{
    Router,
    extract::State,
    response::{IntoResponse, Json},
    routing::{get, post, put},
};
use poker_app::GameService;
use serde_json::json;
use tower_http::cors::CorsLayer;

/// Application state shared across all HTTP handlers. Cloned per
/// request, which is cheap thanks to the `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<GameService>,
}

/// Create the API router with all endpoints and middleware.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/newgame", post(games::create_game))
        .route("/api/game/{game_id}", get(games::get_game))
        .route("/api/game/{game_id}/addplayer", put(games::add_player))
        .route("/api/game/{game_id}/dealcards", put(games::deal_cards))
        .route("/api/game/{game_id}/flop", put(games::do_flop))
        .route("/api/game/{game_id}/turn", put(games::do_turn))
        .route("/api/game/{game_id}/river", put(games::do_river))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint for monitoring and load balancers.
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "games": state.service.game_count(),
    }))
}

//! Game session API handlers.
//!
//! Maps the REST surface onto the core's operations and the core's two
//! error kinds onto HTTP status codes: `NotFound` becomes 404 and
//! `InvalidStage` becomes 409. Clients only ever see the error message,
//! never internal detail.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use log::debug;
use poker_app::{GameError, GameErrorKind, GameId, GameView};
use serde::{Deserialize, Serialize};

use super::AppState;

#[derive(Debug, Deserialize)]
pub struct AddPlayerRequest {
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

/// Create a new game session.
///
/// Returns `201 Created` with the new game's id as the body; the full
/// state can then be fetched via `GET /api/game/{id}`.
pub async fn create_game(State(state): State<AppState>) -> (StatusCode, Json<GameId>) {
    let game = state.service.create_game();
    (StatusCode::CREATED, Json(game.id))
}

/// Get the current state of a game.
///
/// # Response
///
/// Returns `200 OK` with the game projection:
/// ```json
/// {
///   "id": 0,
///   "players": [{"id": "00", "name": "alice", "hand": []}],
///   "stage": "deal",
///   "communityCards": []
/// }
/// ```
///
/// # Errors
///
/// - `404 Not Found`: no game with this id
pub async fn get_game(
    State(state): State<AppState>,
    Path(game_id): Path<i64>,
) -> Result<Json<GameView>, ApiError> {
    let id = parse_game_id(game_id)?;
    state.service.get_game(id).map(Json).map_err(error_response)
}

/// Seat a new player. Only legal while the game is in the deal stage.
///
/// # Errors
///
/// - `404 Not Found`: no game with this id
/// - `409 Conflict`: the game is past the deal stage, or full
pub async fn add_player(
    State(state): State<AppState>,
    Path(game_id): Path<i64>,
    Json(request): Json<AddPlayerRequest>,
) -> Result<Json<GameView>, ApiError> {
    let id = parse_game_id(game_id)?;
    state
        .service
        .add_player(id, &request.name)
        .map(Json)
        .map_err(error_response)
}

/// Deal two hole cards to every player and advance to the flop.
///
/// # Errors
///
/// - `404 Not Found`: no game with this id
/// - `409 Conflict`: wrong stage, or fewer than two players seated
pub async fn deal_cards(
    State(state): State<AppState>,
    Path(game_id): Path<i64>,
) -> Result<Json<GameView>, ApiError> {
    let id = parse_game_id(game_id)?;
    state.service.deal_cards(id).map(Json).map_err(error_response)
}

/// Reveal the flop: three community cards.
pub async fn do_flop(
    State(state): State<AppState>,
    Path(game_id): Path<i64>,
) -> Result<Json<GameView>, ApiError> {
    let id = parse_game_id(game_id)?;
    state.service.do_flop(id).map(Json).map_err(error_response)
}

/// Reveal the turn card.
pub async fn do_turn(
    State(state): State<AppState>,
    Path(game_id): Path<i64>,
) -> Result<Json<GameView>, ApiError> {
    let id = parse_game_id(game_id)?;
    state.service.do_turn(id).map(Json).map_err(error_response)
}

/// Reveal the river card, moving the game to showdown.
pub async fn do_river(
    State(state): State<AppState>,
    Path(game_id): Path<i64>,
) -> Result<Json<GameView>, ApiError> {
    let id = parse_game_id(game_id)?;
    state.service.do_river(id).map(Json).map_err(error_response)
}

/// The core's ids are unsigned, so anything negative can only name a
/// game that does not exist.
fn parse_game_id(raw: i64) -> Result<GameId, ApiError> {
    usize::try_from(raw).map_err(|_| {
        (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: format!("game {raw} does not exist"),
            }),
        )
    })
}

fn error_response(err: GameError) -> ApiError {
    let status = match err.kind() {
        GameErrorKind::NotFound => StatusCode::NOT_FOUND,
        GameErrorKind::InvalidStage => StatusCode::CONFLICT,
    };
    debug!("request rejected: {err}");
    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
}

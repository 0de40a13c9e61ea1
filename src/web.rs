use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};

use crate::board::{BOARD_SIZE, Color, Move, Position};
use crate::config::ServerConfig;
use crate::game::{GameError, GameMode, GameState, MoveOutcome};

#[derive(Clone)]
pub struct AppState {
    game: Arc<Mutex<GameState>>,
}

#[derive(Serialize, Deserialize)]
pub struct NewGameRequest {
    #[serde(default)]
    mode: GameMode,
}

#[derive(Serialize, Deserialize)]
pub struct SquareRequest {
    row: usize,
    col: usize,
}

#[derive(Serialize, Clone, Copy)]
pub struct SquareResponse {
    row: usize,
    col: usize,
}

#[derive(Serialize, Clone, Copy)]
pub struct MoveResponse {
    to_row: usize,
    to_col: usize,
    capture: Option<SquareResponse>,
}

#[derive(Serialize)]
pub struct GameResponse {
    board: Vec<Vec<String>>,
    turn: String,
    mode: GameMode,
    selected: Option<SquareResponse>,
    chain: Option<SquareResponse>,
    forced: Vec<SquareResponse>,
    selectable: Vec<SquareResponse>,
    legal_moves: Vec<MoveResponse>,
    red_count: usize,
    black_count: usize,
    winner: Option<String>,
    message: String,
}

impl AppState {
    pub fn new() -> Self {
        AppState {
            game: Arc::new(Mutex::new(GameState::new(GameMode::Standard))),
        }
    }

    /// The game is only ever mutated under this lock
    fn lock(&self) -> MutexGuard<'_, GameState> {
        self.game.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Position> for SquareResponse {
    fn from(pos: Position) -> Self {
        SquareResponse {
            row: pos.row,
            col: pos.col,
        }
    }
}

impl From<&Move> for MoveResponse {
    fn from(mv: &Move) -> Self {
        MoveResponse {
            to_row: mv.to.row,
            to_col: mv.to.col,
            capture: mv.captured.map(SquareResponse::from),
        }
    }
}

fn color_to_string(color: Color) -> String {
    color.name().to_string()
}

fn snapshot(game: &GameState, message: String) -> GameResponse {
    let board = (0..BOARD_SIZE)
        .map(|row| {
            (0..BOARD_SIZE)
                .map(|col| match game.board().get(Position::new(row, col)) {
                    Some(piece) => piece.symbol().to_string(),
                    None => ".".to_string(),
                })
                .collect()
        })
        .collect();

    let status = game.status();

    GameResponse {
        board,
        turn: color_to_string(game.turn()),
        mode: game.mode(),
        selected: game.selected().map(SquareResponse::from),
        chain: game.chain_square().map(SquareResponse::from),
        forced: game.forced_squares().iter().copied().map(SquareResponse::from).collect(),
        selectable: game
            .selectable_squares()
            .into_iter()
            .map(SquareResponse::from)
            .collect(),
        legal_moves: game.legal_moves().iter().map(MoveResponse::from).collect(),
        red_count: status.red_count,
        black_count: status.black_count,
        winner: status.winner.map(color_to_string),
        message,
    }
}

fn error_response(err: GameError) -> Response {
    warn!(kind = err.kind(), "rejected: {}", err);
    (
        StatusCode::BAD_REQUEST,
        Json(serde_json::json!({
            "error": err.to_string(),
            "kind": err.kind(),
        })),
    )
        .into_response()
}

#[axum::debug_handler]
async fn new_game(State(app_state): State<AppState>, Json(req): Json<NewGameRequest>) -> Response {
    let mut game = app_state.lock();
    *game = GameState::new(req.mode);
    info!(mode = req.mode.name(), "new game");

    let message = format!("{} game started. Red to move.", req.mode.name());
    Json(snapshot(&game, message)).into_response()
}

#[axum::debug_handler]
async fn select(State(app_state): State<AppState>, Json(req): Json<SquareRequest>) -> Response {
    let mut game = app_state.lock();
    let pos = Position::new(req.row, req.col);

    let message = match game.select_square(pos) {
        Ok(moves) => format!("{} legal move(s) from {}", moves.len(), pos),
        Err(e) => return error_response(e),
    };
    debug!(square = %pos, "selected");

    Json(snapshot(&game, message)).into_response()
}

#[axum::debug_handler]
async fn make_move(State(app_state): State<AppState>, Json(req): Json<SquareRequest>) -> Response {
    let mut game = app_state.lock();
    let to = Position::new(req.row, req.col);

    let message = match game.apply_move(to) {
        Ok(MoveOutcome::ChainContinues) => format!("Capture again from {}", to),
        Ok(MoveOutcome::TurnPassed) => format!("{}'s turn", game.turn()),
        Ok(MoveOutcome::GameWon(winner)) => match game.mode() {
            GameMode::Standard => format!("{} wins!", winner),
            GameMode::Suicide => format!("{} wins! (All pieces gone)", winner),
        },
        Err(e) => return error_response(e),
    };
    debug!(square = %to, %message, "move applied");

    Json(snapshot(&game, message)).into_response()
}

async fn get_game_state(State(app_state): State<AppState>) -> Json<GameResponse> {
    let game = app_state.lock();
    Json(snapshot(&game, String::new()))
}

pub fn router(app_state: AppState) -> Router {
    Router::new()
        .route("/api/new-game", post(new_game))
        .route("/api/select", post(select))
        .route("/api/move", post(make_move))
        .route("/api/game-state", get(get_game_state))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(app_state)
}

pub async fn run_server(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let app = router(AppState::new());

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    info!(addr = %config.addr, "checkers server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::board::{Board, Color, Move, Position};
use crate::movegen::{forced_squares, generate_moves, generate_moves_for};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    /// Last side with pieces wins
    #[default]
    Standard,
    /// First side to lose all its pieces wins
    Suicide,
}

impl GameMode {
    pub fn name(&self) -> &str {
        match self {
            GameMode::Standard => "Standard",
            GameMode::Suicide => "Suicide",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("Invalid selection: {0} does not hold a piece of the side to move")]
    InvalidSelection(Position),
    #[error("You must capture: {0} has no capture while one is mandatory")]
    MustCapture(Position),
    #[error("Illegal move: {0} is not a legal destination")]
    IllegalMove(Position),
    #[error("Game already over")]
    GameOver,
}

impl GameError {
    pub fn kind(&self) -> &str {
        match self {
            GameError::InvalidSelection(_) => "InvalidSelection",
            GameError::MustCapture(_) => "MustCapture",
            GameError::IllegalMove(_) => "IllegalMove",
            GameError::GameOver => "GameOver",
        }
    }
}

/// What happened after a move was applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MoveOutcome {
    /// The same piece must capture again; the turn does not pass
    ChainContinues,
    TurnPassed,
    GameWon(Color),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameStatus {
    pub red_count: usize,
    pub black_count: usize,
    pub winner: Option<Color>,
}

/// Decide the winner from the piece counts alone. Both counts at zero is left
/// unresolved here; see [`GameState`] for the tie-break.
pub fn evaluate_winner(red_count: usize, black_count: usize, mode: GameMode) -> Option<Color> {
    match (red_count, black_count, mode) {
        (0, 0, _) => None,
        (0, _, GameMode::Standard) => Some(Color::Black),
        (_, 0, GameMode::Standard) => Some(Color::Red),
        (0, _, GameMode::Suicide) => Some(Color::Red),
        (_, 0, GameMode::Suicide) => Some(Color::Black),
        _ => None,
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    board: Board,
    turn: Color,
    mode: GameMode,
    /// Square of the piece in the middle of a multi-jump
    chain: Option<Position>,
    /// Squares of the side to move that can capture, computed once per turn
    forced: Vec<Position>,
    selected: Option<Position>,
    legal_moves: Vec<Move>,
    winner: Option<Color>,
    move_count: usize,
}

impl GameState {
    /// Create a new game from the standard opening position. Red moves first.
    pub fn new(mode: GameMode) -> Self {
        Self::from_board(Board::initial(), Color::Red, mode)
    }

    /// Start a game from an arbitrary position
    pub fn from_board(board: Board, turn: Color, mode: GameMode) -> Self {
        let forced = forced_squares(&board, turn);
        let winner = evaluate_winner(board.count(Color::Red), board.count(Color::Black), mode);

        GameState {
            board,
            turn,
            mode,
            chain: None,
            forced,
            selected: None,
            legal_moves: Vec::new(),
            winner,
            move_count: 0,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn turn(&self) -> Color {
        self.turn
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn chain_square(&self) -> Option<Position> {
        self.chain
    }

    pub fn forced_squares(&self) -> &[Position] {
        &self.forced
    }

    pub fn selected(&self) -> Option<Position> {
        self.selected
    }

    /// Legal destinations of the current selection
    pub fn legal_moves(&self) -> &[Move] {
        &self.legal_moves
    }

    pub fn winner(&self) -> Option<Color> {
        self.winner
    }

    pub fn is_game_over(&self) -> bool {
        self.winner.is_some()
    }

    pub fn move_count(&self) -> usize {
        self.move_count
    }

    pub fn status(&self) -> GameStatus {
        GameStatus {
            red_count: self.board.count(Color::Red),
            black_count: self.board.count(Color::Black),
            winner: self.winner,
        }
    }

    /// Squares the side to move may currently select
    pub fn selectable_squares(&self) -> Vec<Position> {
        if self.is_game_over() {
            return Vec::new();
        }

        if let Some(chain) = self.chain {
            return vec![chain];
        }

        if !self.forced.is_empty() {
            return self.forced.clone();
        }

        self.board
            .pieces()
            .filter(|(_, piece)| piece.color == self.turn)
            .map(|(pos, _)| pos)
            .collect()
    }

    fn captures_only(&self) -> bool {
        self.chain.is_some() || !self.forced.is_empty()
    }

    /// Select a piece of the side to move and compute its legal destinations.
    /// On error the state is left untouched.
    pub fn select_square(&mut self, pos: Position) -> Result<&[Move], GameError> {
        if self.is_game_over() {
            return Err(GameError::GameOver);
        }

        let owned = self
            .board
            .get(pos)
            .is_some_and(|piece| piece.color == self.turn);

        // During a chain only the chained piece may be picked, friend or not
        match self.chain {
            Some(chain) if chain != pos => {
                return Err(if owned {
                    GameError::MustCapture(pos)
                } else {
                    GameError::InvalidSelection(pos)
                });
            }
            _ => {}
        }

        if !owned {
            return Err(GameError::InvalidSelection(pos));
        }

        if self.chain.is_none() && !self.forced.is_empty() && !self.forced.contains(&pos) {
            return Err(GameError::MustCapture(pos));
        }

        let mut moves = generate_moves(&self.board, pos);
        if self.captures_only() {
            moves.retain(Move::is_capture);
        }

        self.selected = Some(pos);
        self.legal_moves = moves;

        Ok(&self.legal_moves)
    }

    /// Move the selected piece to `to`. The destination must be one of the
    /// moves computed by the last selection; on error nothing changes.
    pub fn apply_move(&mut self, to: Position) -> Result<MoveOutcome, GameError> {
        if self.is_game_over() {
            return Err(GameError::GameOver);
        }

        let (Some(from), Some(mv)) = (
            self.selected,
            self.legal_moves.iter().copied().find(|m| m.to == to),
        ) else {
            return Err(GameError::IllegalMove(to));
        };

        let Some(piece) = self.board.get(from) else {
            return Err(GameError::IllegalMove(to));
        };

        // Promotion is judged on the landing square, capture or not
        let piece = piece.promoted_on(to.row);
        self.board.clear(from);
        self.board.set(to, Some(piece));

        if let Some(captured) = mv.captured {
            self.board.clear(captured);
        }

        self.move_count += 1;

        if mv.is_capture() {
            let follow_ups: Vec<Move> = generate_moves_for(&self.board, to, piece)
                .into_iter()
                .filter(Move::is_capture)
                .collect();

            if !follow_ups.is_empty() {
                debug!(square = %to, "chain continues");
                self.chain = Some(to);
                self.selected = Some(to);
                self.legal_moves = follow_ups;
                return Ok(MoveOutcome::ChainContinues);
            }
        }

        Ok(self.end_turn())
    }

    fn end_turn(&mut self) -> MoveOutcome {
        let mover = self.turn;

        self.chain = None;
        self.selected = None;
        self.legal_moves.clear();
        self.turn = mover.opponent();
        self.forced = forced_squares(&self.board, self.turn);

        let status = self.status();
        self.winner = match (status.red_count, status.black_count) {
            // Mover advantage when both sides are wiped out at once
            (0, 0) => Some(mover),
            (red, black) => evaluate_winner(red, black, self.mode),
        };

        match self.winner {
            Some(winner) => {
                debug!(%winner, mode = self.mode.name(), "game over");
                MoveOutcome::GameWon(winner)
            }
            None => {
                debug!(turn = %self.turn, forced = self.forced.len(), "turn passed");
                MoveOutcome::TurnPassed
            }
        }
    }

    /// Get a string representation of the board
    pub fn display_board(&self) -> String {
        let mut result = String::new();
        result.push_str(&format!(
            "[{}] {} to move\n",
            self.mode.name(),
            self.turn.name()
        ));
        result.push_str(&self.board.to_string());
        result
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(GameMode::Standard)
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;

/// Board size constant
pub const BOARD_SIZE: usize = 8;

/// The four diagonal directions, as (row delta, col delta)
pub const DIAGONALS: [(i32, i32); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Red,
    Black,
}

impl Color {
    pub fn opponent(&self) -> Color {
        match self {
            Color::Red => Color::Black,
            Color::Black => Color::Red,
        }
    }

    /// Row on which a simple piece of this color is promoted
    pub fn promotion_row(&self) -> usize {
        match self {
            Color::Red => 0,
            Color::Black => BOARD_SIZE - 1,
        }
    }

    /// Row delta pointing away from this color's back row
    pub fn forward(&self) -> i32 {
        match self {
            Color::Red => -1,
            Color::Black => 1,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Color::Red => "Red",
            Color::Black => "Black",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rank {
    Simple,
    King,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub color: Color,
    pub rank: Rank,
}

impl Piece {
    pub fn new(color: Color, rank: Rank) -> Self {
        Piece { color, rank }
    }

    pub fn simple(color: Color) -> Self {
        Piece::new(color, Rank::Simple)
    }

    pub fn king(color: Color) -> Self {
        Piece::new(color, Rank::King)
    }

    pub fn is_king(&self) -> bool {
        self.rank == Rank::King
    }

    pub fn is_enemy_of(&self, other: Piece) -> bool {
        self.color != other.color
    }

    /// The piece after landing on `row`. Only simple pieces reaching their
    /// promotion row change; kings stay kings.
    pub fn promoted_on(self, row: usize) -> Piece {
        if self.rank == Rank::Simple && row == self.color.promotion_row() {
            Piece::king(self.color)
        } else {
            self
        }
    }

    /// Single-character symbol: lowercase for simple pieces, uppercase for kings
    pub fn symbol(&self) -> char {
        match (self.color, self.rank) {
            (Color::Red, Rank::Simple) => 'r',
            (Color::Red, Rank::King) => 'R',
            (Color::Black, Rank::Simple) => 'b',
            (Color::Black, Rank::King) => 'B',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Position { row, col }
    }

    pub fn is_on_board(&self) -> bool {
        self.row < BOARD_SIZE && self.col < BOARD_SIZE
    }

    /// Dark squares are the only squares pieces ever occupy
    pub fn is_dark(&self) -> bool {
        (self.row + self.col) % 2 == 1
    }

    /// The square `distance` steps along `(dr, dc)`, if it is on the board
    pub fn offset(&self, dr: i32, dc: i32, distance: i32) -> Option<Position> {
        let r = self.row as i32 + dr * distance;
        let c = self.col as i32 + dc * distance;

        if r < 0 || r >= BOARD_SIZE as i32 || c < 0 || c >= BOARD_SIZE as i32 {
            return None;
        }

        Some(Position::new(r as usize, c as usize))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// A candidate move for the piece on some origin square. The origin is
/// implied by whoever generated it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub to: Position,
    /// The single enemy piece removed by this move, if it is a capture
    pub captured: Option<Position>,
}

impl Move {
    pub fn walk(to: Position) -> Self {
        Move { to, captured: None }
    }

    pub fn capture(to: Position, captured: Position) -> Self {
        Move {
            to,
            captured: Some(captured),
        }
    }

    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.captured {
            Some(captured) => write!(f, "x{} -> {}", captured, self.to),
            None => write!(f, "-> {}", self.to),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    cells: [[Option<Piece>; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    pub fn empty() -> Self {
        Board {
            cells: [[None; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    /// Standard opening layout: black on rows 0-2, red on rows 5-7,
    /// dark squares only.
    pub fn initial() -> Self {
        let mut board = Board::empty();

        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                let pos = Position::new(row, col);
                if !pos.is_dark() {
                    continue;
                }
                if row < 3 {
                    board.set(pos, Some(Piece::simple(Color::Black)));
                } else if row > 4 {
                    board.set(pos, Some(Piece::simple(Color::Red)));
                }
            }
        }

        board
    }

    pub fn get(&self, pos: Position) -> Option<Piece> {
        if pos.is_on_board() {
            self.cells[pos.row][pos.col]
        } else {
            None
        }
    }

    /// Off-board writes are ignored
    pub fn set(&mut self, pos: Position, piece: Option<Piece>) {
        if pos.is_on_board() {
            self.cells[pos.row][pos.col] = piece;
        }
    }

    pub fn clear(&mut self, pos: Position) {
        self.set(pos, None);
    }

    /// All occupied squares with their pieces, row-major
    pub fn pieces(&self) -> impl Iterator<Item = (Position, Piece)> + '_ {
        (0..BOARD_SIZE).flat_map(move |row| {
            (0..BOARD_SIZE).filter_map(move |col| {
                let pos = Position::new(row, col);
                self.get(pos).map(|piece| (pos, piece))
            })
        })
    }

    pub fn count(&self, color: Color) -> usize {
        self.pieces()
            .filter(|(_, piece)| piece.color == color)
            .count()
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::initial()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "   ")?;
        for col in 0..BOARD_SIZE {
            write!(f, "{:2} ", col)?;
        }
        writeln!(f)?;

        for row in 0..BOARD_SIZE {
            write!(f, "{:2} ", row)?;
            for col in 0..BOARD_SIZE {
                let c = match self.get(Position::new(row, col)) {
                    Some(piece) => piece.symbol(),
                    None => '.',
                };
                write!(f, " {} ", c)?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

//! Move generation for single pieces and the board-wide forced capture scan.
//!
//! Both functions are pure: they know nothing about selection or chains.
//! Filtering walks out when a capture is mandatory is the caller's job.

use crate::board::{Board, Color, DIAGONALS, Move, Piece, Position, Rank};

/// Every candidate move for the piece on `from`, grouped by direction.
/// An empty square yields no moves.
pub fn generate_moves(board: &Board, from: Position) -> Vec<Move> {
    match board.get(from) {
        Some(piece) => generate_moves_for(board, from, piece),
        None => Vec::new(),
    }
}

/// Like [`generate_moves`], but for `piece` standing on `from` regardless of
/// what the board holds there.
pub fn generate_moves_for(board: &Board, from: Position, piece: Piece) -> Vec<Move> {
    match piece.rank {
        Rank::Simple => simple_moves(board, from, piece),
        Rank::King => king_moves(board, from, piece),
    }
}

/// Simple pieces capture in all four diagonals but walk forward only.
fn simple_moves(board: &Board, from: Position, piece: Piece) -> Vec<Move> {
    let mut moves = Vec::new();

    for &(dr, dc) in &DIAGONALS {
        let (Some(over), Some(landing)) = (from.offset(dr, dc, 1), from.offset(dr, dc, 2)) else {
            continue;
        };

        let jumps_enemy = board
            .get(over)
            .is_some_and(|target| target.is_enemy_of(piece));

        if jumps_enemy && board.get(landing).is_none() {
            moves.push(Move::capture(landing, over));
        }
    }

    let forward = piece.color.forward();
    for dc in [-1, 1] {
        if let Some(to) = from.offset(forward, dc, 1) {
            if board.get(to).is_none() {
                moves.push(Move::walk(to));
            }
        }
    }

    moves
}

/// Flying king: slides any distance, and may capture the first enemy on a
/// line by landing on any empty square beyond it. A second piece behind the
/// captured one ends the line.
fn king_moves(board: &Board, from: Position, piece: Piece) -> Vec<Move> {
    let mut moves = Vec::new();

    for &(dr, dc) in &DIAGONALS {
        let mut captured: Option<Position> = None;
        let mut distance = 1;

        while let Some(to) = from.offset(dr, dc, distance) {
            distance += 1;

            match (board.get(to), captured) {
                (None, None) => moves.push(Move::walk(to)),
                (None, Some(enemy)) => moves.push(Move::capture(to, enemy)),
                // Never two pieces on one line
                (Some(_), Some(_)) => break,
                (Some(target), None) if target.is_enemy_of(piece) => captured = Some(to),
                // Blocked by own piece
                (Some(_), None) => break,
            }
        }
    }

    moves
}

/// Squares holding a piece of `turn` that has at least one capture, row-major.
pub fn forced_squares(board: &Board, turn: Color) -> Vec<Position> {
    board
        .pieces()
        .filter(|(_, piece)| piece.color == turn)
        .filter(|&(pos, piece)| {
            generate_moves_for(board, pos, piece)
                .iter()
                .any(Move::is_capture)
        })
        .map(|(pos, _)| pos)
        .collect()
}

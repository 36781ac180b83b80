//! Move legality, enumeration and capture resolution.

use crate::board::{BOARD_SIZE, Board, check_bounds, in_bounds};
use crate::error::{EngineError, Result};
use crate::types::{Cell, Position, Side};

const DIRECTIONS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Returns whether `side` may place a disc at `(row, col)`.
/// Out-of-range coordinates are never legal.
pub fn is_legal_move(board: &Board, side: Side, row: usize, col: usize) -> bool {
    if check_bounds(row, col).is_err() || board.cell(row, col) != Cell::Empty {
        return false;
    }
    DIRECTIONS
        .iter()
        .any(|&(dr, dc)| bracket_len(board, side, row, col, dr, dc) > 0)
}

/// All legal moves for `side` in row-major order.
pub fn legal_moves(board: &Board, side: Side) -> Vec<Position> {
    let mut moves = Vec::new();
    for row in 0..BOARD_SIZE {
        for col in 0..BOARD_SIZE {
            if is_legal_move(board, side, row, col) {
                moves.push(Position::new(row as u8, col as u8));
            }
        }
    }
    moves
}

pub fn has_any_legal_move(board: &Board, side: Side) -> bool {
    (0..BOARD_SIZE).any(|row| (0..BOARD_SIZE).any(|col| is_legal_move(board, side, row, col)))
}

/// Cells that a disc of `side` at `(row, col)` would flip, judged on the board as it
/// stands. Empty when the target is occupied or brackets nothing.
pub fn collect_flips(board: &Board, side: Side, row: usize, col: usize) -> Vec<Position> {
    if check_bounds(row, col).is_err() || board.cell(row, col) != Cell::Empty {
        return Vec::new();
    }
    bracketed_runs(board, side, row, col)
}

/// Places a disc for `side` and flips every bracketed run.
///
/// Caller contract: the move is legal. Nothing is re-validated here; the search and
/// the turn controller only pass moves taken from [`legal_moves`] or checked by
/// [`try_apply_move`]. Returns the flipped cells.
pub fn apply_move(board: &mut Board, side: Side, row: usize, col: usize) -> Vec<Position> {
    // Every direction is judged against the pre-move position before anything changes.
    let flips = bracketed_runs(board, side, row, col);

    board.put(row, col, side.cell());
    for pos in &flips {
        board.put(pos.row as usize, pos.col as usize, side.cell());
    }
    flips
}

/// Validating variant of [`apply_move`].
pub fn try_apply_move(board: &mut Board, side: Side, row: usize, col: usize) -> Result<Vec<Position>> {
    check_bounds(row, col)?;
    if !is_legal_move(board, side, row, col) {
        return Err(EngineError::IllegalMove { row, col });
    }
    Ok(apply_move(board, side, row, col))
}

fn bracketed_runs(board: &Board, side: Side, row: usize, col: usize) -> Vec<Position> {
    let mut flips = Vec::new();
    for (dr, dc) in DIRECTIONS {
        let run = bracket_len(board, side, row, col, dr, dc);
        for step in 1..=run as i32 {
            flips.push(Position::new(
                (row as i32 + dr * step) as u8,
                (col as i32 + dc * step) as u8,
            ));
        }
    }
    flips
}

/// Length of the opponent run starting next to `(row, col)` in direction `(dr, dc)`
/// that is closed by a disc of `side`. Zero when the run is empty or left open.
fn bracket_len(board: &Board, side: Side, row: usize, col: usize, dr: i32, dc: i32) -> usize {
    let me = side.cell();
    let opp = side.opponent().cell();
    let mut r = row as i32 + dr;
    let mut c = col as i32 + dc;
    let mut run = 0usize;

    while in_bounds(r, c) {
        let cell = board.cell(r as usize, c as usize);
        if cell == opp {
            run += 1;
        } else if cell == me {
            return run;
        } else {
            return 0;
        }
        r += dr;
        c += dc;
    }
    0
}

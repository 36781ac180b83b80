//! Depth-limited minimax with alpha-beta pruning.
//!
//! The maximizing branch moves for light and picks the child with the largest
//! [`score`](crate::ai::eval::score) (dark minus light); the minimizing branch moves for
//! dark and picks the smallest. A side without a legal move passes, and the pass costs
//! one unit of depth.

use tracing::debug;
use web_time::{Duration, Instant};

use crate::ai::eval::score;
use crate::board::Board;
use crate::rules::{apply_move, has_any_legal_move, legal_moves};
use crate::types::{Position, Side};

pub const MIN_SCORE: i32 = i32::MIN;
pub const MAX_SCORE: i32 = i32::MAX;

/// Search value together with the recommended move (`None` at leaves).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    pub value: i32,
    pub best_move: Option<Position>,
}

impl SearchResult {
    fn leaf(value: i32) -> Self {
        Self {
            value,
            best_move: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes entered, root included.
    pub nodes: u64,
    /// Times the remaining siblings were skipped because `beta <= alpha`.
    pub cutoffs: u64,
    pub elapsed: Duration,
}

/// Runs the search from `board` and returns the best `(value, move)` found.
///
/// Ties keep the first move in row-major order: a later move replaces the current best
/// only when strictly better.
pub fn search(board: &Board, depth: u8, maximizing: bool, alpha: i32, beta: i32) -> SearchResult {
    let mut stats = SearchStats::default();
    alphabeta(board, depth, maximizing, alpha, beta, &mut stats)
}

/// Fixed-depth searcher that keeps statistics of its last run.
#[derive(Debug, Clone)]
pub struct Searcher {
    depth: u8,
    stats: SearchStats,
}

impl Searcher {
    pub fn new(depth: u8) -> Self {
        Self {
            depth,
            stats: SearchStats::default(),
        }
    }

    pub fn depth(&self) -> u8 {
        self.depth
    }

    /// Searches on behalf of `side` with the full window.
    pub fn search(&mut self, board: &Board, side: Side) -> SearchResult {
        let start = Instant::now();
        let mut stats = SearchStats::default();
        let maximizing = side == Side::Light;

        let result = alphabeta(board, self.depth, maximizing, MIN_SCORE, MAX_SCORE, &mut stats);

        stats.elapsed = start.elapsed();
        self.stats = stats;
        debug!(
            ?side,
            depth = self.depth,
            value = result.value,
            best_move = ?result.best_move,
            nodes = stats.nodes,
            cutoffs = stats.cutoffs,
            elapsed_ms = stats.elapsed.as_millis() as u64,
            "search finished"
        );
        result
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }
}

fn alphabeta(
    board: &Board,
    depth: u8,
    maximizing: bool,
    mut alpha: i32,
    mut beta: i32,
    stats: &mut SearchStats,
) -> SearchResult {
    stats.nodes += 1;

    if depth == 0
        || (!has_any_legal_move(board, Side::Dark) && !has_any_legal_move(board, Side::Light))
    {
        return SearchResult::leaf(score(board));
    }

    let side = if maximizing { Side::Light } else { Side::Dark };
    let moves = legal_moves(board, side);
    if moves.is_empty() {
        return alphabeta(board, depth - 1, !maximizing, alpha, beta, stats);
    }

    let mut best = SearchResult::leaf(if maximizing { MIN_SCORE } else { MAX_SCORE });

    for mv in moves {
        let mut next = *board;
        apply_move(&mut next, side, mv.row as usize, mv.col as usize);
        let value = alphabeta(&next, depth - 1, !maximizing, alpha, beta, stats).value;

        if maximizing {
            if value > best.value {
                best = SearchResult {
                    value,
                    best_move: Some(mv),
                };
            }
            alpha = alpha.max(value);
        } else {
            if value < best.value {
                best = SearchResult {
                    value,
                    best_move: Some(mv),
                };
            }
            beta = beta.min(value);
        }

        if beta <= alpha {
            stats.cutoffs += 1;
            break;
        }
    }

    best
}

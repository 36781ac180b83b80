use crate::board::Board;

/// Disc differential: dark discs minus light discs.
/// Positive favours dark (the human), negative favours light.
pub fn score(board: &Board) -> i32 {
    let (dark, light) = board.count();
    dark as i32 - light as i32
}

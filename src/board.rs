use crate::error::{EngineError, Result};
use crate::types::Cell;

pub const BOARD_SIZE: usize = 12;
pub const NUM_SQUARES: usize = BOARD_SIZE * BOARD_SIZE;

/// 12x12 Reversi board. `Copy` gives the independent snapshot the search explores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [[Cell; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    /// Creates the initial board: the centre 2x2 block with
    /// light on the main diagonal and dark on the anti-diagonal.
    pub fn new() -> Self {
        let mid = BOARD_SIZE / 2;
        let mut board = Self::empty();
        board.put(mid - 1, mid - 1, Cell::Light);
        board.put(mid, mid, Cell::Light);
        board.put(mid - 1, mid, Cell::Dark);
        board.put(mid, mid - 1, Cell::Dark);
        board
    }

    pub fn empty() -> Self {
        Self {
            cells: [[Cell::Empty; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    #[inline]
    pub fn size(&self) -> usize {
        BOARD_SIZE
    }

    pub fn get(&self, row: usize, col: usize) -> Result<Cell> {
        check_bounds(row, col)?;
        Ok(self.cells[row][col])
    }

    pub fn set(&mut self, row: usize, col: usize, cell: Cell) -> Result<()> {
        check_bounds(row, col)?;
        self.cells[row][col] = cell;
        Ok(())
    }

    /// Unchecked read for callers that already hold an in-range coordinate.
    #[inline]
    pub(crate) fn cell(&self, row: usize, col: usize) -> Cell {
        debug_assert!(in_bounds(row as i32, col as i32));
        self.cells[row][col]
    }

    #[inline]
    pub(crate) fn put(&mut self, row: usize, col: usize, cell: Cell) {
        debug_assert!(in_bounds(row as i32, col as i32));
        self.cells[row][col] = cell;
    }

    pub fn rows(&self) -> &[[Cell; BOARD_SIZE]; BOARD_SIZE] {
        &self.cells
    }

    /// Returns `(dark_count, light_count)`.
    pub fn count(&self) -> (u8, u8) {
        let mut dark = 0u8;
        let mut light = 0u8;
        for cell in self.cells.iter().flatten() {
            match cell {
                Cell::Dark => dark += 1,
                Cell::Light => light += 1,
                Cell::Empty => {}
            }
        }
        (dark, light)
    }

    /// Returns the number of empty squares.
    pub fn empty_count(&self) -> u8 {
        let (dark, light) = self.count();
        NUM_SQUARES as u8 - dark - light
    }

    /// Converts board to `[u8; 144]` where 0=empty, 1=dark, 2=light.
    pub fn to_array(&self) -> [u8; NUM_SQUARES] {
        let mut out = [0u8; NUM_SQUARES];
        for (slot, cell) in out.iter_mut().zip(self.cells.iter().flatten()) {
            *slot = cell.to_u8();
        }
        out
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) fn in_bounds(row: i32, col: i32) -> bool {
    (0..BOARD_SIZE as i32).contains(&row) && (0..BOARD_SIZE as i32).contains(&col)
}

pub(crate) fn check_bounds(row: usize, col: usize) -> Result<()> {
    if row >= BOARD_SIZE || col >= BOARD_SIZE {
        return Err(EngineError::OutOfBounds { row, col });
    }
    Ok(())
}

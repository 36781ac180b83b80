use serde::{Deserialize, Serialize};

/// Contents of a single board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    Dark,
    Light,
}

impl Cell {
    /// Encoding used by [`GameState::board`]: 0=empty, 1=dark, 2=light.
    pub fn to_u8(self) -> u8 {
        match self {
            Cell::Empty => 0,
            Cell::Dark => 1,
            Cell::Light => 2,
        }
    }
}

/// A side to move. `Dark` is the human, `Light` the computer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Dark,
    Light,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Dark => Side::Light,
            Side::Light => Side::Dark,
        }
    }

    pub fn cell(self) -> Cell {
        match self {
            Side::Dark => Cell::Dark,
            Side::Light => Cell::Light,
        }
    }

    /// Player code used by the JS front-end: 1=dark, 2=light.
    pub fn to_u8(self) -> u8 {
        self.cell().to_u8()
    }
}

/// A board coordinate. As a move it only means something relative to a board and a side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: u8,
    pub col: u8,
}

impl Position {
    pub fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }
}

/// Public game state returned from WASM APIs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// Row-major cells, see [`Cell::to_u8`].
    pub board: Vec<u8>,
    /// 1=dark, 2=light, 0 once the game is over.
    pub current_player: u8,
    pub dark_count: u8,
    pub light_count: u8,
    pub is_game_over: bool,
    /// Contract:
    /// - `true` when the side due to move after the last move had no legal move
    ///   and the turn passed back.
    /// - `false` otherwise.
    pub is_pass: bool,
    /// Contract:
    /// - After a move: row-major indices of the cells it flipped (0..=143).
    /// - Fresh or restored game: empty list.
    pub flipped: Vec<u8>,
}

/// Final result after game over.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    /// 1=dark, 2=light, 0=draw.
    pub winner: u8,
    pub winner_name: String,
    pub dark_count: u8,
    pub light_count: u8,
}

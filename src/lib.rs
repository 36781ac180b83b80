//! 12x12 Reversi engine: rules, disc-count evaluation, alpha-beta search and a
//! human-versus-computer turn controller. Rendering and file handling belong to the
//! front-end; the engine only speaks the text formats in [`persist`].

pub mod ai;
pub mod board;
pub mod config;
pub mod error;
pub mod game;
pub mod persist;
pub mod rules;
pub mod types;
pub mod wasm;

pub use ai::{SearchResult, Searcher, score, search};
pub use board::{BOARD_SIZE, Board};
pub use config::EngineConfig;
pub use error::EngineError;
pub use game::{GameInstance, MoveSelector, Outcome, Phase, Winner};
pub use persist::{SaveRecord, ScoreEntry};
pub use rules::{apply_move, is_legal_move, legal_moves, try_apply_move};
pub use types::{Cell, Position, Side};

pub mod eval;
pub mod search;

pub use eval::score;
pub use search::{MAX_SCORE, MIN_SCORE, SearchResult, SearchStats, Searcher, search};

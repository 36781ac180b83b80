use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

pub const DEFAULT_SEARCH_DEPTH: u8 = 3;
pub const MAX_SEARCH_DEPTH: u8 = 8;
pub const DEFAULT_COMPUTER_DELAY_MS: u32 = 500;
pub const DEFAULT_COMPUTER_NAME: &str = "AI";

/// Engine settings. Missing fields fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Plies searched for the computer's move.
    pub search_depth: u8,
    /// How long a front-end should wait before asking for the computer's move.
    /// The engine never sleeps.
    pub computer_delay_ms: u32,
    /// Name written to the score record when the computer wins.
    pub computer_name: String,
}

impl EngineConfig {
    pub fn with_depth(search_depth: u8) -> Self {
        Self {
            search_depth,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_SEARCH_DEPTH).contains(&self.search_depth) {
            return Err(EngineError::InvalidConfig(format!(
                "search_depth must be in 1..={MAX_SEARCH_DEPTH}, got {}",
                self.search_depth
            )));
        }
        if self.computer_name.trim().is_empty() {
            return Err(EngineError::InvalidConfig(
                "computer_name must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            search_depth: DEFAULT_SEARCH_DEPTH,
            computer_delay_ms: DEFAULT_COMPUTER_DELAY_MS,
            computer_name: DEFAULT_COMPUTER_NAME.to_string(),
        }
    }
}

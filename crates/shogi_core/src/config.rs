//! Tunables for callers of the position core, loadable from TOML.

use serde::{Deserialize, Serialize};

use crate::board::Position;
use crate::error::ConfigError;
use crate::repetition::{DEFAULT_REPETITION_PLY, Repetition};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    /// Skip mate-in-one probing before this many plies from the search root.
    pub mate_search_min_ply: u32,
    /// How far back repetition checks look.
    pub repetition_ply: u32,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            mate_search_min_ply: 0,
            repetition_ply: DEFAULT_REPETITION_PLY,
        }
    }
}

impl CoreConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: CoreConfig = toml::from_str(text)?;
        tracing::debug!(?config, "loaded core config");
        Ok(config)
    }

    pub fn should_search_mate(&self, ply: u32) -> bool {
        ply >= self.mate_search_min_ply
    }

    /// Mate in one from `pos`, if probing is enabled at `ply`.
    pub fn probe_mate(&self, pos: &mut Position, ply: u32) -> Option<crate::types::Move> {
        if !self.should_search_mate(ply) || pos.in_check() {
            return None;
        }
        pos.find_mate()
    }

    pub fn repetition(&self, pos: &Position) -> Repetition {
        pos.repetition_within(self.repetition_ply)
    }
}

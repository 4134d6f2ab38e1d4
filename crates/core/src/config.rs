//! Game configuration: board size, colors, tier thresholds, shuffle bound.

use serde::{Deserialize, Serialize};

use crate::error::{BoardError, Result};
use crate::types::{
    Thresholds, DEFAULT_COLOR_COUNT, DEFAULT_HEIGHT, DEFAULT_SHUFFLE_LIMIT, DEFAULT_THRESHOLDS,
    DEFAULT_WIDTH,
};

/// Settings for a new game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub width: u16,
    pub height: u16,
    pub color_count: u8,
    pub thresholds: Thresholds,
    pub shuffle_limit: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            color_count: DEFAULT_COLOR_COUNT,
            thresholds: DEFAULT_THRESHOLDS,
            shuffle_limit: DEFAULT_SHUFFLE_LIMIT,
        }
    }
}

impl GameConfig {
    /// Create from environment variables
    ///
    /// - `BLAST_WIDTH`, `BLAST_HEIGHT`: board size
    /// - `BLAST_COLORS`: number of colors
    /// - `BLAST_THRESHOLDS`: tier thresholds as `a,b,c`
    /// - `BLAST_SHUFFLE_LIMIT`: recolor attempts before giving up
    ///
    /// Unset or unparsable values fall back to the defaults. The result is not
    /// validated; [`GameConfig::validate`] runs when a game starts.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`GameConfig::from_env`] but reads through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let width = lookup("BLAST_WIDTH")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.width);
        let height = lookup("BLAST_HEIGHT")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.height);
        let color_count = lookup("BLAST_COLORS")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.color_count);
        let thresholds = lookup("BLAST_THRESHOLDS")
            .and_then(|s| parse_thresholds(&s))
            .unwrap_or(defaults.thresholds);
        let shuffle_limit = lookup("BLAST_SHUFFLE_LIMIT")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.shuffle_limit);

        Self {
            width,
            height,
            color_count,
            thresholds,
            shuffle_limit,
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(BoardError::InvalidConfiguration(format!(
                "board size must be positive (got {}x{})",
                self.width, self.height
            )));
        }
        if self.color_count == 0 {
            return Err(BoardError::InvalidConfiguration(
                "color count must be > 0".into(),
            ));
        }
        if !self.thresholds.is_strictly_increasing() {
            let t = self.thresholds;
            return Err(BoardError::InvalidConfiguration(format!(
                "thresholds must be strictly increasing (got {}, {}, {})",
                t.first, t.second, t.third
            )));
        }
        if self.shuffle_limit == 0 {
            return Err(BoardError::InvalidConfiguration(
                "shuffle limit must be > 0".into(),
            ));
        }
        Ok(())
    }
}

/// Parse `"a,b,c"` into thresholds.
pub fn parse_thresholds(s: &str) -> Option<Thresholds> {
    let mut parts = s.split(',').map(|p| p.trim().parse::<u32>());
    let first = parts.next()?.ok()?;
    let second = parts.next()?.ok()?;
    let third = parts.next()?.ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some(Thresholds::new(first, second, third))
}

//! Shuffle module - recolor the board until it is playable again.

use crate::board::Board;
use crate::error::{BoardError, Result};
use crate::rng::SimpleRng;
use crate::types::DEFAULT_SHUFFLE_LIMIT;

/// Resolves deadlocks by recoloring every cell, bounded by `limit` attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shuffler {
    limit: u32,
}

impl Shuffler {
    pub fn new(limit: u32) -> Self {
        Self { limit }
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Recolor `board` until it has a removable group.
    ///
    /// Returns the number of recolors performed (0 if the board was already
    /// playable). Fails with [`BoardError::ShuffleExhausted`] once `limit`
    /// recolors have all produced deadlocked boards.
    pub fn resolve(&self, board: &mut Board, rng: &mut SimpleRng) -> Result<u32> {
        let mut attempts = 0u32;
        while board.is_deadlocked() {
            if attempts >= self.limit {
                return Err(BoardError::ShuffleExhausted { attempts });
            }
            board.recolor_all(rng);
            attempts += 1;
        }
        Ok(attempts)
    }
}

impl Default for Shuffler {
    fn default() -> Self {
        Self::new(DEFAULT_SHUFFLE_LIMIT)
    }
}

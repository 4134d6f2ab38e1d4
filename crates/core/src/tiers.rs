//! Tier module - derive display tiers from group sizes.

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::types::{Thresholds, Tier};

/// A cell whose tier changed during reassignment (final coordinates).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TierChange {
    pub column: u16,
    pub row: u16,
    pub from: Tier,
    pub to: Tier,
}

/// Recomputes every cell's tier from the size of its group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TierAssigner {
    thresholds: Thresholds,
}

impl TierAssigner {
    pub fn new(thresholds: Thresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> Thresholds {
        self.thresholds
    }

    /// Overwrite the tier of every cell on `board`.
    ///
    /// Every member of a group receives the same tier. Returns the cells whose
    /// tier differs from before, in column-major order.
    pub fn reassign_all(&self, board: &mut Board) -> Vec<TierChange> {
        let mut changes = Vec::new();
        for group in board.groups() {
            let tier = self.thresholds.tier_for(group.len());
            for coord in group {
                if let Some(from) = board.set_tier(coord, tier) {
                    if from != tier {
                        changes.push(TierChange {
                            column: coord.column,
                            row: coord.row,
                            from,
                            to: tier,
                        });
                    }
                }
            }
        }
        changes.sort_unstable_by_key(|c| (c.column, c.row));
        changes
    }
}

//! Snapshot module - render state and click results for the presentation layer.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::board::{Board, Cell, RowMove};
use crate::tiers::TierChange;
use crate::types::{Coord, Thresholds};

/// Full render state of a board: every cell with its color and tier.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub width: u16,
    pub height: u16,
    pub color_count: u8,
    pub thresholds: Thresholds,
    /// Column-major.
    pub cells: Vec<Cell>,
}

impl BoardSnapshot {
    pub fn capture(board: &Board, thresholds: Thresholds) -> Self {
        Self {
            width: board.width(),
            height: board.height(),
            color_count: board.color_count(),
            thresholds,
            cells: board.cells().collect(),
        }
    }

    /// True before the first game has been started.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn get(&self, coord: Coord) -> Option<&Cell> {
        self.cells
            .binary_search_by_key(&coord, Cell::coord)
            .ok()
            .map(|i| &self.cells[i])
    }
}

/// Everything a click changed, as one batch for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ResolutionResult {
    /// Cleared coordinates, column-major.
    pub removed: Vec<Coord>,
    /// Replacement cells at their final coordinates, color and tier.
    pub inserted: Vec<Cell>,
    /// Per column, cells that fell, including new cells falling from their
    /// spawn row above the stack.
    pub reindexed: BTreeMap<u16, Vec<RowMove>>,
    /// Every cell after the click, column-major.
    pub final_tiers: Vec<Cell>,
    /// Cells whose tier differs from before the click's tier pass.
    pub tier_changes: Vec<TierChange>,
    /// Recolors needed to leave the board playable (0 if none).
    pub shuffles: u32,
}

impl ResolutionResult {
    /// True when the refill produced a deadlock and the board was recolored;
    /// every cell's color may then differ from before the click.
    pub fn reshuffled(&self) -> bool {
        self.shuffles > 0
    }
}

/// Outcome of clicking a cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClickOutcome {
    /// The clicked cell is a singleton; nothing changed.
    NoOp,
    Resolved(ResolutionResult),
}

impl ClickOutcome {
    pub fn resolution(&self) -> Option<&ResolutionResult> {
        match self {
            ClickOutcome::NoOp => None,
            ClickOutcome::Resolved(result) => Some(result),
        }
    }

    pub fn is_noop(&self) -> bool {
        matches!(self, ClickOutcome::NoOp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Color, Tier};

    #[test]
    fn test_snapshot_lookup() {
        let board = Board::from_columns(
            3,
            vec![vec![Color::new(0), Color::new(1)], vec![Color::new(2)]],
        )
        .unwrap();
        let snap = BoardSnapshot::capture(&board, Thresholds::default());
        assert_eq!(snap.width, 2);
        assert_eq!(snap.height, 2);
        assert_eq!(snap.cells.len(), 3);
        assert_eq!(snap.get(Coord::new(1, 0)).unwrap().color, Color::new(2));
        assert_eq!(snap.get(Coord::new(0, 1)).unwrap().tier, Tier::Default);
        assert!(snap.get(Coord::new(1, 1)).is_none());
    }

    #[test]
    fn test_default_snapshot_is_empty() {
        assert!(BoardSnapshot::default().is_empty());
    }

    #[test]
    fn test_click_outcome_json_shape() {
        let json = serde_json::to_value(ClickOutcome::NoOp).unwrap();
        assert_eq!(json, serde_json::json!("no_op"));

        let resolved = ClickOutcome::Resolved(ResolutionResult {
            removed: vec![Coord::new(0, 0)],
            shuffles: 2,
            ..ResolutionResult::default()
        });
        let json = serde_json::to_value(&resolved).unwrap();
        assert_eq!(json["resolved"]["removed"][0]["column"], 0);
        assert_eq!(json["resolved"]["shuffles"], 2);
        assert!(json["resolved"]["reindexed"].is_object());
    }
}

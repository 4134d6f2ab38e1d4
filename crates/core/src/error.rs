//! Error types for board operations.

use std::fmt;

use crate::types::Coord;

/// Why a cell selection was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionFault {
    /// No cells were given.
    Empty,
    /// The same coordinate appears more than once.
    Duplicate(Coord),
    /// No cell is currently at the coordinate.
    Missing(Coord),
}

impl fmt::Display for SelectionFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionFault::Empty => write!(f, "selection is empty"),
            SelectionFault::Duplicate(c) => {
                write!(f, "cell ({}, {}) selected twice", c.column, c.row)
            }
            SelectionFault::Missing(c) => write!(f, "no cell at ({}, {})", c.column, c.row),
        }
    }
}

/// Errors raised by board operations and the controller.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("column {column} out of range (width {width})")]
    InvalidColumn { column: u16, width: u16 },

    #[error("invalid selection: {0}")]
    InvalidSelection(SelectionFault),

    #[error("color {color} out of range (color count {color_count})")]
    InvalidColor { color: u8, color_count: u8 },

    #[error("board still deadlocked after {attempts} shuffles")]
    ShuffleExhausted { attempts: u32 },
}

pub type Result<T> = std::result::Result<T, BoardError>;

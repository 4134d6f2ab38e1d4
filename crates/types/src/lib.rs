//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental value types used throughout the workspace.
//! They are plain data with no behaviour beyond small conversions, which makes them
//! usable in any context (board logic, terminal rendering, the JSON journal).
//!
//! # Board Geometry
//!
//! Boards are column-major stacks:
//!
//! - **Columns** are indexed `0..width` from left to right
//! - **Rows** are indexed from the bottom of a column (`row == 0` is the lowest cell)
//! - A cell only ever moves vertically within its own column
//!
//! # Defaults
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_WIDTH` | 10 | Columns on a new board |
//! | `DEFAULT_HEIGHT` | 10 | Visible rows on a new board |
//! | `DEFAULT_COLOR_COUNT` | 6 | Distinct colors drawn at random |
//! | `DEFAULT_THRESHOLDS` | 4, 7, 9 | Group sizes separating the display tiers |
//! | `DEFAULT_SHUFFLE_LIMIT` | 10000 | Recolors tried before giving up on a deadlock |
//!
//! # Examples
//!
//! ```
//! use tile_blast_types::{Color, Coord, Tier, DEFAULT_THRESHOLDS};
//!
//! let a = Coord::new(0, 3);
//! let b = Coord::new(1, 0);
//! assert!(a < b); // column-major ordering
//!
//! assert_eq!(Color::new(2).index(), 2);
//!
//! assert_eq!(DEFAULT_THRESHOLDS.tier_for(5), Tier::First);
//! assert_eq!(Tier::from_str("third"), Some(Tier::Third));
//! ```

use serde::{Deserialize, Serialize};

/// Default board width (10 columns)
pub const DEFAULT_WIDTH: u16 = 10;

/// Default visible board height (10 rows)
pub const DEFAULT_HEIGHT: u16 = 10;

/// Default number of distinct colors
pub const DEFAULT_COLOR_COUNT: u8 = 6;

/// Default tier thresholds (4, 7, 9)
pub const DEFAULT_THRESHOLDS: Thresholds = Thresholds {
    first: 4,
    second: 7,
    third: 9,
};

/// Maximum recolor passes before a deadlock is declared unresolvable
pub const DEFAULT_SHUFFLE_LIMIT: u32 = 10_000;

/// A cell color, stored as an index in `0..color_count`.
///
/// Colors carry identity only; the numeric order has no game meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(u8);

impl Color {
    pub const fn new(index: u8) -> Self {
        Self(index)
    }

    pub const fn index(self) -> u8 {
        self.0
    }
}

/// Display tier of a cell, derived from the size of the group it belongs to.
///
/// - **Default**: small groups (and singletons)
/// - **First**: size above the first threshold
/// - **Second**: size above the second threshold
/// - **Third**: size above the third threshold
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    #[default]
    Default,
    First,
    Second,
    Third,
}

impl Tier {
    /// All tiers in ascending order.
    pub const ALL: [Tier; 4] = [Tier::Default, Tier::First, Tier::Second, Tier::Third];

    /// Parse tier from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tile_blast_types::Tier;
    ///
    /// assert_eq!(Tier::from_str("default"), Some(Tier::Default));
    /// assert_eq!(Tier::from_str("Second"), Some(Tier::Second));
    /// assert_eq!(Tier::from_str("fourth"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "default" => Some(Tier::Default),
            "first" => Some(Tier::First),
            "second" => Some(Tier::Second),
            "third" => Some(Tier::Third),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Default => "default",
            Tier::First => "first",
            Tier::Second => "second",
            Tier::Third => "third",
        }
    }
}

/// Position of a cell: column from the left, row from the bottom.
///
/// Ordering is column-major, which is the order used for every coordinate
/// list the core returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub column: u16,
    pub row: u16,
}

impl Coord {
    pub const fn new(column: u16, row: u16) -> Self {
        Self { column, row }
    }
}

/// Group-size thresholds separating the display tiers.
///
/// Sizes equal to a threshold fall into the lower tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Thresholds {
    pub first: u32,
    pub second: u32,
    pub third: u32,
}

impl Thresholds {
    pub const fn new(first: u32, second: u32, third: u32) -> Self {
        Self {
            first,
            second,
            third,
        }
    }

    /// True when `first < second < third`.
    pub fn is_strictly_increasing(&self) -> bool {
        self.first < self.second && self.second < self.third
    }

    /// Map a group size to its tier.
    ///
    /// # Examples
    ///
    /// ```
    /// use tile_blast_types::{Thresholds, Tier};
    ///
    /// let t = Thresholds::new(4, 7, 9);
    /// assert_eq!(t.tier_for(4), Tier::Default);
    /// assert_eq!(t.tier_for(7), Tier::First);
    /// assert_eq!(t.tier_for(8), Tier::Second);
    /// assert_eq!(t.tier_for(10), Tier::Third);
    /// ```
    pub fn tier_for(&self, size: usize) -> Tier {
        let size = size as u64;
        if size > self.third as u64 {
            Tier::Third
        } else if size > self.second as u64 {
            Tier::Second
        } else if size > self.first as u64 {
            Tier::First
        } else {
            Tier::Default
        }
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        DEFAULT_THRESHOLDS
    }
}

//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the rules of the tile-blast puzzle: the board, group
//! discovery, deadlock detection and resolution, cascade bookkeeping, and tier
//! assignment. It has **no dependencies** on UI or I/O, making it:
//!
//! - **Deterministic**: Same seed produces identical games
//! - **Testable**: Boards can be built by hand with [`Board::from_columns`]
//! - **Portable**: Any presentation layer can drive it through [`BoardController`]
//!
//! # Module Structure
//!
//! - [`board`]: column stacks, flood-fill groups, removal, refill and compaction
//! - [`shuffle`]: recolor-until-playable with a safety bound
//! - [`tiers`]: group size to display tier
//! - [`controller`]: the game state machine and its observer hook
//! - [`snapshot`]: render state and click results handed to the presentation layer
//! - [`config`]: game settings and their validation
//! - [`rng`]: seeded color generation
//!
//! # Game Rules
//!
//! - **Groups** are same-color cells connected up, down, left or right (never diagonally)
//! - **Clicking** a group of two or more clears it; a singleton click does nothing
//! - **Cascade**: cells above a cleared cell fall, and one new cell drops into the
//!   column for every cleared one
//! - **No deadlocks**: a board where no group has two cells is recolored until one does
//! - **Tiers**: every cell shows a tier chosen by its group's size
//!
//! # Example
//!
//! ```
//! use tile_blast_core::{BoardController, ClickOutcome, GameConfig};
//!
//! let mut game = BoardController::new(12345);
//! let snapshot = game.new_game(GameConfig::default()).unwrap();
//! assert_eq!(snapshot.cells.len(), 100);
//!
//! // Click every cell until something clears.
//! let cleared = snapshot.cells.iter().any(|cell| {
//!     matches!(game.click(cell.column, cell.row), Ok(ClickOutcome::Resolved(_)))
//! });
//! assert!(cleared);
//! assert!(game.board().unwrap().has_any_removable_group());
//! ```

pub mod board;
pub mod config;
pub mod controller;
pub mod error;
pub mod rng;
pub mod shuffle;
pub mod snapshot;
pub mod tiers;

pub use tile_blast_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, Cell, RowMove};
pub use config::GameConfig;
pub use controller::{BoardController, BoardObserver, Phase};
pub use error::{BoardError, Result, SelectionFault};
pub use rng::SimpleRng;
pub use shuffle::Shuffler;
pub use snapshot::{BoardSnapshot, ClickOutcome, ResolutionResult};
pub use tiers::{TierAssigner, TierChange};

//! Terminal renderer for the tile-blast board.
//!
//! Renders into a plain framebuffer that is diffed and flushed to the
//! terminal, rather than going through a widget toolkit.
//!
//! Goals:
//! - Keep `core` deterministic and testable
//! - Keep layout pure so mouse hit-testing shares it with drawing
//! - Allow precise control over aspect ratio (e.g. 2 chars wide per cell)

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tile_blast_core as core;
pub use tile_blast_types as types;

pub use fb::{FrameBuffer, Glyph, Rgb, Style};
pub use game_view::{color_rgb, tier_glyph, GameView, StatusView, Viewport};
pub use renderer::{changed_runs, encode_diff_into, encode_full_into, TerminalRenderer};

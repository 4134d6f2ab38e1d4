//! Terminal input module.
//!
//! Maps `crossterm` key and mouse events into [`InputAction`]s. Screen
//! positions are passed through untouched; turning them into board
//! coordinates is the view's job, since only the view knows the layout.

pub mod map;

pub use map::{handle_event, handle_key_event, handle_mouse_event, should_quit, InputAction};

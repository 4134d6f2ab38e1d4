//! Tile blast (workspace facade crate).
//!
//! Re-exports the workspace crates as `tile_blast::{core,input,term,types}` and
//! adds the [`journal`] event log used by the binary.

pub mod journal;

pub use tile_blast_core as core;
pub use tile_blast_input as input;
pub use tile_blast_term as term;
pub use tile_blast_types as types;

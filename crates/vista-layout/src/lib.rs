//! Vista Layout - Layout Composition Controller
//!
//! This crate implements the composition pipeline:
//! - Pure derivation of the layout state from track signals
//! - Tile payloads, phases and renderer-facing descriptions
//! - Per-region tile state machine (enter, settle, exit, resume)
//! - The controller tying regions, identities and timing together

pub mod derive;
pub mod tile;
pub mod slot;
pub mod controller;

#[cfg(test)]
mod testing;

pub use derive::*;
pub use tile::*;
pub use slot::*;
pub use controller::*;

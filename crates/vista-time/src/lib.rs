//! Vista Time - Frame clocks and transition timing
//!
//! This crate implements the timing side of composition:
//! - The frame clock trait and a manually driven clock
//! - Spring transition profile (progress curve and settle duration)
//! - Decorative HUD cadence (clock tick, scan-line sweep)

pub mod clock;
pub mod spring;
pub mod hud;

pub use clock::*;
pub use spring::*;
pub use hud::*;

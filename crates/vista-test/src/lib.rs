//! Vista Test Harness - Scenario and invariant testing
//!
//! This crate provides:
//! - A scripted scenario harness over an in-memory session and manual clock
//! - A seeded random signal fuzzer that checks composition invariants
//!   after every step

pub mod scenario;
pub mod fuzzer;

pub use scenario::*;
pub use fuzzer::*;

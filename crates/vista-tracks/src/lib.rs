//! Vista Tracks - Track Signal Resolver
//!
//! This crate turns a live media session into normalized track signals:
//! - The `MediaSession` boundary consumed from the media layer
//! - An in-memory session implementation
//! - Per-kind resolution (`TrackResolver`)
//! - Reactive re-resolution on change notifications (`SignalWatcher`)

pub mod session;
pub mod local;
pub mod resolver;
pub mod error;

pub use session::*;
pub use local::*;
pub use resolver::*;
pub use error::*;

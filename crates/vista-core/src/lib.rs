//! Vista Core - Fundamental types for media tile composition
//!
//! This crate defines the types shared by every Vista component:
//! - Identifiers (ParticipantId, TrackSid, TileIdentity)
//! - Frame time (FrameTime)
//! - Track signals and the per-kind signal set
//! - Layout regions and their screen anchors
//! - Assistant state pass-through
//! - Application configuration and errors

pub mod id;
pub mod time;
pub mod track;
pub mod region;
pub mod agent;
pub mod config;
pub mod error;

pub use id::*;
pub use time::*;
pub use track::*;
pub use region::*;
pub use agent::*;
pub use config::*;
pub use error::*;

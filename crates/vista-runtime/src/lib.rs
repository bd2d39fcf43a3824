//! Vista Runtime - Compositor orchestration and main loop
//!
//! This crate runs the composition pipeline on tokio:
//! 1. Receive session change notifications
//! 2. Re-resolve track signals
//! 3. Recompute the layout and drive tile transitions
//! 4. Tick transitions on a frame interval
//! 5. Start or stop the HUD overlay timers with camera occupancy
//! 6. Publish the composition to the renderer
//!
//! It also owns the application shell around the compositor: config loading,
//! the welcome view and tracing setup.

pub mod app;
pub mod clock;
pub mod compositor;
pub mod config;
pub mod error;
pub mod hud;
pub mod telemetry;
pub mod welcome;

pub use app::*;
pub use clock::*;
pub use compositor::*;
pub use config::*;
pub use error::*;
pub use hud::*;
pub use telemetry::*;
pub use welcome::*;

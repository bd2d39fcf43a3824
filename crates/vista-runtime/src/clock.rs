//! Frame clock on tokio time

use std::time::Duration;

use parking_lot::Mutex;
use tokio::time::Instant;
use vista_core::FrameTime;
use vista_time::Clock;

use crate::CompositorConfig;

/// Monotonic frame clock driven by tokio's clock, so paused test time
/// drives transitions too.
/// INVARIANT: never jumps by more than `max_step` per read
pub struct TokioClock {
    state: Mutex<ClockState>,
    max_step: Duration,
}

struct ClockState {
    value: FrameTime,
    last_read: Instant,
}

impl TokioClock {
    pub fn new() -> Self {
        Self::with_max_step(Duration::from_millis(250))
    }

    /// Clock clamped to the config's `max_clock_step`
    pub fn from_config(config: &CompositorConfig) -> Self {
        Self::with_max_step(config.max_clock_step)
    }

    pub fn with_max_step(max_step: Duration) -> Self {
        TokioClock {
            state: Mutex::new(ClockState {
                value: FrameTime::ZERO,
                last_read: Instant::now(),
            }),
            max_step,
        }
    }
}

impl Default for TokioClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for TokioClock {
    fn now(&self) -> FrameTime {
        let mut state = self.state.lock();
        let now = Instant::now();
        let elapsed = now.duration_since(state.last_read).min(self.max_step);
        state.value = state.value.saturating_add(elapsed);
        state.last_read = now;
        state.value
    }
}

//! Clock implementations for frame timing

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use vista_core::FrameTime;

/// Source of frame time for transitions
pub trait Clock {
    /// Current frame time. MUST never go backwards.
    fn now(&self) -> FrameTime;
}

/// Manually driven clock. Clones share the same time.
#[derive(Clone, Default)]
pub struct ManualClock {
    value: Arc<Mutex<FrameTime>>,
}

impl ManualClock {
    pub fn new() -> Self {
        ManualClock::default()
    }

    pub fn starting_at(time: FrameTime) -> Self {
        ManualClock {
            value: Arc::new(Mutex::new(time)),
        }
    }

    /// Advance by `dt`, returning the new time
    pub fn advance(&self, dt: Duration) -> FrameTime {
        let mut value = self.value.lock();
        *value = value.saturating_add(dt);
        *value
    }

    /// Jump to `target`. Only moves forward.
    pub fn set(&self, target: FrameTime) {
        let mut value = self.value.lock();
        if target > *value {
            *value = target;
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> FrameTime {
        *self.value.lock()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_shared_between_clones() {
        let clock = ManualClock::new();
        let other = clock.clone();
        clock.advance(Duration::from_millis(40));
        assert_eq!(other.now(), FrameTime::from_millis(40));
    }

    #[test]
    fn test_manual_clock_never_rewinds() {
        let clock = ManualClock::starting_at(FrameTime::from_millis(100));
        clock.set(FrameTime::from_millis(50));
        assert_eq!(clock.now(), FrameTime::from_millis(100));
        clock.set(FrameTime::from_millis(150));
        assert_eq!(clock.now(), FrameTime::from_millis(150));
    }
}

//! Compositor configuration

use std::time::Duration;

use vista_core::Viewport;
use vista_layout::LayoutConfig;

use crate::{RuntimeError, RuntimeResult};

/// Compositor configuration
#[derive(Clone, Debug, PartialEq)]
pub struct CompositorConfig {
    /// How often in-flight transitions are advanced
    pub frame_interval: Duration,
    /// Spring and viewport for the controller
    pub layout: LayoutConfig,
    /// Pending session events before `try_notify` reports back-pressure
    pub event_buffer: usize,
    /// Largest frame-time step per clock read (e.g. after a suspend).
    /// Applies to clocks built from this config, see
    /// [`Compositor::realtime`](crate::Compositor::realtime)
    pub max_clock_step: Duration,
    /// Seconds east of UTC for the HUD wall clock
    pub hud_utc_offset_secs: i32,
}

impl Default for CompositorConfig {
    fn default() -> Self {
        CompositorConfig {
            frame_interval: Duration::from_millis(16),
            layout: LayoutConfig::default(),
            event_buffer: 256,
            max_clock_step: Duration::from_millis(250),
            hud_utc_offset_secs: 0,
        }
    }
}

impl CompositorConfig {
    /// Half frame rate, for battery-powered devices
    pub fn low_power() -> Self {
        CompositorConfig {
            frame_interval: Duration::from_millis(33),
            event_buffer: 64,
            ..CompositorConfig::default()
        }
    }

    /// Short, near-critical transitions
    pub fn reduced_motion() -> Self {
        CompositorConfig {
            layout: LayoutConfig::reduced_motion(),
            ..CompositorConfig::default()
        }
    }

    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.layout.viewport = viewport;
        self
    }

    pub fn with_utc_offset(mut self, secs: i32) -> Self {
        self.hud_utc_offset_secs = secs;
        self
    }

    /// Set the frame interval from a human-readable duration such as `"33ms"`
    pub fn with_frame_interval_str(mut self, value: &str) -> RuntimeResult<Self> {
        let interval =
            humantime::parse_duration(value).map_err(|e| RuntimeError::InvalidDuration {
                value: value.to_string(),
                reason: e.to_string(),
            })?;
        if interval.is_zero() {
            return Err(RuntimeError::InvalidDuration {
                value: value.to_string(),
                reason: "frame interval must be positive".to_string(),
            });
        }
        self.frame_interval = interval;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        let default = CompositorConfig::default();
        assert!(CompositorConfig::low_power().frame_interval > default.frame_interval);
        assert_eq!(
            CompositorConfig::reduced_motion().layout,
            LayoutConfig::reduced_motion()
        );
    }

    #[test]
    fn test_frame_interval_from_str() {
        let config = CompositorConfig::default()
            .with_frame_interval_str("33ms")
            .unwrap();
        assert_eq!(config.frame_interval, Duration::from_millis(33));

        assert!(matches!(
            CompositorConfig::default().with_frame_interval_str("fast"),
            Err(RuntimeError::InvalidDuration { .. })
        ));
        assert!(CompositorConfig::default()
            .with_frame_interval_str("0s")
            .is_err());
    }

    #[test]
    fn test_with_viewport() {
        let config = CompositorConfig::default().with_viewport(Viewport::new(800.0, 600.0));
        assert_eq!(config.layout.viewport, Viewport::new(800.0, 600.0));
    }
}

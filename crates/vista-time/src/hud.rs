//! Decorative HUD cadence
//!
//! The camera overlay runs two free-running timers: a wall clock refreshed
//! every second and a scan line that steps across the frame. Neither has any
//! influence on layout.

use std::time::Duration;

/// Wall clock refresh period
pub const CLOCK_PERIOD: Duration = Duration::from_secs(1);
/// Scan line step period
pub const SCAN_PERIOD: Duration = Duration::from_millis(50);
/// Scan line step, in percent of frame height
pub const SCAN_STEP: u8 = 20;

/// Scan line vertical position, in percent of frame height
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScanLine {
    position: u8,
}

impl ScanLine {
    pub fn new() -> Self {
        ScanLine::default()
    }

    #[inline]
    pub fn position(&self) -> u8 {
        self.position
    }

    /// Advance one step, wrapping at 100
    pub fn step(&mut self) -> u8 {
        self.position = (self.position + SCAN_STEP) % 100;
        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_line_wraps() {
        let mut scan = ScanLine::new();
        let positions: Vec<u8> = (0..6).map(|_| scan.step()).collect();
        assert_eq!(positions, vec![20, 40, 60, 80, 0, 20]);
    }

    #[test]
    fn test_scan_is_faster_than_clock() {
        assert!(SCAN_PERIOD < CLOCK_PERIOD);
    }
}

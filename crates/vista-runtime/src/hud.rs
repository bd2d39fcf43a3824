//! HUD overlay timers
//!
//! While the camera fills the screen, a decorative overlay shows a wall clock
//! and a sweeping scan line. Both run on their own tokio tasks and are torn
//! down unconditionally when the overlay is dropped.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant};
use tracing::debug;
use vista_time::{ScanLine, CLOCK_PERIOD, SCAN_PERIOD};

/// What the overlay currently draws
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HudFrame {
    /// Wall clock, `HH:MM:SS` in the configured zone
    pub clock: String,
    /// Scan line position, percent of frame height
    pub scan_line: u8,
}

/// Shared output of the overlay; `None` while no overlay exists
pub type HudSender = Arc<watch::Sender<Option<HudFrame>>>;

const SECS_PER_DAY: i64 = 86_400;

/// Format the time-of-day part of a wall-clock instant, shifted by
/// `utc_offset_secs` (seconds east of UTC)
pub fn clock_text(time: SystemTime, utc_offset_secs: i32) -> String {
    let secs = time
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0);
    let of_day = (secs + i64::from(utc_offset_secs)).rem_euclid(SECS_PER_DAY);
    format!(
        "{:02}:{:02}:{:02}",
        of_day / 3600,
        of_day % 3600 / 60,
        of_day % 60
    )
}

/// Running overlay. Dropping it stops both timers.
pub struct HudOverlay {
    frames: HudSender,
    clock_task: JoinHandle<()>,
    scan_task: JoinHandle<()>,
}

impl HudOverlay {
    /// Start the timers. Must be called from within a tokio runtime.
    pub fn spawn(frames: HudSender, utc_offset_secs: i32) -> Self {
        frames.send_replace(Some(HudFrame {
            clock: clock_text(SystemTime::now(), utc_offset_secs),
            scan_line: 0,
        }));

        let clock_task = {
            let frames = frames.clone();
            tokio::spawn(async move {
                let mut ticker = interval_at(Instant::now() + CLOCK_PERIOD, CLOCK_PERIOD);
                loop {
                    ticker.tick().await;
                    let clock = clock_text(SystemTime::now(), utc_offset_secs);
                    frames.send_modify(|frame| {
                        if let Some(frame) = frame {
                            frame.clock = clock;
                        }
                    });
                }
            })
        };

        let scan_task = {
            let frames = frames.clone();
            tokio::spawn(async move {
                let mut scan = ScanLine::new();
                let mut ticker = interval_at(Instant::now() + SCAN_PERIOD, SCAN_PERIOD);
                loop {
                    ticker.tick().await;
                    let position = scan.step();
                    frames.send_modify(|frame| {
                        if let Some(frame) = frame {
                            frame.scan_line = position;
                        }
                    });
                }
            })
        };

        debug!("hud overlay started");
        HudOverlay {
            frames,
            clock_task,
            scan_task,
        }
    }

    pub fn is_running(&self) -> bool {
        !self.clock_task.is_finished() && !self.scan_task.is_finished()
    }
}

impl Drop for HudOverlay {
    fn drop(&mut self) {
        self.clock_task.abort();
        self.scan_task.abort();
        self.frames.send_replace(None);
        debug!("hud overlay stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn channel() -> (HudSender, watch::Receiver<Option<HudFrame>>) {
        let (tx, rx) = watch::channel(None);
        (Arc::new(tx), rx)
    }

    #[test]
    fn test_clock_text() {
        let time = SystemTime::UNIX_EPOCH + Duration::from_secs(3 * 3600 + 4 * 60 + 5);
        assert_eq!(clock_text(time, 0), "03:04:05");
    }

    #[test]
    fn test_clock_text_shifts_to_local_zone() {
        let time = SystemTime::UNIX_EPOCH + Duration::from_secs(3 * 3600 + 4 * 60 + 5);
        // UTC+7
        assert_eq!(clock_text(time, 7 * 3600), "10:04:05");
        // UTC-5 wraps to the previous day
        assert_eq!(clock_text(time, -5 * 3600), "22:04:05");
        // UTC+5:30
        assert_eq!(clock_text(time, 5 * 3600 + 1800), "08:34:05");
    }

    #[tokio::test(start_paused = true)]
    async fn test_scan_line_steps_every_period() {
        let (frames, rx) = channel();
        let hud = HudOverlay::spawn(frames, 0);
        assert_eq!(rx.borrow().as_ref().map(|f| f.scan_line), Some(0));

        tokio::time::sleep(Duration::from_millis(160)).await;
        assert_eq!(rx.borrow().as_ref().map(|f| f.scan_line), Some(60));
        assert!(hud.is_running());

        tokio::time::sleep(Duration::from_millis(100)).await;
        // 5 steps of 20 wrap back to 0
        assert_eq!(rx.borrow().as_ref().map(|f| f.scan_line), Some(0));
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_tears_down_timers() {
        let (frames, rx) = channel();
        let hud = HudOverlay::spawn(frames.clone(), 0);
        tokio::time::sleep(Duration::from_millis(60)).await;
        drop(hud);
        assert!(rx.borrow().is_none());

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert!(rx.borrow().is_none());
        // Only the test's own handle is left once the tasks are gone
        tokio::task::yield_now().await;
        assert_eq!(Arc::strong_count(&frames), 1);
    }
}

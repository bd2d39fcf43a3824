//! Spring transition profile
//!
//! Tiles enter by animating scale/opacity from 0 to 1 and exit the other way,
//! driven by a damped spring. The controller only needs two things from it:
//! how far along a transition is, and when it has come to rest.

use std::time::Duration;

/// Upper bound on any settle duration
pub const MAX_SETTLE: Duration = Duration::from_secs(5);

/// Damped spring released from 0 toward 1 with zero initial velocity
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringProfile {
    pub stiffness: f64,
    pub damping: f64,
    pub mass: f64,
    /// Distance from target at which the spring counts as settled
    pub rest_delta: f64,
}

impl Default for SpringProfile {
    fn default() -> Self {
        SpringProfile {
            stiffness: 675.0,
            damping: 75.0,
            mass: 1.0,
            rest_delta: 0.01,
        }
    }
}

impl SpringProfile {
    /// Quick, near-critical spring for reduced-motion setups
    pub fn snappy() -> Self {
        SpringProfile {
            stiffness: 1000.0,
            damping: 63.0,
            mass: 1.0,
            rest_delta: 0.01,
        }
    }

    /// Undamped natural frequency ω0 (rad/s)
    fn omega(&self) -> f64 {
        (self.stiffness / self.mass.max(f64::EPSILON)).sqrt()
    }

    /// Damping ratio ζ
    fn zeta(&self) -> f64 {
        self.damping / (2.0 * (self.stiffness * self.mass).sqrt().max(f64::EPSILON))
    }

    /// Signed displacement from target at `t` seconds, and an upper bound on
    /// its magnitude from then on.
    fn displacement(&self, t: f64) -> (f64, f64) {
        let x0 = -1.0;
        let w0 = self.omega();
        let zeta = self.zeta();

        if zeta < 1.0 {
            let wd = w0 * (1.0 - zeta * zeta).sqrt();
            let b = zeta * w0 * x0 / wd;
            let decay = (-zeta * w0 * t).exp();
            let x = decay * (x0 * (wd * t).cos() + b * (wd * t).sin());
            (x, decay * (x0 * x0 + b * b).sqrt())
        } else if (zeta - 1.0).abs() < 1e-9 {
            let decay = (-w0 * t).exp();
            let x = decay * (x0 + w0 * x0 * t);
            (x, x.abs())
        } else {
            let root = (zeta * zeta - 1.0).sqrt();
            let r1 = -w0 * (zeta - root);
            let r2 = -w0 * (zeta + root);
            let c2 = -r1 * x0 / (r2 - r1);
            let c1 = x0 - c2;
            let x = c1 * (r1 * t).exp() + c2 * (r2 * t).exp();
            (x, c1.abs() * (r1 * t).exp() + c2.abs() * (r2 * t).exp())
        }
    }

    /// Progress toward the target after `elapsed` (0.0 at start, ~1.0 at rest).
    /// May overshoot 1.0 briefly for underdamped profiles.
    pub fn progress(&self, elapsed: Duration) -> f32 {
        let (x, _) = self.displacement(elapsed.as_secs_f64());
        (1.0 + x) as f32
    }

    /// Time until the spring stays within `rest_delta` of the target
    pub fn settle_duration(&self) -> Duration {
        let step = Duration::from_millis(1);
        let mut t = Duration::ZERO;
        while t < MAX_SETTLE {
            let (_, bound) = self.displacement(t.as_secs_f64());
            if bound < self.rest_delta {
                return t;
            }
            t += step;
        }
        MAX_SETTLE
    }
}

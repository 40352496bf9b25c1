//! Where the coin comes to rest, and how it gets there on screen.

use std::time::Duration;

/// Minimum full turns per flip.
pub const MIN_SPINS: f64 = 5.0;
pub const DEGREES_PER_SPIN: f64 = 360.0;

/// Resting angle (mod 360) that shows the given side to the viewer.
pub fn resting_mod(is_heads: bool) -> f64 {
    if is_heads { 0.0 } else { 180.0 }
}

/// Next cumulative angle: at least five full turns past `current`, then forward to the
/// first angle showing the requested side. A zero adjustment still buys one more turn.
pub fn next_rotation(current: f64, is_heads: bool) -> f64 {
    let target = current + MIN_SPINS * DEGREES_PER_SPIN;
    let mut adjustment = resting_mod(is_heads) - target.rem_euclid(DEGREES_PER_SPIN);
    if adjustment <= 0.0 {
        adjustment += DEGREES_PER_SPIN;
    }
    target + adjustment
}

/// Which face points at the viewer for a given angle.
pub fn facing_heads(angle: f64) -> bool {
    let a = angle.rem_euclid(DEGREES_PER_SPIN);
    !(90.0..270.0).contains(&a)
}

// ── Display easing ──────────────────────────────────────────────────────────

fn ease_in_out(t: f64) -> f64 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// Renderer-side interpolation of the published angle. The controller only ever
/// publishes resting angles; this eases between them over the flip duration.
#[derive(Clone, Debug)]
pub struct Tween {
    from: f64,
    to: f64,
    started: Duration,
    span: Duration,
}

impl Tween {
    pub fn new(angle: f64, span: Duration) -> Self {
        Self {
            from: angle,
            to: angle,
            started: Duration::ZERO,
            span,
        }
    }

    /// Retarget if the published angle moved. Returns the angle to draw at `now`.
    pub fn follow(&mut self, target: f64, now: Duration) -> f64 {
        if target != self.to {
            self.from = self.at(now);
            self.to = target;
            self.started = now;
        }
        self.at(now)
    }

    pub fn at(&self, now: Duration) -> f64 {
        self.from + (self.to - self.from) * ease_in_out(self.progress(now))
    }

    /// Linear 0..=1 progress through the current move.
    pub fn progress(&self, now: Duration) -> f64 {
        if self.span.is_zero() {
            return 1.0;
        }
        (now.saturating_sub(self.started).as_secs_f64() / self.span.as_secs_f64()).clamp(0.0, 1.0)
    }
}

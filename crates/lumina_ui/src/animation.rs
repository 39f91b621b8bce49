//! Eased scalar transitions.
//!
//! Used for the surface-level blur/opacity change when the portrait enters
//! and leaves the liquid phase. The page transitions those over one second
//! with the standard `cubic-bezier(0.4, 0, 0.2, 1)` curve.

/// The standard curve, `cubic-bezier(0.4, 0, 0.2, 1)`: quick start, long
/// settle. `t` is clamped to 0-1.
#[must_use]
pub fn ease_standard(t: f32) -> f32 {
    cubic_bezier(0.4, 0.0, 0.2, 1.0, t.clamp(0.0, 1.0))
}

/// Evaluates a CSS-style cubic bezier with fixed endpoints (0,0) and (1,1).
fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, x: f32) -> f32 {
    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }

    let curve = |a: f32, b: f32, t: f32| {
        let u = 1.0 - t;
        3.0 * u * u * t * a + 3.0 * u * t * t * b + t * t * t
    };

    // x(t) is monotonic for x1, x2 in [0, 1]; bisection is enough
    let (mut lo, mut hi) = (0.0_f32, 1.0_f32);
    for _ in 0..24 {
        let mid = (lo + hi) * 0.5;
        if curve(x1, x2, mid) < x {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    curve(y1, y2, (lo + hi) * 0.5)
}

/// A single animated value.
#[derive(Debug, Clone)]
pub struct Animation {
    /// Current value.
    current: f32,
    /// Target value.
    target: f32,
    /// Animation progress (0-1).
    progress: f32,
    /// Start value (for interpolation).
    start: f32,
}

impl Animation {
    /// Transition duration (seconds).
    pub const DURATION: f32 = 1.0;

    /// Creates a settled animation at `value`.
    #[must_use]
    pub fn new(value: f32) -> Self {
        Self {
            current: value,
            target: value,
            progress: 1.0,
            start: value,
        }
    }

    /// Returns the current value.
    #[must_use]
    pub fn value(&self) -> f32 {
        self.current
    }

    /// Retargets, restarting from the current value. Same target is a no-op.
    pub fn set_target(&mut self, target: f32) {
        if (target - self.target).abs() > 0.0001 {
            self.start = self.current;
            self.target = target;
            self.progress = 0.0;
        }
    }

    /// Advances by `dt` seconds.
    pub fn update(&mut self, dt: f32) {
        if self.progress >= 1.0 {
            return;
        }

        if dt.is_finite() {
            self.progress += dt.max(0.0) / Self::DURATION;
        } else {
            self.progress = 1.0;
        }
        self.progress = self.progress.min(1.0);

        let eased = ease_standard(self.progress);
        self.current = self.start + (self.target - self.start) * eased;

        if self.progress >= 1.0 {
            self.current = self.target;
        }
    }
}

impl Default for Animation {
    fn default() -> Self {
        Self::new(0.0)
    }
}

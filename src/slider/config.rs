//! Tuning constants for the photo slider.
//!
//! Loaded from the `[slider]` table of the configuration file; every field is
//! optional and falls back to the defaults below.
//!
//! ```toml
//! [slider]
//! momentum = true
//! damping = 0.8
//! velocity_factor = 0.1
//! friction = 0.95
//! epsilon = 0.05
//! ```

use serde::{Deserialize, Serialize};

/// Fraction of raw finger travel applied to the strip while dragging.
pub const DEFAULT_DAMPING: f64 = 0.8;

/// Fraction of each per-move delta kept as release velocity.
pub const DEFAULT_VELOCITY_FACTOR: f64 = 0.1;

/// Velocity multiplier applied once per animation frame during decay.
pub const DEFAULT_FRICTION: f64 = 0.95;

/// Velocity magnitude below which momentum stops and the strip snaps.
pub const DEFAULT_EPSILON: f64 = 0.05;

/// Largest friction accepted; anything at or above 1.0 would never settle.
const MAX_FRICTION: f64 = 0.999;

/// Smallest epsilon accepted.
const MIN_EPSILON: f64 = 1e-6;

/// Gesture and momentum parameters shared by every slider on a page.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SliderConfig {
    /// Continue scrolling after release and decay to a stop.
    ///
    /// When `false` the strip snaps to the nearest photo as soon as the finger
    /// lifts.
    pub momentum: bool,
    pub damping: f64,
    pub velocity_factor: f64,
    pub friction: f64,
    pub epsilon: f64,
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            momentum: true,
            damping: DEFAULT_DAMPING,
            velocity_factor: DEFAULT_VELOCITY_FACTOR,
            friction: DEFAULT_FRICTION,
            epsilon: DEFAULT_EPSILON,
        }
    }
}

impl SliderConfig {
    /// Damped drag that snaps on release without inertia.
    #[must_use]
    pub fn without_momentum() -> Self {
        Self {
            momentum: false,
            ..Self::default()
        }
    }

    /// Clamps user-supplied values into ranges where the decay loop terminates.
    ///
    /// Non-finite values fall back to their defaults.
    #[must_use]
    pub fn sanitized(self) -> Self {
        let or_default = |value: f64, default: f64| if value.is_finite() { value } else { default };

        Self {
            momentum: self.momentum,
            damping: or_default(self.damping, DEFAULT_DAMPING).clamp(f64::EPSILON, 1.0),
            velocity_factor: or_default(self.velocity_factor, DEFAULT_VELOCITY_FACTOR).max(0.0),
            friction: or_default(self.friction, DEFAULT_FRICTION).clamp(0.0, MAX_FRICTION),
            epsilon: or_default(self.epsilon, DEFAULT_EPSILON).max(MIN_EPSILON),
        }
    }
}

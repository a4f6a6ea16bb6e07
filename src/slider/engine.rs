//! Gesture and momentum state machine for one photo strip.
//!
//! ```text
//!            start                 end (|v| > ε, momentum on)
//!   Idle ───────────▶ Dragging ───────────────────────────▶ MomentumDecay
//!    ▲                   │ end (otherwise)                        │ frame: offset -= v, v *= friction
//!    │                   ▼                                        │
//!    └──── frame ─── Snapping                 |v| < ε: snap ──────┘
//! ```
//!
//! The engine is driven by three kinds of calls: gesture input, animation
//! frames and passive scroll notifications. It never schedules frames itself;
//! calls that need a follow-up frame (or need one cancelled) return a
//! [`FrameCommand`] for the host to carry out. At rest the strip's offset is
//! always an exact multiple of the slide width and exactly one indicator is lit.

use super::config::SliderConfig;
use super::surface::{IndicatorSet, StripSurface};

/// Where the slider is in its gesture lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SliderPhase {
    Idle,
    /// A finger is down; raw input deltas move the strip.
    Dragging,
    /// Released without momentum; waiting one frame for the eased snap.
    Snapping,
    /// Released with momentum; one decay step per frame.
    MomentumDecay,
}

/// Pointer or touch input along the strip's horizontal axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureInput {
    Start { x: f64 },
    Move { x: f64 },
    End,
}

/// Follow-up the host must perform on its animation-frame scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameCommand {
    /// Call [`PhotoSlider::on_frame`] on the next rendered frame.
    Schedule,
    /// Drop the frame requested earlier for this strip.
    Cancel,
}

/// Per-gesture bookkeeping, alive from start to end of one drag.
#[derive(Debug, Clone, Copy, PartialEq)]
struct GestureSession {
    start_position: f64,
    last_position: f64,
    base_offset: f64,
}

/// Touch-driven, index-snapping carousel over a host strip.
pub struct PhotoSlider<S, I> {
    strip: S,
    indicators: I,
    config: SliderConfig,
    phase: SliderPhase,
    gesture: Option<GestureSession>,
    velocity: f64,
    active_index: Option<usize>,
}

impl<S: StripSurface, I: IndicatorSet> PhotoSlider<S, I> {
    /// Binds a slider to a strip and lights the indicator for its current offset.
    pub fn new(strip: S, indicators: I, config: SliderConfig) -> Self {
        let mut slider = Self {
            strip,
            indicators,
            config: config.sanitized(),
            phase: SliderPhase::Idle,
            gesture: None,
            velocity: 0.0,
            active_index: None,
        };
        slider.reset_indicators();
        slider
    }

    #[must_use]
    pub const fn phase(&self) -> SliderPhase {
        self.phase
    }

    /// Index of the lit indicator; `None` for an empty strip.
    #[must_use]
    pub const fn active_index(&self) -> Option<usize> {
        self.active_index
    }

    #[must_use]
    pub const fn velocity(&self) -> f64 {
        self.velocity
    }

    #[must_use]
    pub const fn config(&self) -> &SliderConfig {
        &self.config
    }

    #[must_use]
    pub const fn strip(&self) -> &S {
        &self.strip
    }

    #[must_use]
    pub const fn indicators(&self) -> &I {
        &self.indicators
    }

    /// Whether a frame requested by this slider is still outstanding.
    #[must_use]
    pub const fn frame_pending(&self) -> bool {
        matches!(self.phase, SliderPhase::Snapping | SliderPhase::MomentumDecay)
    }

    /// Dispatches one gesture input.
    pub fn handle_input(&mut self, input: GestureInput) -> Option<FrameCommand> {
        match input {
            GestureInput::Start { x } => self.gesture_start(x),
            GestureInput::Move { x } => {
                self.gesture_move(x);
                None
            }
            GestureInput::End => self.gesture_end(),
        }
    }

    /// Begins a drag at `x`.
    ///
    /// Ignored while a drag is already in progress. Interrupting a snap or a
    /// momentum loop returns [`FrameCommand::Cancel`] so the pending frame does
    /// not fight the finger.
    pub fn gesture_start(&mut self, x: f64) -> Option<FrameCommand> {
        if self.strip.image_count() == 0 {
            return None;
        }
        if self.phase == SliderPhase::Dragging {
            tracing::trace!("gesture start ignored, drag already active");
            return None;
        }

        let command = self.frame_pending().then_some(FrameCommand::Cancel);

        self.strip.set_smooth_scrolling(false);
        self.velocity = 0.0;
        self.gesture = Some(GestureSession {
            start_position: x,
            last_position: x,
            base_offset: self.strip.scroll_offset(),
        });
        self.phase = SliderPhase::Dragging;

        tracing::trace!(x, interrupted = command.is_some(), "drag started");
        command
    }

    /// Moves the strip with the finger, damped, and updates the indicator live.
    pub fn gesture_move(&mut self, x: f64) {
        if self.phase != SliderPhase::Dragging {
            return;
        }
        let Some(gesture) = self.gesture.as_mut() else {
            return;
        };

        let delta = x - gesture.start_position;
        if self.config.momentum {
            self.velocity = (x - gesture.last_position) * self.config.velocity_factor;
        }
        gesture.last_position = x;
        let target = gesture.base_offset - delta * self.config.damping;

        let offset = self.clamp_offset(target);
        self.strip.set_scroll_offset(offset);
        self.sync_to_offset();
    }

    /// Releases the drag into either a snap or a momentum loop.
    ///
    /// Always returns [`FrameCommand::Schedule`] after a real drag.
    pub fn gesture_end(&mut self) -> Option<FrameCommand> {
        if self.phase != SliderPhase::Dragging {
            return None;
        }
        self.gesture = None;

        if self.config.momentum && self.velocity.abs() > self.config.epsilon {
            tracing::trace!(velocity = self.velocity, "entering momentum decay");
            self.phase = SliderPhase::MomentumDecay;
        } else {
            self.velocity = 0.0;
            self.snap_to_nearest();
            self.phase = SliderPhase::Snapping;
        }

        Some(FrameCommand::Schedule)
    }

    /// Advances one animation frame.
    ///
    /// Returns [`FrameCommand::Schedule`] while momentum is still decaying.
    pub fn on_frame(&mut self) -> Option<FrameCommand> {
        match self.phase {
            SliderPhase::Snapping => {
                self.phase = SliderPhase::Idle;
                None
            }
            SliderPhase::MomentumDecay => {
                let offset = self.clamp_offset(self.strip.scroll_offset() - self.velocity);
                self.strip.set_scroll_offset(offset);
                self.velocity *= self.config.friction;
                self.sync_to_offset();

                if self.velocity.abs() < self.config.epsilon {
                    self.velocity = 0.0;
                    self.snap_to_nearest();
                    self.phase = SliderPhase::Idle;
                    tracing::trace!(index = ?self.active_index, "momentum settled");
                    None
                } else {
                    Some(FrameCommand::Schedule)
                }
            }
            SliderPhase::Idle | SliderPhase::Dragging => None,
        }
    }

    /// Re-derives the lit indicator after a scroll the slider did not cause.
    pub fn on_scroll(&mut self) {
        self.sync_to_offset();
    }

    /// Current slide width, measured fresh from the host layout.
    fn slide_width(&self) -> Option<f64> {
        let width = self
            .strip
            .first_image_width()
            .unwrap_or_else(|| self.strip.strip_width());
        (width.is_finite() && width > 0.0).then_some(width)
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    fn index_for(&self, offset: f64, width: f64) -> Option<usize> {
        let last = self.strip.image_count().checked_sub(1)?;
        let nearest = (offset / width).round().max(0.0) as usize;
        Some(nearest.min(last))
    }

    #[allow(clippy::cast_precision_loss)]
    fn clamp_offset(&self, offset: f64) -> f64 {
        let max = match (self.slide_width(), self.strip.image_count().checked_sub(1)) {
            (Some(width), Some(last)) => last as f64 * width,
            _ => f64::INFINITY,
        };
        offset.clamp(0.0, max)
    }

    /// Aligns the offset to the nearest whole photo and re-enables easing.
    #[allow(clippy::cast_precision_loss)]
    fn snap_to_nearest(&mut self) {
        self.strip.set_smooth_scrolling(true);

        let Some(width) = self.slide_width() else {
            return;
        };
        let Some(index) = self.index_for(self.strip.scroll_offset(), width) else {
            return;
        };

        self.strip.set_scroll_offset(index as f64 * width);
        self.light(index);
    }

    fn sync_to_offset(&mut self) {
        let Some(width) = self.slide_width() else {
            return;
        };
        if let Some(index) = self.index_for(self.strip.scroll_offset(), width) {
            self.light(index);
        }
    }

    /// Moves the lit indicator to `index`, touching only the two dots involved.
    fn light(&mut self, index: usize) {
        if self.active_index == Some(index) || index >= self.indicators.len() {
            return;
        }
        if let Some(previous) = self.active_index {
            self.indicators.set_active(previous, false);
        }
        self.indicators.set_active(index, true);
        self.active_index = Some(index);
    }

    /// Puts every indicator into a known state on attach.
    fn reset_indicators(&mut self) {
        if self.strip.image_count() == 0 || self.indicators.is_empty() {
            return;
        }

        let index = self
            .slide_width()
            .and_then(|width| self.index_for(self.strip.scroll_offset(), width))
            .unwrap_or(0)
            .min(self.indicators.len() - 1);

        for i in 0..self.indicators.len() {
            self.indicators.set_active(i, i == index);
        }
        self.active_index = Some(index);
    }
}

impl<S, I> std::fmt::Debug for PhotoSlider<S, I> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PhotoSlider")
            .field("phase", &self.phase)
            .field("active_index", &self.active_index)
            .field("velocity", &self.velocity)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

//! Photo strip slider.
//!
//! Turns a horizontally scrollable row of photos into an index-snapping
//! carousel with damped drag, optional release momentum and a row of position
//! indicators kept in sync with the visible photo.
//!
//! The engine is host-agnostic: layout reads and scroll writes go through the
//! [`StripSurface`] and [`IndicatorSet`] traits, and animation frames are
//! requested through returned [`FrameCommand`]s rather than scheduled
//! internally.
//!
//! # Examples
//!
//! ```
//! use listing_map::slider::{
//!     GestureInput, HeadlessIndicators, HeadlessStrip, PhotoSlider, SliderConfig, StripSurface,
//! };
//!
//! let mut slider = PhotoSlider::new(
//!     HeadlessStrip::new(3, 300.0),
//!     HeadlessIndicators::new(3),
//!     SliderConfig::without_momentum(),
//! );
//!
//! slider.handle_input(GestureInput::Start { x: 500.0 });
//! slider.handle_input(GestureInput::Move { x: 250.0 });
//! slider.handle_input(GestureInput::End);
//! while slider.on_frame().is_some() {}
//!
//! assert_eq!(slider.active_index(), Some(1));
//! assert_eq!(slider.strip().scroll_offset(), 300.0);
//! ```

pub mod config;
pub mod engine;
pub mod registry;
pub mod surface;

pub use config::SliderConfig;
pub use engine::{FrameCommand, GestureInput, PhotoSlider, SliderPhase};
pub use registry::{AttachOutcome, SliderRegistry, StripId};
pub use surface::{HeadlessIndicators, HeadlessStrip, IndicatorSet, StripSurface};

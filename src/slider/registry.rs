//! Per-page bookkeeping of attached sliders.
//!
//! Each open popup owns at most one photo strip. The registry keys sliders by
//! the listing the strip belongs to, so re-attaching the same strip (a popup
//! re-rendered with the same content) never binds a second set of handlers.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::config::SliderConfig;
use super::engine::{FrameCommand, GestureInput, PhotoSlider};
use super::surface::{IndicatorSet, StripSurface};

/// Identifies one photo strip on the page by its listing id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StripId(pub i64);

impl fmt::Display for StripId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "strip-{}", self.0)
    }
}

/// Result of [`SliderRegistry::attach`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachOutcome {
    Attached,
    /// The strip already had a slider; the existing binding was kept.
    AlreadyAttached,
    /// Indicator count does not match the photo count; the strip stays a
    /// plain scrollable row.
    Disabled,
}

type BoxedSlider = PhotoSlider<Box<dyn StripSurface>, Box<dyn IndicatorSet>>;

/// All sliders living on the current page.
pub struct SliderRegistry {
    config: SliderConfig,
    sliders: BTreeMap<StripId, BoxedSlider>,
}

impl SliderRegistry {
    #[must_use]
    pub fn new(config: SliderConfig) -> Self {
        Self {
            config: config.sanitized(),
            sliders: BTreeMap::new(),
        }
    }

    /// Strips that currently have a slider bound.
    pub fn strip_ids(&self) -> impl Iterator<Item = StripId> + '_ {
        self.sliders.keys().copied()
    }

    /// Binds a slider to a strip unless one is already bound.
    pub fn attach(
        &mut self,
        id: StripId,
        strip: Box<dyn StripSurface>,
        indicators: Box<dyn IndicatorSet>,
    ) -> AttachOutcome {
        if self.sliders.contains_key(&id) {
            tracing::debug!(strip = %id, "slider already attached");
            return AttachOutcome::AlreadyAttached;
        }

        let images = strip.image_count();
        if images > 0 && indicators.len() != images {
            tracing::warn!(
                strip = %id,
                images,
                indicators = indicators.len(),
                "indicator count mismatch, slider disabled"
            );
            return AttachOutcome::Disabled;
        }

        self.sliders
            .insert(id, PhotoSlider::new(strip, indicators, self.config));
        tracing::debug!(strip = %id, images, "slider attached");
        AttachOutcome::Attached
    }

    /// Unbinds a strip, returning whether it still had a frame outstanding.
    pub fn detach(&mut self, id: StripId) -> bool {
        self.sliders
            .remove(&id)
            .is_some_and(|slider| slider.frame_pending())
    }

    /// Routes gesture input to the strip's slider.
    pub fn handle_input(&mut self, id: StripId, input: GestureInput) -> Option<FrameCommand> {
        self.sliders.get_mut(&id)?.handle_input(input)
    }

    pub fn on_frame(&mut self, id: StripId) -> Option<FrameCommand> {
        self.sliders.get_mut(&id)?.on_frame()
    }

    pub fn on_scroll(&mut self, id: StripId) {
        if let Some(slider) = self.sliders.get_mut(&id) {
            slider.on_scroll();
        }
    }

    #[must_use]
    pub fn get(&self, id: StripId) -> Option<&BoxedSlider> {
        self.sliders.get(&id)
    }

    #[must_use]
    pub fn contains(&self, id: StripId) -> bool {
        self.sliders.contains_key(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sliders.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sliders.is_empty()
    }
}

impl Default for SliderRegistry {
    fn default() -> Self {
        Self::new(SliderConfig::default())
    }
}

impl fmt::Debug for SliderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SliderRegistry")
            .field("config", &self.config)
            .field("strips", &self.sliders.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::slider::surface::{HeadlessIndicators, HeadlessStrip};

    #[test]
    fn second_attach_keeps_first_binding() {
        let mut registry = SliderRegistry::default();
        let dots = Rc::new(RefCell::new(HeadlessIndicators::new(3)));

        let first = registry.attach(
            StripId(1),
            Box::new(HeadlessStrip::new(3, 300.0)),
            Box::new(Rc::clone(&dots)),
        );
        let toggles_after_first = dots.borrow().toggles();

        let second = registry.attach(
            StripId(1),
            Box::new(HeadlessStrip::new(3, 300.0)),
            Box::new(Rc::clone(&dots)),
        );

        assert_eq!(first, AttachOutcome::Attached);
        assert_eq!(second, AttachOutcome::AlreadyAttached);
        assert_eq!(dots.borrow().toggles(), toggles_after_first);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn mismatched_indicators_disable_slider() {
        let mut registry = SliderRegistry::default();
        let outcome = registry.attach(
            StripId(7),
            Box::new(HeadlessStrip::new(3, 300.0)),
            Box::new(HeadlessIndicators::new(2)),
        );
        assert_eq!(outcome, AttachOutcome::Disabled);
        assert!(registry.is_empty());
        assert_eq!(
            registry.handle_input(StripId(7), GestureInput::Start { x: 1.0 }),
            None
        );
    }

    #[test]
    fn empty_strip_attaches_but_stays_inert() {
        let mut registry = SliderRegistry::default();
        let outcome = registry.attach(
            StripId(2),
            Box::new(HeadlessStrip::empty(300.0)),
            Box::new(HeadlessIndicators::new(0)),
        );
        assert_eq!(outcome, AttachOutcome::Attached);
        assert_eq!(
            registry.handle_input(StripId(2), GestureInput::Start { x: 10.0 }),
            None
        );
    }

    #[test]
    fn detach_reports_pending_frame() {
        let mut registry = SliderRegistry::default();
        registry.attach(
            StripId(3),
            Box::new(HeadlessStrip::new(4, 200.0)),
            Box::new(HeadlessIndicators::new(4)),
        );
        registry.handle_input(StripId(3), GestureInput::Start { x: 400.0 });
        registry.handle_input(StripId(3), GestureInput::Move { x: 300.0 });
        let command = registry.handle_input(StripId(3), GestureInput::End);

        assert_eq!(command, Some(FrameCommand::Schedule));
        assert!(registry.detach(StripId(3)));
        assert!(!registry.contains(StripId(3)));
        assert!(!registry.detach(StripId(3)));
    }
}

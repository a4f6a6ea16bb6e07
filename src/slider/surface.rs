//! Host surfaces the slider reads from and writes to.
//!
//! The engine never touches markup directly. A host (a browser binding, a
//! native widget, a test) implements [`StripSurface`] for the scrollable photo
//! strip and [`IndicatorSet`] for the row of position dots. The engine only
//! reads layout widths and the scroll offset, and only writes the scroll
//! offset, the easing flag and each dot's active flag.
//!
//! [`HeadlessStrip`] and [`HeadlessIndicators`] are in-memory surfaces with a
//! fixed layout, for hosts that have no layout engine of their own.
//!
//! Hosts usually keep their own handle to the element they hand over, so both
//! traits are also implemented for `Rc<RefCell<T>>`.

use std::cell::RefCell;
use std::rc::Rc;

/// A horizontally scrollable strip of photos.
pub trait StripSurface {
    /// Number of photo elements in the strip. Fixed for the strip's lifetime.
    fn image_count(&self) -> usize;

    /// Rendered width of the first photo, if the strip has one.
    ///
    /// Measured at call time; layouts change between popup opens.
    fn first_image_width(&self) -> Option<f64>;

    /// Rendered width of the strip itself.
    fn strip_width(&self) -> f64;

    /// Current horizontal scroll offset.
    fn scroll_offset(&self) -> f64;

    fn set_scroll_offset(&mut self, offset: f64);

    /// Toggles eased scrolling for programmatic offset changes.
    ///
    /// Direct manipulation runs with easing off so the strip tracks the finger
    /// without latency.
    fn set_smooth_scrolling(&mut self, enabled: bool);
}

/// Position dots, one per photo, parallel to the strip's images.
pub trait IndicatorSet {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn set_active(&mut self, index: usize, active: bool);
}

impl<T: StripSurface + ?Sized> StripSurface for Box<T> {
    fn image_count(&self) -> usize {
        (**self).image_count()
    }

    fn first_image_width(&self) -> Option<f64> {
        (**self).first_image_width()
    }

    fn strip_width(&self) -> f64 {
        (**self).strip_width()
    }

    fn scroll_offset(&self) -> f64 {
        (**self).scroll_offset()
    }

    fn set_scroll_offset(&mut self, offset: f64) {
        (**self).set_scroll_offset(offset);
    }

    fn set_smooth_scrolling(&mut self, enabled: bool) {
        (**self).set_smooth_scrolling(enabled);
    }
}

impl<T: IndicatorSet + ?Sized> IndicatorSet for Box<T> {
    fn len(&self) -> usize {
        (**self).len()
    }

    fn set_active(&mut self, index: usize, active: bool) {
        (**self).set_active(index, active);
    }
}

impl<T: StripSurface> StripSurface for Rc<RefCell<T>> {
    fn image_count(&self) -> usize {
        self.borrow().image_count()
    }

    fn first_image_width(&self) -> Option<f64> {
        self.borrow().first_image_width()
    }

    fn strip_width(&self) -> f64 {
        self.borrow().strip_width()
    }

    fn scroll_offset(&self) -> f64 {
        self.borrow().scroll_offset()
    }

    fn set_scroll_offset(&mut self, offset: f64) {
        self.borrow_mut().set_scroll_offset(offset);
    }

    fn set_smooth_scrolling(&mut self, enabled: bool) {
        self.borrow_mut().set_smooth_scrolling(enabled);
    }
}

impl<T: IndicatorSet> IndicatorSet for Rc<RefCell<T>> {
    fn len(&self) -> usize {
        self.borrow().len()
    }

    fn set_active(&mut self, index: usize, active: bool) {
        self.borrow_mut().set_active(index, active);
    }
}

/// In-memory strip with fixed photo widths.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeadlessStrip {
    image_widths: Vec<f64>,
    strip_width: f64,
    scroll_offset: f64,
    smooth: bool,
}

impl HeadlessStrip {
    /// A strip of `image_count` photos, each `slide_width` wide, scrolled to 0.
    #[must_use]
    pub fn new(image_count: usize, slide_width: f64) -> Self {
        Self {
            image_widths: vec![slide_width; image_count],
            strip_width: slide_width,
            scroll_offset: 0.0,
            smooth: true,
        }
    }

    /// A strip with no photos.
    #[must_use]
    pub fn empty(strip_width: f64) -> Self {
        Self::new(0, strip_width)
    }

    #[must_use]
    pub fn with_offset(mut self, offset: f64) -> Self {
        self.scroll_offset = offset;
        self
    }

    /// Simulates a relayout, e.g. the popup reopening at a different size.
    pub fn resize(&mut self, slide_width: f64) {
        self.image_widths.iter_mut().for_each(|w| *w = slide_width);
        self.strip_width = slide_width;
    }

    #[must_use]
    pub const fn is_smooth(&self) -> bool {
        self.smooth
    }
}

impl StripSurface for HeadlessStrip {
    fn image_count(&self) -> usize {
        self.image_widths.len()
    }

    fn first_image_width(&self) -> Option<f64> {
        self.image_widths.first().copied()
    }

    fn strip_width(&self) -> f64 {
        self.strip_width
    }

    fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    fn set_scroll_offset(&mut self, offset: f64) {
        self.scroll_offset = offset;
    }

    fn set_smooth_scrolling(&mut self, enabled: bool) {
        self.smooth = enabled;
    }
}

/// In-memory indicator dots that count every flag change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeadlessIndicators {
    active: Vec<bool>,
    toggles: usize,
}

impl HeadlessIndicators {
    #[must_use]
    pub fn new(count: usize) -> Self {
        Self {
            active: vec![false; count],
            toggles: 0,
        }
    }

    /// Indices currently marked active.
    #[must_use]
    pub fn active_indices(&self) -> Vec<usize> {
        self.active
            .iter()
            .enumerate()
            .filter_map(|(i, &on)| on.then_some(i))
            .collect()
    }

    /// Number of `set_active` calls that changed a flag.
    #[must_use]
    pub const fn toggles(&self) -> usize {
        self.toggles
    }
}

impl IndicatorSet for HeadlessIndicators {
    fn len(&self) -> usize {
        self.active.len()
    }

    fn set_active(&mut self, index: usize, active: bool) {
        if let Some(flag) = self.active.get_mut(index) {
            if *flag != active {
                *flag = active;
                self.toggles += 1;
            }
        }
    }
}

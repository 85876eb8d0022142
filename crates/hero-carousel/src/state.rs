//! Per-carousel state records.
//!
//! The page keeps one [`CarouselState`] per decorated block in a slot map
//! keyed by [`CarouselId`]. Document nodes carry only the attribute contract;
//! the timer handle, suspension flags, and observer live here.

use hero_carousel_core::Property;
use slotmap::new_key_type;

use crate::autoplay::Autoplay;
use crate::dom::NodeId;
use crate::observer::VisibilityObserver;
use crate::viewport::Viewport;

new_key_type! {
    /// A unique identifier for a carousel on a page.
    pub struct CarouselId;
}

/// An indicator control targeting one slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Indicator {
    /// The slide position this indicator shows.
    pub target: usize,
    /// The list item carrying `data-target-slide`.
    pub item: NodeId,
    /// The actuatable button inside the item.
    pub button: NodeId,
}

/// One slide of a carousel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slide {
    /// Position in the carousel, fixed at construction.
    pub index: usize,
    /// The slide element.
    pub element: NodeId,
    /// Stable element id, `<carousel-id>-slide-<index>`.
    pub dom_id: String,
    /// The indicator for this slide, absent for single-slide carousels.
    pub indicator: Option<Indicator>,
}

/// The ordered slides of a carousel, built once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlideRegistry {
    slides: Vec<Slide>,
}

impl SlideRegistry {
    /// Wrap slides that are already in order.
    pub fn new(slides: Vec<Slide>) -> Self {
        Self { slides }
    }

    /// Number of slides.
    pub fn len(&self) -> usize {
        self.slides.len()
    }

    /// Whether there are no slides.
    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    /// Slide at a position.
    pub fn get(&self, index: usize) -> Option<&Slide> {
        self.slides.get(index)
    }

    /// All slides in order.
    pub fn iter(&self) -> impl Iterator<Item = &Slide> {
        self.slides.iter()
    }

    /// Slide elements in order.
    pub fn elements(&self) -> Vec<NodeId> {
        self.slides.iter().map(|s| s.element).collect()
    }

    /// Indicator buttons in slide order.
    pub fn indicator_buttons(&self) -> Vec<NodeId> {
        self.slides
            .iter()
            .filter_map(|s| s.indicator.map(|i| i.button))
            .collect()
    }

    /// Whether indicators were built.
    pub fn has_indicators(&self) -> bool {
        self.slides.iter().any(|s| s.indicator.is_some())
    }

    /// The indicator whose button is `button`.
    pub fn indicator_for_button(&self, button: NodeId) -> Option<Indicator> {
        self.slides
            .iter()
            .filter_map(|s| s.indicator)
            .find(|i| i.button == button)
    }
}

/// The previous/next buttons found when binding events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavControls {
    /// `button.slide-prev`.
    pub prev: NodeId,
    /// `button.slide-next`.
    pub next: NodeId,
}

/// Everything the page knows about one carousel.
#[derive(Debug)]
pub struct CarouselState {
    pub(crate) dom_id: String,
    pub(crate) element: NodeId,
    pub(crate) slides: SlideRegistry,
    pub(crate) active: Property<usize>,
    pub(crate) autoplay: Autoplay,
    pub(crate) viewport: Box<dyn Viewport>,
    pub(crate) observer: Option<VisibilityObserver>,
    pub(crate) controls: Option<NavControls>,
}

impl CarouselState {
    pub(crate) fn new(
        dom_id: String,
        element: NodeId,
        slides: SlideRegistry,
        autoplay: Autoplay,
        viewport: Box<dyn Viewport>,
    ) -> Self {
        Self {
            dom_id,
            element,
            slides,
            active: Property::new(0),
            autoplay,
            viewport,
            observer: None,
            controls: None,
        }
    }

    /// The carousel's element id, e.g. `carousel-hero-1`.
    pub fn dom_id(&self) -> &str {
        &self.dom_id
    }

    /// The block element.
    pub fn element(&self) -> NodeId {
        self.element
    }

    /// The slides.
    pub fn slides(&self) -> &SlideRegistry {
        &self.slides
    }

    /// The committed active index.
    pub fn active_index(&self) -> usize {
        self.active.get()
    }

    /// Autoplay lifecycle state.
    pub fn autoplay(&self) -> &Autoplay {
        &self.autoplay
    }

    /// The scroll surface.
    pub fn viewport(&self) -> &dyn Viewport {
        self.viewport.as_ref()
    }

    /// Whether reactive behaviour (observer, controls, autoplay) is installed.
    pub fn is_bound(&self) -> bool {
        self.observer.is_some()
    }

    /// The bound previous/next controls.
    pub fn controls(&self) -> Option<NavControls> {
        self.controls
    }
}

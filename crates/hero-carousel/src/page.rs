//! The page: document, carousels, timers, and the event queue.
//!
//! A [`Page`] owns everything. Input and timer fires become [`PageEvent`]s
//! that are handled one at a time, in order, each reading and writing
//! carousel state synchronously.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use hero_carousel::{Document, Page};
//!
//! let mut doc = Document::new();
//! let block = doc.create_element_with_classes("div", &["carousel-hero"]);
//! for _ in 0..3 {
//!     let row = doc.create_element("div");
//!     doc.append_child(block, row).unwrap();
//! }
//!
//! let mut page = Page::new(doc);
//! page.decorate(block).unwrap();
//! assert_eq!(page.active_slide(block), Some(0));
//!
//! page.advance_to(Duration::from_millis(6000)).unwrap();
//! assert_eq!(page.active_slide(block), Some(1));
//! ```

use std::collections::{HashMap, VecDeque};
use std::time::Duration;

use hero_carousel_core::logging::targets;
use hero_carousel_core::{Clock, IdGenerator, Signal, SystemClock};
use slotmap::SlotMap;

use crate::autoplay::{Autoplay, CarouselTimers};
use crate::config::CarouselConfig;
use crate::decorate;
use crate::dom::{Document, NodeId};
use crate::error::{Error, Result};
use crate::event::{Key, PageEvent};
use crate::navigation::{self, Control};
use crate::observer::VisibilityObserver;
use crate::placeholders::Placeholders;
use crate::reconcile;
use crate::state::{CarouselId, CarouselState};
use crate::viewport::HorizontalStrip;

/// Payload of [`Page::slide_changed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlideChanged {
    /// The carousel whose active slide changed.
    pub carousel: CarouselId,
    /// The newly active slide.
    pub index: usize,
}

/// A content page hosting carousel blocks.
#[derive(Debug)]
pub struct Page {
    document: Document,
    config: CarouselConfig,
    placeholders: Placeholders,
    ids: IdGenerator,
    carousels: SlotMap<CarouselId, CarouselState>,
    by_element: HashMap<NodeId, CarouselId>,
    timers: CarouselTimers,
    queue: VecDeque<PageEvent>,
    now: Duration,
    clock: Box<dyn Clock>,
    slide_changed: Signal<SlideChanged>,
}

impl Page {
    /// A page with default settings, English strings, and the system clock.
    pub fn new(document: Document) -> Self {
        Self::build(document, CarouselConfig::default())
    }

    /// A page with custom settings.
    pub fn with_config(document: Document, config: CarouselConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(document, config))
    }

    fn build(document: Document, config: CarouselConfig) -> Self {
        Self {
            document,
            ids: IdGenerator::new(config.block_name.clone()),
            config,
            placeholders: Placeholders::new(),
            carousels: SlotMap::with_key(),
            by_element: HashMap::new(),
            timers: CarouselTimers::new(),
            queue: VecDeque::new(),
            now: Duration::ZERO,
            clock: Box::new(SystemClock::new()),
            slide_changed: Signal::new(),
        }
    }

    /// Use resolved strings for labels. Affects carousels decorated afterwards.
    pub fn set_placeholders(&mut self, placeholders: Placeholders) {
        self.placeholders = placeholders;
    }

    /// Replace the time source used by [`Page::tick`].
    pub fn set_clock(&mut self, clock: impl Clock + 'static) {
        self.clock = Box::new(clock);
    }

    /// The document.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// The document, for host-side edits.
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    /// The page's settings.
    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    /// The resolved label strings.
    pub fn placeholders(&self) -> &Placeholders {
        &self.placeholders
    }

    /// Current position on the page timeline.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Emitted whenever a carousel commits a new active slide.
    pub fn slide_changed(&self) -> &Signal<SlideChanged> {
        &self.slide_changed
    }

    // =========================================================================
    // Construction
    // =========================================================================

    /// Turn `block` into a carousel and bring it to life.
    ///
    /// Decorating an element that already is a carousel returns its id
    /// unchanged. A carousel whose controls cannot be bound stays as static
    /// slides; that is logged, not returned as an error.
    pub fn decorate(&mut self, block: NodeId) -> Result<CarouselId> {
        if let Some(&id) = self.by_element.get(&block) {
            tracing::debug!(target: targets::PAGE, ?block, "already decorated");
            return Ok(id);
        }
        let id = self.build_structure(block)?;
        self.bind(id)?;
        self.run_until_idle()?;
        Ok(id)
    }

    /// Build the static structure of a carousel without binding behaviour.
    ///
    /// Returns the existing id if `block` is already a carousel.
    pub fn build_structure(&mut self, block: NodeId) -> Result<CarouselId> {
        if let Some(&id) = self.by_element.get(&block) {
            return Ok(id);
        }
        if !self.document.exists(block) {
            return Err(Error::NodeNotFound(block));
        }
        let dom_id = self.ids.next_id();
        let structure = decorate::build(
            &mut self.document,
            block,
            &dom_id,
            &self.config,
            &self.placeholders,
        )?;

        let viewport = HorizontalStrip::new(self.config.viewport_width, structure.slides.len());
        let state = CarouselState::new(
            dom_id,
            block,
            structure.slides,
            Autoplay::new(self.config.autoplay_interval()),
            Box::new(viewport),
        );
        let id = self.carousels.insert(state);
        self.by_element.insert(block, id);
        Ok(id)
    }

    /// Install observer, controls, and autoplay on a built carousel.
    ///
    /// Returns `true` if the carousel is now interactive. Single-slide
    /// carousels and carousels with missing controls stay static.
    pub fn bind(&mut self, id: CarouselId) -> Result<bool> {
        let state = self
            .carousels
            .get_mut(id)
            .ok_or(Error::UnknownCarousel(id))?;
        if state.is_bound() {
            return Ok(true);
        }

        let controls = match decorate::bind_controls(
            &self.document,
            state.element,
            &state.dom_id,
            &self.config,
        ) {
            Ok(Some(controls)) => controls,
            Ok(None) => {
                tracing::debug!(
                    target: targets::DECORATE,
                    carousel = %state.dom_id,
                    "nothing to bind"
                );
                return Ok(false);
            }
            Err(err @ Error::MissingControl { .. }) => {
                tracing::warn!(
                    target: targets::DECORATE,
                    carousel = %state.dom_id,
                    %err,
                    "binding aborted, slides stay static"
                );
                return Ok(false);
            }
            Err(err) => return Err(err),
        };
        state.controls = Some(controls);

        let mut observer = VisibilityObserver::new(self.config.visibility_threshold);
        for slide in state.slides.iter() {
            observer.observe(slide.index, slide.element);
        }
        state.observer = Some(observer);
        state.autoplay.start(&mut self.timers, id, self.now)?;

        // The observer reports every slide once it starts watching.
        self.queue.push_back(PageEvent::ScrollSettled(id));
        tracing::debug!(target: targets::DECORATE, carousel = %state.dom_id, "bound");
        Ok(true)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// The carousel decorated on `block`.
    pub fn carousel_for(&self, block: NodeId) -> Option<CarouselId> {
        self.by_element.get(&block).copied()
    }

    /// A carousel's state.
    pub fn carousel(&self, id: CarouselId) -> Option<&CarouselState> {
        self.carousels.get(id)
    }

    /// All carousels on the page.
    pub fn carousels(&self) -> impl Iterator<Item = (CarouselId, &CarouselState)> {
        self.carousels.iter()
    }

    /// The committed active slide of the carousel on `block`.
    pub fn active_slide(&self, block: NodeId) -> Option<usize> {
        self.state_for(block).map(CarouselState::active_index)
    }

    /// Whether the carousel on `block` has a live autoplay timer.
    pub fn is_autoplay_running(&self, block: NodeId) -> bool {
        self.state_for(block)
            .is_some_and(|state| state.autoplay.is_running())
    }

    /// Number of live timers across the page.
    pub fn live_timer_count(&self) -> usize {
        self.timers.live_count()
    }

    fn state_for(&self, block: NodeId) -> Option<&CarouselState> {
        self.carousel_for(block).and_then(|id| self.carousels.get(id))
    }

    fn resolve(&self, block: NodeId) -> Result<CarouselId> {
        self.carousel_for(block).ok_or(Error::NotACarousel(block))
    }

    /// The bound carousel whose element contains `node`.
    fn bound_carousel_containing(&self, node: NodeId) -> Option<CarouselId> {
        let element = self
            .document
            .closest(node, |id, _| self.by_element.contains_key(&id))?;
        let id = self.by_element.get(&element).copied()?;
        self.carousels
            .get(id)
            .is_some_and(CarouselState::is_bound)
            .then_some(id)
    }

    // =========================================================================
    // Programmatic control
    // =========================================================================

    /// Scroll the carousel on `block` to slide `index`, wrapping out-of-range
    /// values. Does not restart autoplay.
    ///
    /// Returns the normalized index.
    pub fn show_slide(&mut self, block: NodeId, index: i64) -> Result<usize> {
        let id = self.resolve(block)?;
        let index = self.request(id, index)?;
        self.run_until_idle()?;
        Ok(index)
    }

    /// Start autoplay on the carousel. Returns `false` if it was already
    /// running or the carousel is static.
    pub fn start_autoplay(&mut self, block: NodeId) -> Result<bool> {
        let id = self.resolve(block)?;
        let state = self
            .carousels
            .get_mut(id)
            .ok_or(Error::UnknownCarousel(id))?;
        if !state.is_bound() {
            tracing::debug!(target: targets::AUTOPLAY, carousel = %state.dom_id, "static carousel");
            return Ok(false);
        }
        state.autoplay.start(&mut self.timers, id, self.now)
    }

    /// Stop autoplay on the carousel. Returns `false` if it was not running.
    pub fn stop_autoplay(&mut self, block: NodeId) -> Result<bool> {
        let id = self.resolve(block)?;
        let state = self
            .carousels
            .get_mut(id)
            .ok_or(Error::UnknownCarousel(id))?;
        Ok(state.autoplay.stop(&mut self.timers))
    }

    /// Restart the autoplay countdown from now.
    pub fn reset_autoplay(&mut self, block: NodeId) -> Result<()> {
        let id = self.resolve(block)?;
        let state = self
            .carousels
            .get_mut(id)
            .ok_or(Error::UnknownCarousel(id))?;
        if !state.is_bound() {
            return Ok(());
        }
        state.autoplay.reset(&mut self.timers, id, self.now)
    }

    // =========================================================================
    // Input
    // =========================================================================

    /// Queue an event without processing it.
    pub fn post_event(&mut self, event: PageEvent) {
        tracing::trace!(target: targets::PAGE, kind = event.kind(), "event posted");
        self.queue.push_back(event);
    }

    /// Process queued events until the queue is empty.
    pub fn run_until_idle(&mut self) -> Result<()> {
        while let Some(event) = self.queue.pop_front() {
            self.dispatch(event)?;
        }
        Ok(())
    }

    fn send(&mut self, event: PageEvent) -> Result<()> {
        self.post_event(event);
        self.run_until_idle()
    }

    /// A click on `target`.
    pub fn click(&mut self, target: NodeId) -> Result<()> {
        self.send(PageEvent::Click { target })
    }

    /// A key press while `target` has focus.
    pub fn key_down(&mut self, target: NodeId, key: Key) -> Result<()> {
        self.send(PageEvent::KeyDown { target, key })
    }

    /// The pointer entered `target`.
    ///
    /// Enter and leave do not bubble: only the carousel element itself
    /// changes the hover state, so moving across links inside a slide keeps
    /// autoplay suspended.
    pub fn pointer_enter(&mut self, target: NodeId) -> Result<()> {
        self.send(PageEvent::PointerEnter { target })
    }

    /// The pointer left `target`.
    pub fn pointer_leave(&mut self, target: NodeId) -> Result<()> {
        self.send(PageEvent::PointerLeave { target })
    }

    /// `target` received focus.
    pub fn focus_in(&mut self, target: NodeId) -> Result<()> {
        self.send(PageEvent::FocusIn { target })
    }

    /// `target` lost focus to `related`.
    pub fn focus_out(&mut self, target: NodeId, related: Option<NodeId>) -> Result<()> {
        self.send(PageEvent::FocusOut { target, related })
    }

    /// The user scrolled the carousel on `block` to `left`.
    pub fn scroll_to(&mut self, block: NodeId, left: f64) -> Result<()> {
        self.send(PageEvent::Scroll {
            carousel: block,
            left,
        })
    }

    // =========================================================================
    // Time
    // =========================================================================

    /// Move the timeline to `target`, firing every timer due on the way in
    /// deadline order. Moving backwards only drains the queue.
    #[tracing::instrument(skip(self), target = "hero_carousel::page", level = "trace")]
    pub fn advance_to(&mut self, target: Duration) -> Result<()> {
        self.run_until_idle()?;
        while let Some(deadline) = self.timers.next_deadline() {
            if deadline > target {
                break;
            }
            self.now = self.now.max(deadline);
            if let Some(fired) = self.timers.pop_due(self.now) {
                self.post_event(PageEvent::Timer(fired));
            }
            self.run_until_idle()?;
        }
        self.now = self.now.max(target);
        self.run_until_idle()
    }

    /// Move the timeline forward by `delta`.
    pub fn advance_by(&mut self, delta: Duration) -> Result<()> {
        self.advance_to(self.now + delta)
    }

    /// Catch the timeline up with the page clock.
    pub fn tick(&mut self) -> Result<()> {
        let now = self.clock.now();
        self.advance_to(now)
    }

    // =========================================================================
    // Dispatch
    // =========================================================================

    fn dispatch(&mut self, event: PageEvent) -> Result<()> {
        tracing::trace!(target: targets::PAGE, kind = event.kind(), now = ?self.now, "dispatch");
        match event {
            PageEvent::Timer(fired) => match self.timers.owner(fired.id) {
                Some(id) => self.autoplay_advance(id),
                None => {
                    tracing::trace!(target: targets::PAGE, timer = ?fired.id, "stale timer fire");
                    Ok(())
                }
            },
            PageEvent::ScrollSettled(id) => self.reconcile(id),
            PageEvent::Click { target } => self.activate(target),
            PageEvent::KeyDown { target, key } => {
                if key.activates() {
                    self.activate(target)
                } else {
                    Ok(())
                }
            }
            PageEvent::PointerEnter { target } => self.set_hovered(target, true),
            PageEvent::PointerLeave { target } => self.set_hovered(target, false),
            PageEvent::FocusIn { target } => self.focus_changed(target, None, true),
            PageEvent::FocusOut { target, related } => self.focus_changed(target, related, false),
            PageEvent::Scroll { carousel, left } => self.user_scroll(carousel, left),
        }
    }

    fn request(&mut self, id: CarouselId, target: i64) -> Result<usize> {
        let state = self
            .carousels
            .get_mut(id)
            .ok_or(Error::UnknownCarousel(id))?;
        let index = navigation::request_slide(&mut self.document, state, target)?;
        self.queue.push_back(PageEvent::ScrollSettled(id));
        Ok(index)
    }

    fn autoplay_advance(&mut self, id: CarouselId) -> Result<()> {
        let Some(state) = self.carousels.get(id) else {
            return Ok(());
        };
        let next = Control::Next.target(state.active_index());
        tracing::debug!(
            target: targets::AUTOPLAY,
            carousel = %state.dom_id,
            now = ?self.now,
            "autoplay advance"
        );
        self.request(id, next).map(|_| ())
    }

    fn reconcile(&mut self, id: CarouselId) -> Result<()> {
        let Some(state) = self.carousels.get_mut(id) else {
            return Ok(());
        };
        let changed = reconcile::settle_and_reconcile(&mut self.document, state)?;
        for index in changed {
            self.slide_changed.emit(SlideChanged { carousel: id, index });
        }
        Ok(())
    }

    fn activate(&mut self, target: NodeId) -> Result<()> {
        let Some(id) = self.bound_carousel_containing(target) else {
            return Ok(());
        };
        let Some(state) = self.carousels.get(id) else {
            return Ok(());
        };
        let Some(control) = navigation::resolve_control(&self.document, state, target) else {
            return Ok(());
        };
        let destination = control.target(state.active_index());
        tracing::debug!(
            target: targets::NAVIGATION,
            carousel = %state.dom_id,
            ?control,
            "control activated"
        );

        self.request(id, destination)?;
        if let Some(state) = self.carousels.get_mut(id) {
            state.autoplay.reset(&mut self.timers, id, self.now)?;
        }
        Ok(())
    }

    fn set_hovered(&mut self, target: NodeId, hovered: bool) -> Result<()> {
        let Some(id) = self.by_element.get(&target).copied() else {
            return Ok(());
        };
        if let Some(state) = self.carousels.get_mut(id).filter(|state| state.is_bound()) {
            state
                .autoplay
                .set_hovered(hovered, &mut self.timers, id, self.now)?;
        }
        Ok(())
    }

    fn focus_changed(
        &mut self,
        target: NodeId,
        related: Option<NodeId>,
        focused: bool,
    ) -> Result<()> {
        let Some(id) = self.bound_carousel_containing(target) else {
            return Ok(());
        };
        let Some(state) = self.carousels.get_mut(id) else {
            return Ok(());
        };
        if !focused
            && related.is_some_and(|related| self.document.contains(state.element, related))
        {
            tracing::trace!(target: targets::AUTOPLAY, carousel = %state.dom_id, "focus stayed inside");
            return Ok(());
        }
        state
            .autoplay
            .set_focused(focused, &mut self.timers, id, self.now)
    }

    fn user_scroll(&mut self, block: NodeId, left: f64) -> Result<()> {
        let Some(id) = self.carousel_for(block) else {
            return Ok(());
        };
        let Some(state) = self.carousels.get_mut(id) else {
            return Ok(());
        };
        state.viewport.jump_to(left);
        tracing::debug!(target: targets::NAVIGATION, carousel = %state.dom_id, left, "user scroll");
        self.queue.push_back(PageEvent::ScrollSettled(id));
        Ok(())
    }
}

//! Slide requests and navigation controls.
//!
//! A request normalizes its target, unblocks keyboard access to the target
//! slide, and starts a scroll. It never writes the active index: that is
//! committed by the reconciler once the scroll settles.

use hero_carousel_core::logging::targets;

use crate::a11y;
use crate::dom::{Document, NodeId};
use crate::error::{Error, Result};
use crate::state::CarouselState;

/// Wrap `target` into `0..count`. `None` when there are no slides.
pub fn normalize_index(target: i64, count: usize) -> Option<usize> {
    if count == 0 {
        return None;
    }
    let count = i64::try_from(count).ok()?;
    usize::try_from(target.rem_euclid(count)).ok()
}

/// Ask the carousel to show slide `target` (any integer).
///
/// Returns the normalized index the viewport is now scrolling to.
pub fn request_slide(doc: &mut Document, state: &mut CarouselState, target: i64) -> Result<usize> {
    let index = normalize_index(target, state.slides.len())
        .ok_or_else(|| Error::NoSlides(state.dom_id.clone()))?;

    if let Some(slide) = state.slides.get(index) {
        a11y::unblock_focus(doc, slide.element)?;
    }
    let offset = state.viewport.slide_offset(index);
    state.viewport.animate_to(offset);

    tracing::debug!(
        target: targets::NAVIGATION,
        carousel = %state.dom_id,
        requested = target,
        index,
        "slide requested"
    );
    Ok(index)
}

/// A user-actuatable navigation control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// The previous button.
    Previous,
    /// The next button.
    Next,
    /// An indicator button targeting a slide.
    Indicator(usize),
}

impl Control {
    /// The slide this control asks for, given the committed active index.
    pub fn target(self, active: usize) -> i64 {
        let active = i64::try_from(active).unwrap_or(i64::MAX);
        match self {
            Self::Previous => active - 1,
            Self::Next => active.saturating_add(1),
            Self::Indicator(target) => i64::try_from(target).unwrap_or(i64::MAX),
        }
    }
}

/// Identify the control `node` belongs to, if any.
///
/// Disabled buttons do not actuate, matching how the host treats them.
pub fn resolve_control(doc: &Document, state: &CarouselState, node: NodeId) -> Option<Control> {
    let button = doc.closest(node, |_, n| n.tag() == "button")?;
    if !doc.contains(state.element, button) || doc.has_attribute(button, "disabled") {
        return None;
    }
    if let Some(controls) = state.controls {
        if button == controls.prev {
            return Some(Control::Previous);
        }
        if button == controls.next {
            return Some(Control::Next);
        }
    }
    state
        .slides
        .indicator_for_button(button)
        .map(|indicator| Control::Indicator(indicator.target))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wraparound_matches_euclidean_modulo() {
        for count in 1..=5usize {
            for target in -12i64..=12 {
                let n = count as i64;
                let expected = (((target % n) + n) % n) as usize;
                assert_eq!(normalize_index(target, count), Some(expected));
            }
        }
    }

    #[test]
    fn test_edges_wrap_to_ends() {
        assert_eq!(normalize_index(-1, 3), Some(2));
        assert_eq!(normalize_index(3, 3), Some(0));
        assert_eq!(normalize_index(1, 3), Some(1));
    }

    #[test]
    fn test_zero_slides_has_no_index() {
        assert_eq!(normalize_index(0, 0), None);
    }

    #[test]
    fn test_control_targets() {
        assert_eq!(Control::Previous.target(0), -1);
        assert_eq!(Control::Next.target(2), 3);
        assert_eq!(Control::Indicator(1).target(2), 1);
    }
}

//! Accessibility projection.
//!
//! Everything here is derived from the active index and the slide count;
//! nothing is stored. [`project`] computes the per-slide and per-indicator
//! state, [`apply`] writes it to the document.

use crate::dom::{Document, NodeId};
use crate::error::Result;

/// Tags whose elements can take keyboard focus inside a slide.
pub const INTERACTIVE_TAGS: &[&str] = &["a", "button", "input", "select", "textarea"];

/// ARIA role of the carousel element.
pub const REGION_ROLE: &str = "region";

/// Projected state of one slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlideAccess {
    /// Whether the slide is hidden from assistive technology.
    pub hidden: bool,
    /// Whether its interactive descendants are reachable with Tab.
    pub tabbable: bool,
}

/// Projected state of a whole carousel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projection {
    /// One entry per slide.
    pub slides: Vec<SlideAccess>,
    /// Disabled flag per indicator (empty when there are none).
    pub indicators_disabled: Vec<bool>,
}

/// Project `active` onto `slide_count` slides.
pub fn project(active: usize, slide_count: usize, with_indicators: bool) -> Projection {
    let slides = (0..slide_count)
        .map(|index| SlideAccess {
            hidden: index != active,
            tabbable: index == active,
        })
        .collect();
    let indicators_disabled = if with_indicators {
        (0..slide_count).map(|index| index == active).collect()
    } else {
        Vec::new()
    };
    Projection {
        slides,
        indicators_disabled,
    }
}

/// Interactive descendants of a slide.
pub fn interactive_descendants(doc: &Document, slide: NodeId) -> Vec<NodeId> {
    doc.find_all(slide, |_, node| INTERACTIVE_TAGS.contains(&node.tag()))
}

/// Make a slide's interactive descendants reachable with Tab again.
pub fn unblock_focus(doc: &mut Document, slide: NodeId) -> Result<()> {
    for element in interactive_descendants(doc, slide) {
        doc.remove_attribute(element, "tabindex")?;
    }
    Ok(())
}

/// Write a projection onto slides and indicator buttons.
///
/// `slides` and `indicator_buttons` are in slide order; the projection's
/// vectors are matched against them pairwise.
pub fn apply(
    doc: &mut Document,
    projection: &Projection,
    slides: &[NodeId],
    indicator_buttons: &[NodeId],
) -> Result<()> {
    for (&slide, access) in slides.iter().zip(&projection.slides) {
        doc.set_attribute(slide, "aria-hidden", access.hidden.to_string())?;
        for element in interactive_descendants(doc, slide) {
            if access.tabbable {
                doc.remove_attribute(element, "tabindex")?;
            } else {
                doc.set_attribute(element, "tabindex", "-1")?;
            }
        }
    }
    for (&button, &disabled) in indicator_buttons
        .iter()
        .zip(&projection.indicators_disabled)
    {
        if disabled {
            doc.set_attribute(button, "disabled", "true")?;
        } else {
            doc.remove_attribute(button, "disabled")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn visible(projection: &Projection) -> Vec<usize> {
        projection
            .slides
            .iter()
            .enumerate()
            .filter(|(_, s)| !s.hidden && s.tabbable)
            .map(|(i, _)| i)
            .collect()
    }

    #[test]
    fn test_projection_has_single_active() {
        for active in 0..4 {
            let projection = project(active, 4, true);
            assert_eq!(visible(&projection), vec![active]);
            let disabled: Vec<_> = projection
                .indicators_disabled
                .iter()
                .enumerate()
                .filter(|(_, d)| **d)
                .map(|(i, _)| i)
                .collect();
            assert_eq!(disabled, vec![active]);
        }
    }

    #[test]
    fn test_projection_without_indicators() {
        let projection = project(0, 1, false);
        assert!(projection.indicators_disabled.is_empty());
        assert_eq!(visible(&projection), vec![0]);
    }

    #[test]
    fn test_apply_sets_hidden_tabindex_and_disabled() {
        let mut doc = Document::new();
        let slides: Vec<_> = (0..2).map(|_| doc.create_element("li")).collect();
        let links: Vec<_> = slides
            .iter()
            .map(|&slide| {
                let link = doc.create_element("a");
                doc.append_child(slide, link).unwrap();
                link
            })
            .collect();
        let buttons: Vec<_> = (0..2).map(|_| doc.create_element("button")).collect();

        apply(&mut doc, &project(1, 2, true), &slides, &buttons).unwrap();

        assert_eq!(doc.attribute(slides[0], "aria-hidden"), Some("true"));
        assert_eq!(doc.attribute(slides[1], "aria-hidden"), Some("false"));
        assert_eq!(doc.attribute(links[0], "tabindex"), Some("-1"));
        assert!(!doc.has_attribute(links[1], "tabindex"));
        assert!(!doc.has_attribute(buttons[0], "disabled"));
        assert_eq!(doc.attribute(buttons[1], "disabled"), Some("true"));
    }
}

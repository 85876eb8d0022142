//! One-time construction of the carousel structure.
//!
//! Turns the block's raw content rows into slides, indicators, and
//! navigation buttons. Binding the reactive machinery is a separate step
//! ([`bind_controls`]) so a structure that lost its controls still renders
//! as static slides.

use hero_carousel_core::logging::targets;

use crate::a11y;
use crate::config::CarouselConfig;
use crate::dom::{Document, NodeId};
use crate::error::{Error, Result};
use crate::placeholders::Placeholders;
use crate::state::{Indicator, NavControls, Slide, SlideRegistry};

/// Class of the previous button.
pub const PREV_CLASS: &str = "slide-prev";
/// Class of the next button.
pub const NEXT_CLASS: &str = "slide-next";

/// Attribute prefixes of authoring instrumentation carried from rows to slides.
pub const INSTRUMENTATION_PREFIXES: &[&str] = &["data-aue-", "data-richtext-"];

const HEADINGS: &[&str] = &["h1", "h2", "h3", "h4", "h5", "h6"];

/// The static structure produced for one block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Structure {
    /// The slides with their indicators.
    pub slides: SlideRegistry,
    /// The `ul` holding the slides.
    pub slides_list: NodeId,
    /// The `ol` holding indicators, absent for single-slide carousels.
    pub indicators_list: Option<NodeId>,
}

/// Build the carousel structure inside `block`.
///
/// `carousel_id` becomes the block's `id` and the prefix of slide ids.
pub fn build(
    doc: &mut Document,
    block: NodeId,
    carousel_id: &str,
    config: &CarouselConfig,
    placeholders: &Placeholders,
) -> Result<Structure> {
    if !doc.exists(block) {
        return Err(Error::NodeNotFound(block));
    }
    doc.set_attribute(block, "id", carousel_id)?;
    let rows = doc.children_with_tag(block, "div");
    let is_single_slide = rows.len() < 2;

    doc.set_attribute(block, "role", a11y::REGION_ROLE)?;
    doc.set_attribute(block, "aria-roledescription", placeholders.carousel())?;

    let container_class = config.class("slides-container");
    let container = doc.create_element_with_classes("div", &[container_class.as_str()]);

    let slides_class = config.class("slides");
    let slides_list = doc.create_element_with_classes("ul", &[slides_class.as_str()]);
    doc.prepend_child(block, slides_list)?;

    let mut indicators_list = None;
    if !is_single_slide {
        let nav = doc.create_element("nav");
        doc.set_attribute(nav, "aria-label", placeholders.slide_controls())?;
        let list_class = config.class("slide-indicators");
        let list = doc.create_element_with_classes("ol", &[list_class.as_str()]);
        doc.append_child(nav, list)?;
        doc.append_child(block, nav)?;
        indicators_list = Some(list);

        let buttons_class = config.class("navigation-buttons");
        let buttons = doc.create_element_with_classes("div", &[buttons_class.as_str()]);
        for (class, label) in [
            (PREV_CLASS, placeholders.previous_slide()),
            (NEXT_CLASS, placeholders.next_slide()),
        ] {
            let button = doc.create_element_with_classes("button", &[class]);
            doc.set_attribute(button, "type", "button")?;
            doc.set_attribute(button, "aria-label", label)?;
            doc.append_child(buttons, button)?;
        }
        doc.append_child(container, buttons)?;
    }

    let count = rows.len();
    let mut slides = Vec::with_capacity(count);
    for (index, row) in rows.into_iter().enumerate() {
        let slide = create_slide(doc, row, index, carousel_id, config)?;
        move_instrumentation(doc, row, slide.element)?;
        doc.append_child(slides_list, slide.element)?;

        let indicator = match indicators_list {
            Some(list) => Some(create_indicator(doc, list, index, count, config, placeholders)?),
            None => None,
        };
        doc.detach(row)?;
        slides.push(Slide { indicator, ..slide });
    }

    doc.append_child(container, slides_list)?;
    doc.prepend_child(block, container)?;

    tracing::debug!(
        target: targets::DECORATE,
        carousel = carousel_id,
        slides = count,
        "structure built"
    );
    Ok(Structure {
        slides: SlideRegistry::new(slides),
        slides_list,
        indicators_list,
    })
}

fn create_slide(
    doc: &mut Document,
    row: NodeId,
    index: usize,
    carousel_id: &str,
    config: &CarouselConfig,
) -> Result<Slide> {
    let slide_class = config.class("slide");
    let element = doc.create_element_with_classes("li", &[slide_class.as_str()]);
    let dom_id = format!("{carousel_id}-slide-{index}");
    doc.set_attribute(element, "data-slide-index", index.to_string())?;
    doc.set_attribute(element, "id", dom_id.as_str())?;

    let image_class = config.class("slide-image");
    let content_class = config.class("slide-content");
    for (column_index, column) in doc.children_with_tag(row, "div").into_iter().enumerate() {
        let class = if column_index == 0 {
            &image_class
        } else {
            &content_class
        };
        doc.add_class(column, class)?;
        doc.append_child(element, column)?;
    }

    let heading_id = doc
        .find_first(element, |_, n| {
            HEADINGS.contains(&n.tag()) && n.attributes().contains_key("id")
        })
        .and_then(|heading| doc.attribute(heading, "id"))
        .map(str::to_string);
    if let Some(heading_id) = heading_id {
        doc.set_attribute(element, "aria-labelledby", heading_id)?;
    }

    Ok(Slide {
        index,
        element,
        dom_id,
        indicator: None,
    })
}

fn create_indicator(
    doc: &mut Document,
    list: NodeId,
    index: usize,
    count: usize,
    config: &CarouselConfig,
    placeholders: &Placeholders,
) -> Result<Indicator> {
    let item_class = config.class("slide-indicator");
    let item = doc.create_element_with_classes("li", &[item_class.as_str()]);
    doc.set_attribute(item, "data-target-slide", index.to_string())?;

    let button = doc.create_element("button");
    doc.set_attribute(button, "type", "button")?;
    doc.set_attribute(button, "aria-label", placeholders.indicator_label(index, count))?;
    doc.append_child(item, button)?;
    doc.append_child(list, item)?;

    Ok(Indicator {
        target: index,
        item,
        button,
    })
}

/// Move authoring instrumentation attributes from `from` to `to`.
pub fn move_instrumentation(doc: &mut Document, from: NodeId, to: NodeId) -> Result<()> {
    let names: Vec<String> = doc
        .node(from)
        .map(|node| {
            node.attributes()
                .keys()
                .filter(|name| INSTRUMENTATION_PREFIXES.iter().any(|p| name.starts_with(*p)))
                .cloned()
                .collect()
        })
        .unwrap_or_default();

    for name in names {
        if let Some(value) = doc.remove_attribute(from, &name)? {
            doc.set_attribute(to, &name, value)?;
        }
    }
    Ok(())
}

/// Locate the navigation controls that event binding needs.
///
/// `Ok(None)` means the block has no indicator list, so there is nothing to
/// bind. Missing previous/next buttons next to an indicator list are a
/// broken structure and reported as an error.
pub fn bind_controls(
    doc: &Document,
    block: NodeId,
    carousel_id: &str,
    config: &CarouselConfig,
) -> Result<Option<NavControls>> {
    let list_class = config.class("slide-indicators");
    if doc.first_by_class(block, &list_class).is_none() {
        return Ok(None);
    }
    let prev = doc
        .first_by_class(block, PREV_CLASS)
        .ok_or_else(|| Error::missing_control(carousel_id, "previous"))?;
    let next = doc
        .first_by_class(block, NEXT_CLASS)
        .ok_or_else(|| Error::missing_control(carousel_id, "next"))?;
    Ok(Some(NavControls { prev, next }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block_with_rows(doc: &mut Document, rows: usize) -> NodeId {
        let block = doc.create_element_with_classes("div", &["carousel-hero"]);
        for index in 0..rows {
            let row = doc.create_element("div");
            doc.set_attribute(row, "data-aue-resource", format!("urn:row:{index}"))
                .unwrap();
            let image = doc.create_element("div");
            let content = doc.create_element("div");
            let heading = doc.create_element("h2");
            doc.set_attribute(heading, "id", format!("heading-{index}")).unwrap();
            doc.append_child(content, heading).unwrap();
            doc.append_child(row, image).unwrap();
            doc.append_child(row, content).unwrap();
            doc.append_child(block, row).unwrap();
        }
        block
    }

    #[test]
    fn test_build_multi_slide_structure() {
        let mut doc = Document::new();
        let block = block_with_rows(&mut doc, 3);
        let config = CarouselConfig::default();

        let structure =
            build(&mut doc, block, "carousel-hero-1", &config, &Placeholders::new()).unwrap();

        assert_eq!(structure.slides.len(), 3);
        assert_eq!(doc.attribute(block, "role"), Some("region"));
        assert_eq!(doc.attribute(block, "aria-roledescription"), Some("Carousel"));

        let slide = structure.slides.get(1).unwrap();
        assert_eq!(slide.dom_id, "carousel-hero-1-slide-1");
        assert_eq!(doc.attribute(slide.element, "id"), Some("carousel-hero-1-slide-1"));
        assert_eq!(doc.attribute(slide.element, "aria-labelledby"), Some("heading-1"));
        assert_eq!(
            doc.attribute(slide.element, "data-aue-resource"),
            Some("urn:row:1")
        );

        let columns = doc.children(slide.element).to_vec();
        assert!(doc.has_class(columns[0], "carousel-hero-slide-image"));
        assert!(doc.has_class(columns[1], "carousel-hero-slide-content"));

        let indicator = slide.indicator.unwrap();
        assert_eq!(doc.attribute(indicator.item, "data-target-slide"), Some("1"));
        assert_eq!(
            doc.attribute(indicator.button, "aria-label"),
            Some("Show Slide 2 of 3")
        );

        // Rows are gone; the container comes first in the block.
        assert!(doc.children_with_tag(block, "div").len() == 1);
        assert!(doc.has_class(doc.children(block)[0], "carousel-hero-slides-container"));

        let controls = bind_controls(&doc, block, "carousel-hero-1", &config)
            .unwrap()
            .unwrap();
        assert_eq!(doc.attribute(controls.prev, "aria-label"), Some("Previous Slide"));
        assert_eq!(doc.attribute(controls.next, "aria-label"), Some("Next Slide"));
    }

    #[test]
    fn test_build_single_slide_has_no_controls() {
        let mut doc = Document::new();
        let block = block_with_rows(&mut doc, 1);
        let config = CarouselConfig::default();

        let structure =
            build(&mut doc, block, "carousel-hero-1", &config, &Placeholders::new()).unwrap();

        assert_eq!(structure.slides.len(), 1);
        assert!(structure.indicators_list.is_none());
        assert!(!structure.slides.has_indicators());
        assert!(doc.first_by_class(block, PREV_CLASS).is_none());
        assert_eq!(bind_controls(&doc, block, "carousel-hero-1", &config).unwrap(), None);
    }

    #[test]
    fn test_slide_without_heading_has_no_label() {
        let mut doc = Document::new();
        let block = doc.create_element("div");
        let row = doc.create_element("div");
        let image = doc.create_element("div");
        doc.append_child(row, image).unwrap();
        doc.append_child(block, row).unwrap();

        let structure = build(
            &mut doc,
            block,
            "carousel-hero-2",
            &CarouselConfig::default(),
            &Placeholders::new(),
        )
        .unwrap();
        let slide = structure.slides.get(0).unwrap();
        assert!(!doc.has_attribute(slide.element, "aria-labelledby"));
    }

    #[test]
    fn test_label_skips_headings_without_id() {
        let mut doc = Document::new();
        let block = doc.create_element("div");
        let row = doc.create_element("div");
        let content = doc.create_element("div");
        let eyebrow = doc.create_element("h3");
        let title = doc.create_element("h2");
        doc.set_attribute(title, "id", "spring-sale").unwrap();
        doc.append_child(content, eyebrow).unwrap();
        doc.append_child(content, title).unwrap();
        doc.append_child(row, content).unwrap();
        doc.append_child(block, row).unwrap();

        let structure = build(
            &mut doc,
            block,
            "carousel-hero-3",
            &CarouselConfig::default(),
            &Placeholders::new(),
        )
        .unwrap();
        let slide = structure.slides.get(0).unwrap();
        assert_eq!(doc.attribute(slide.element, "aria-labelledby"), Some("spring-sale"));
    }

    #[test]
    fn test_missing_next_button_is_reported() {
        let mut doc = Document::new();
        let block = block_with_rows(&mut doc, 2);
        let config = CarouselConfig::default();
        build(&mut doc, block, "carousel-hero-1", &config, &Placeholders::new()).unwrap();

        let next = doc.first_by_class(block, NEXT_CLASS).unwrap();
        doc.detach(next).unwrap();

        let err = bind_controls(&doc, block, "carousel-hero-1", &config).unwrap_err();
        assert!(matches!(err, Error::MissingControl { control: "next", .. }));
    }
}

//! Walkthrough of a three-slide hero carousel on a virtual timeline.
//!
//! Decorates a block, lets autoplay advance, clicks an indicator, and shows
//! that the countdown restarts after manual navigation.
//!
//! Run with: RUST_LOG=hero_carousel=debug cargo run -p hero-carousel --example walkthrough

use std::time::Duration;

use hero_carousel::{Document, FrozenClock, NodeId, Page};
use tracing_subscriber::EnvFilter;

fn build_block(doc: &mut Document) -> Result<NodeId, hero_carousel::Error> {
    let block = doc.create_element_with_classes("div", &["carousel-hero", "block"]);
    for title in ["Spring collection", "Free shipping", "Gift cards"] {
        let row = doc.create_element("div");
        let image = doc.create_element("div");
        let content = doc.create_element("div");
        let heading = doc.create_element("h2");
        doc.set_attribute(heading, "id", title.to_lowercase().replace(' ', "-"))?;
        doc.set_text(heading, title)?;
        doc.append_child(content, heading)?;
        doc.append_child(row, image)?;
        doc.append_child(row, content)?;
        doc.append_child(block, row)?;
    }
    Ok(block)
}

fn report(page: &Page, block: NodeId, label: &str) {
    println!(
        "t={:>6}ms  {:<28} active={:?}  autoplay={}",
        page.now().as_millis(),
        label,
        page.active_slide(block),
        page.is_autoplay_running(block),
    );
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    println!("Hero carousel walkthrough");
    println!("=========================");
    println!();

    let mut doc = Document::new();
    let block = build_block(&mut doc)?;

    let mut page = Page::new(doc);
    page.set_clock(FrozenClock);
    page.slide_changed().connect(|change| {
        tracing::info!(index = change.index, "slide changed");
    });

    let id = page.decorate(block)?;
    if let Some(state) = page.carousel(id) {
        println!("Decorated '{}' with {} slides", state.dom_id(), state.slides().len());
    }
    report(&page, block, "decorated");

    page.advance_to(Duration::from_millis(6000))?;
    report(&page, block, "first autoplay advance");

    page.advance_to(Duration::from_millis(6500))?;
    let indicator = page
        .carousel(id)
        .and_then(|state| state.slides().get(2))
        .and_then(|slide| slide.indicator)
        .map(|indicator| indicator.button);
    if let Some(button) = indicator {
        page.click(button)?;
    }
    report(&page, block, "clicked indicator 3");

    page.advance_to(Duration::from_millis(12_499))?;
    report(&page, block, "just before next advance");

    page.advance_to(Duration::from_millis(12_500))?;
    report(&page, block, "advance wraps around");

    page.pointer_enter(block)?;
    page.advance_by(Duration::from_secs(30))?;
    report(&page, block, "hovered for 30s");

    page.pointer_leave(block)?;
    page.advance_by(Duration::from_millis(6000))?;
    report(&page, block, "pointer left, one interval");

    Ok(())
}

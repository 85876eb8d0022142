//! Visibility reconciliation.
//!
//! The settled scroll position is the only authority on which slide is
//! active. After every settle the observer is consulted, and each slide it
//! reports as visible is committed: active index, `data-active-slide`, and the
//! accessibility projection are all rewritten from it.

use hero_carousel_core::logging::targets;

use crate::a11y;
use crate::dom::Document;
use crate::error::Result;
use crate::state::CarouselState;

/// Attribute on the carousel element holding the active index.
pub const ACTIVE_SLIDE_ATTR: &str = "data-active-slide";

/// Commit `index` as the active slide and project it onto the document.
///
/// Returns `true` if the active index changed.
pub fn commit_active(doc: &mut Document, state: &mut CarouselState, index: usize) -> Result<bool> {
    let changed = state.active.set(index);
    doc.set_attribute(state.element, ACTIVE_SLIDE_ATTR, index.to_string())?;

    let projection = a11y::project(index, state.slides.len(), state.slides.has_indicators());
    a11y::apply(
        doc,
        &projection,
        &state.slides.elements(),
        &state.slides.indicator_buttons(),
    )?;

    tracing::debug!(
        target: targets::RECONCILE,
        carousel = %state.dom_id,
        index,
        changed,
        "active slide reconciled"
    );
    Ok(changed)
}

/// Let the viewport settle and reconcile against what is now visible.
///
/// Returns every index that was committed as a change, in order.
pub fn settle_and_reconcile(doc: &mut Document, state: &mut CarouselState) -> Result<Vec<usize>> {
    state.viewport.settle();
    let Some(observer) = state.observer.as_mut() else {
        return Ok(Vec::new());
    };
    let records = observer.take_records(state.viewport.as_ref());

    let mut committed = Vec::new();
    for entry in records.into_iter().filter(|e| e.is_visible) {
        tracing::trace!(
            target: targets::RECONCILE,
            carousel = %state.dom_id,
            index = entry.index,
            ratio = entry.ratio,
            "slide became visible"
        );
        if commit_active(doc, state, entry.index)? {
            committed.push(entry.index);
        }
    }
    Ok(committed)
}

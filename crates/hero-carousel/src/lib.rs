//! Hero Carousel - an autoplaying, accessible hero carousel block.
//!
//! The carousel turns a content block's rows into horizontally scrolling
//! slides with indicators and previous/next controls. The active slide is
//! whatever the settled scroll position shows: navigation only starts a
//! scroll, and a visibility reconciler commits the result.
//!
//! Core primitives (timers, signals, properties, clocks) are re-exported from
//! `hero-carousel-core`.
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
//!     doc.append_child(block, row)?;
//! }
//!
//! let mut page = Page::new(doc);
//! page.decorate(block)?;
//! page.slide_changed().connect(|change| println!("now on slide {}", change.index));
//!
//! page.advance_by(Duration::from_secs(6))?;
//! assert_eq!(page.active_slide(block), Some(1));
//! # Ok::<(), hero_carousel::Error>(())
//! ```

pub mod a11y;
pub mod autoplay;
pub mod config;
pub mod decorate;
pub mod dom;
mod error;
pub mod event;
pub mod navigation;
pub mod observer;
pub mod page;
pub mod placeholders;
pub mod reconcile;
pub mod state;
pub mod viewport;

pub use hero_carousel_core::*;

pub use config::CarouselConfig;
pub use dom::{Document, Node, NodeId};
pub use error::{Error, Result};
pub use event::{Key, PageEvent};
pub use page::{Page, SlideChanged};
pub use placeholders::Placeholders;
pub use state::{CarouselId, CarouselState, Slide, SlideRegistry};
pub use viewport::{HorizontalStrip, Viewport};

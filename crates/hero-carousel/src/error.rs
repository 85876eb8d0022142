//! Error types for the carousel block.

use hero_carousel_core::TimerError;

use crate::dom::NodeId;
use crate::state::CarouselId;

/// Result type alias for carousel operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or driving a carousel.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A node id does not belong to the document.
    #[error("Node {0:?} is not part of the document")]
    NodeNotFound(NodeId),

    /// Inserting the node would make it its own ancestor.
    #[error("Cannot insert {child:?} under {parent:?}: it is an ancestor of its new parent")]
    HierarchyCycle { parent: NodeId, child: NodeId },

    /// The element was never decorated as a carousel.
    #[error("Element {0:?} is not a decorated carousel")]
    NotACarousel(NodeId),

    /// The carousel id does not belong to this page.
    #[error("Carousel {0:?} is not on this page")]
    UnknownCarousel(CarouselId),

    /// Navigation was requested on a carousel without slides.
    #[error("Carousel '{0}' has no slides to show")]
    NoSlides(String),

    /// A navigation control expected by event binding is missing.
    #[error("Carousel '{carousel}' is missing its {control} control")]
    MissingControl {
        carousel: String,
        control: &'static str,
    },

    /// Timer error from the core.
    #[error("Timer error: {0}")]
    Timer(#[from] TimerError),

    /// Placeholder document could not be parsed.
    #[error("Invalid placeholders: {0}")]
    Placeholders(#[from] serde_json::Error),

    /// Configuration file could not be parsed.
    #[error("Invalid configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Configuration parsed but holds an unusable value.
    #[error("Invalid value for setting '{setting}': {message}")]
    InvalidSetting { setting: String, message: String },
}

impl Error {
    /// Create a missing-control error.
    pub fn missing_control(carousel: impl Into<String>, control: &'static str) -> Self {
        Self::MissingControl {
            carousel: carousel.into(),
            control,
        }
    }

    /// Create an invalid-setting error.
    pub fn invalid_setting(setting: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidSetting {
            setting: setting.into(),
            message: message.into(),
        }
    }
}

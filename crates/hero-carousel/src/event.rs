//! Events dispatched through the page's cooperative queue.

use hero_carousel_core::TimerFired;

use crate::dom::NodeId;
use crate::state::CarouselId;

/// Keys the carousel reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Enter / Return.
    Enter,
    /// The space bar.
    Space,
    /// Any other key; ignored by the carousel.
    Other,
}

impl Key {
    /// Whether the key activates a focused button.
    pub fn activates(self) -> bool {
        matches!(self, Self::Enter | Self::Space)
    }
}

/// Everything that can happen on a page, processed one at a time in FIFO order.
#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    /// An autoplay timer has fired.
    Timer(TimerFired),

    /// A carousel's viewport has finished scrolling.
    ScrollSettled(CarouselId),

    /// A pointer click.
    Click {
        /// The element that was clicked.
        target: NodeId,
    },

    /// A key press on a focused element.
    KeyDown {
        /// The focused element.
        target: NodeId,
        /// The key.
        key: Key,
    },

    /// The pointer entered an element.
    PointerEnter {
        /// The element entered. Only a carousel element changes hover state.
        target: NodeId,
    },

    /// The pointer left an element.
    PointerLeave {
        /// The element left. Only a carousel element changes hover state.
        target: NodeId,
    },

    /// An element received focus.
    FocusIn {
        /// The newly focused element.
        target: NodeId,
    },

    /// An element lost focus.
    FocusOut {
        /// The element losing focus.
        target: NodeId,
        /// The element receiving focus, if any.
        related: Option<NodeId>,
    },

    /// The user scrolled a carousel directly.
    Scroll {
        /// The carousel element.
        carousel: NodeId,
        /// The new horizontal scroll position.
        left: f64,
    },
}

impl PageEvent {
    /// Short name for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Timer(_) => "timer",
            Self::ScrollSettled(_) => "scroll-settled",
            Self::Click { .. } => "click",
            Self::KeyDown { .. } => "keydown",
            Self::PointerEnter { .. } => "pointerenter",
            Self::PointerLeave { .. } => "pointerleave",
            Self::FocusIn { .. } => "focusin",
            Self::FocusOut { .. } => "focusout",
            Self::Scroll { .. } => "scroll",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_enter_and_space_activate() {
        assert!(Key::Enter.activates());
        assert!(Key::Space.activates());
        assert!(!Key::Other.activates());
    }
}

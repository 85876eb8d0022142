//! Scroll geometry of a carousel's slide strip.
//!
//! Navigation never commits an index itself: it asks the viewport to animate
//! towards a slide, and only the settled scroll position is trusted.

use std::fmt;

/// The scroll surface a carousel's slides live in.
pub trait Viewport: fmt::Debug {
    /// Number of slides laid out in the strip.
    fn slide_count(&self) -> usize;

    /// Scroll offset at which the slide is fully in view.
    fn slide_offset(&self, index: usize) -> f64;

    /// Current settled scroll offset.
    fn scroll_left(&self) -> f64;

    /// Begin a smooth scroll towards `left`. The position changes on [`settle`](Self::settle).
    fn animate_to(&mut self, left: f64);

    /// Move to `left` immediately, abandoning any pending animation.
    fn jump_to(&mut self, left: f64);

    /// Finish any pending animation. Returns `true` if the position moved.
    fn settle(&mut self) -> bool;

    /// Whether an animation is still in flight.
    fn is_animating(&self) -> bool;

    /// Share of the slide's area currently in view, in `[0, 1]`.
    fn intersection_ratio(&self, index: usize) -> f64;
}

/// Slides side by side, each exactly one viewport wide.
#[derive(Debug, Clone, PartialEq)]
pub struct HorizontalStrip {
    width: f64,
    slide_count: usize,
    scroll_left: f64,
    pending: Option<f64>,
}

impl HorizontalStrip {
    /// Create a strip scrolled to the first slide.
    pub fn new(width: f64, slide_count: usize) -> Self {
        Self {
            width,
            slide_count,
            scroll_left: 0.0,
            pending: None,
        }
    }

    fn max_scroll(&self) -> f64 {
        self.width * self.slide_count.saturating_sub(1) as f64
    }

    fn clamp(&self, left: f64) -> f64 {
        if left.is_nan() {
            return self.scroll_left;
        }
        left.clamp(0.0, self.max_scroll())
    }
}

impl Viewport for HorizontalStrip {
    fn slide_count(&self) -> usize {
        self.slide_count
    }

    fn slide_offset(&self, index: usize) -> f64 {
        self.width * index as f64
    }

    fn scroll_left(&self) -> f64 {
        self.scroll_left
    }

    fn animate_to(&mut self, left: f64) {
        self.pending = Some(self.clamp(left));
    }

    fn jump_to(&mut self, left: f64) {
        self.pending = None;
        self.scroll_left = self.clamp(left);
    }

    fn settle(&mut self) -> bool {
        match self.pending.take() {
            Some(target) => {
                let moved = target != self.scroll_left;
                self.scroll_left = target;
                moved
            }
            None => false,
        }
    }

    fn is_animating(&self) -> bool {
        self.pending.is_some()
    }

    fn intersection_ratio(&self, index: usize) -> f64 {
        if index >= self.slide_count || self.width <= 0.0 {
            return 0.0;
        }
        let start = self.slide_offset(index);
        let end = start + self.width;
        let visible = end.min(self.scroll_left + self.width) - start.max(self.scroll_left);
        (visible / self.width).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_animation_only_moves_on_settle() {
        let mut strip = HorizontalStrip::new(100.0, 3);
        strip.animate_to(strip.slide_offset(2));

        assert!(strip.is_animating());
        assert_eq!(strip.scroll_left(), 0.0);
        assert!(strip.settle());
        assert_eq!(strip.scroll_left(), 200.0);
        assert!(!strip.settle());
    }

    #[test]
    fn test_jump_cancels_pending_animation() {
        let mut strip = HorizontalStrip::new(100.0, 3);
        strip.animate_to(200.0);
        strip.jump_to(100.0);

        assert!(!strip.settle());
        assert_eq!(strip.scroll_left(), 100.0);
    }

    #[test]
    fn test_offsets_are_clamped() {
        let mut strip = HorizontalStrip::new(100.0, 3);
        strip.jump_to(10_000.0);
        assert_eq!(strip.scroll_left(), 200.0);
        strip.jump_to(-5.0);
        assert_eq!(strip.scroll_left(), 0.0);
    }

    #[test]
    fn test_intersection_ratios() {
        let mut strip = HorizontalStrip::new(100.0, 3);
        strip.jump_to(40.0);

        assert!((strip.intersection_ratio(0) - 0.6).abs() < 1e-9);
        assert!((strip.intersection_ratio(1) - 0.4).abs() < 1e-9);
        assert_eq!(strip.intersection_ratio(2), 0.0);
        assert_eq!(strip.intersection_ratio(7), 0.0);
    }
}

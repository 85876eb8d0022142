//! Threshold-based visibility observation.
//!
//! Reports a [`VisibilityEntry`] whenever an observed slide crosses the
//! visibility threshold, plus one entry per slide on the first check after it
//! starts being observed. The reconciler consumes these entries; it never
//! looks at requested indices.

use crate::dom::NodeId;
use crate::viewport::Viewport;

/// One visibility change of an observed slide.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibilityEntry {
    /// Position of the slide in its carousel.
    pub index: usize,
    /// The slide element.
    pub target: NodeId,
    /// Share of the slide in view when the change was observed.
    pub ratio: f64,
    /// Whether the slide is at or above the threshold.
    pub is_visible: bool,
}

#[derive(Debug, Clone)]
struct ObservedSlide {
    index: usize,
    target: NodeId,
    last: Option<bool>,
}

/// Watches a set of slides against a single threshold.
#[derive(Debug, Clone)]
pub struct VisibilityObserver {
    threshold: f64,
    targets: Vec<ObservedSlide>,
}

impl VisibilityObserver {
    /// Create an observer with the given threshold ratio.
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            targets: Vec::new(),
        }
    }

    /// The threshold ratio.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Start observing a slide. Observing the same slide twice is a no-op.
    pub fn observe(&mut self, index: usize, target: NodeId) {
        if self.targets.iter().any(|t| t.target == target) {
            return;
        }
        self.targets.push(ObservedSlide {
            index,
            target,
            last: None,
        });
    }

    /// Number of observed slides.
    pub fn observed_count(&self) -> usize {
        self.targets.len()
    }

    /// Compare the viewport against the last reported state of every slide.
    ///
    /// Entries come back in observation order.
    pub fn take_records(&mut self, viewport: &dyn Viewport) -> Vec<VisibilityEntry> {
        let threshold = self.threshold;
        self.targets
            .iter_mut()
            .filter_map(|slide| {
                let ratio = viewport.intersection_ratio(slide.index);
                let is_visible = ratio >= threshold;
                if slide.last == Some(is_visible) {
                    return None;
                }
                slide.last = Some(is_visible);
                Some(VisibilityEntry {
                    index: slide.index,
                    target: slide.target,
                    ratio,
                    is_visible,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Document;
    use crate::viewport::HorizontalStrip;

    fn observed(count: usize) -> (VisibilityObserver, Vec<NodeId>) {
        let mut doc = Document::new();
        let mut observer = VisibilityObserver::new(0.5);
        let nodes: Vec<_> = (0..count).map(|_| doc.create_element("li")).collect();
        for (index, &node) in nodes.iter().enumerate() {
            observer.observe(index, node);
        }
        (observer, nodes)
    }

    #[test]
    fn test_initial_records_cover_every_slide() {
        let (mut observer, nodes) = observed(3);
        let strip = HorizontalStrip::new(100.0, 3);

        let records = observer.take_records(&strip);
        assert_eq!(records.len(), 3);
        assert!(records[0].is_visible);
        assert_eq!(records[0].target, nodes[0]);
        assert!(!records[1].is_visible);
        assert!(observer.take_records(&strip).is_empty());
    }

    #[test]
    fn test_only_crossings_are_reported() {
        let (mut observer, _) = observed(3);
        let mut strip = HorizontalStrip::new(100.0, 3);
        observer.take_records(&strip);

        // Slide 0 still holds 60%: nothing crossed.
        strip.jump_to(40.0);
        assert!(observer.take_records(&strip).is_empty());

        strip.jump_to(100.0);
        let records = observer.take_records(&strip);
        let visible: Vec<_> = records.iter().filter(|r| r.is_visible).map(|r| r.index).collect();
        assert_eq!(visible, vec![1]);
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_duplicate_observe_ignored() {
        let (mut observer, nodes) = observed(2);
        observer.observe(0, nodes[0]);
        assert_eq!(observer.observed_count(), 2);
    }
}

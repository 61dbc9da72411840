//! Optional visualization hooks for traversal sampling and search expansion

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OverlayKind {
    /// A position where the evaluator checked the agent's footprint
    Sample,
    /// A cell the search expanded
    Expanded,
}

/// Receives positions worth highlighting; implementations must not affect the result
pub trait OverlaySink {
    fn mark(&mut self, position: Vec2, kind: OverlayKind);
}

/// Discards every mark
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOverlay;

impl OverlaySink for NoOverlay {
    fn mark(&mut self, _position: Vec2, _kind: OverlayKind) {}
}

/// Records marks in the order they arrive
#[derive(Debug, Clone, Default)]
pub struct OverlayLog {
    marks: Vec<(Vec2, OverlayKind)>,
}

impl OverlayLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn marks(&self) -> &[(Vec2, OverlayKind)] {
        &self.marks
    }

    pub fn positions(&self, kind: OverlayKind) -> impl Iterator<Item = Vec2> + '_ {
        self.marks
            .iter()
            .filter(move |(_, marked)| *marked == kind)
            .map(|(position, _)| *position)
    }

    pub fn count(&self, kind: OverlayKind) -> usize {
        self.positions(kind).count()
    }

    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    pub fn clear(&mut self) {
        self.marks.clear();
    }
}

impl OverlaySink for OverlayLog {
    fn mark(&mut self, position: Vec2, kind: OverlayKind) {
        self.marks.push((position, kind));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlay_log_records_in_order() {
        let mut log = OverlayLog::new();
        log.mark(Vec2::new(0.0, 0.0), OverlayKind::Sample);
        log.mark(Vec2::new(1.0, 0.0), OverlayKind::Expanded);
        log.mark(Vec2::new(0.5, 0.0), OverlayKind::Sample);

        assert_eq!(log.count(OverlayKind::Sample), 2);
        assert_eq!(log.count(OverlayKind::Expanded), 1);
        assert_eq!(
            log.positions(OverlayKind::Sample).collect::<Vec<_>>(),
            vec![Vec2::new(0.0, 0.0), Vec2::new(0.5, 0.0)]
        );

        log.clear();
        assert!(log.is_empty());
    }
}

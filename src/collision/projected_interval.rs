//! One-dimensional intervals produced by projecting shapes onto an axis

use crate::collision::Segment;
use bevy::prelude::*;

/// A shape or segment as it appears when projected onto `axis`.
///
/// Projecting and converting back with [`ProjectedInterval::to_segment`] does not
/// reproduce the original geometry: everything orthogonal to the axis is lost.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedInterval {
    axis: Vec2,
    start: f32,
    end: f32,
}

impl ProjectedInterval {
    /// `axis` is expected to be unit length; this is not checked.
    pub fn new(axis: Vec2, start: f32, end: f32) -> Self {
        Self { axis, start, end }
    }

    pub fn axis(&self) -> Vec2 {
        self.axis
    }

    pub fn start(&self) -> f32 {
        self.start
    }

    pub fn end(&self) -> f32 {
        self.end
    }

    /// Check whether this interval overlaps `other`, which must lie on the same axis.
    ///
    /// With `strict`, intervals that only share an endpoint do not intersect. Both intervals
    /// must satisfy `start <= end`; polygon projections always do.
    pub fn intersects(&self, other: &ProjectedInterval, strict: bool) -> bool {
        if strict {
            (self.start >= other.start && self.start < other.end)
                || (other.start >= self.start && other.start < self.end)
        } else {
            (self.start >= other.start && self.start <= other.end)
                || (other.start >= self.start && other.start <= self.end)
        }
    }

    /// Place the interval back in the plane, along its axis through the origin
    pub fn to_segment(&self) -> Segment {
        Segment::new(self.axis * self.start, self.axis * self.end)
    }
}

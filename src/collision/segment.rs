//! Directed line segments and their projections

use crate::collision::ProjectedInterval;
use bevy::prelude::*;

/// A directed segment from `start` to `end`.
///
/// Derived quantities are computed once at construction; a segment never changes afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    start: Vec2,
    end: Vec2,
    delta: Vec2,
    length_squared: f32,
    length: f32,
    normal: Vec2,
}

impl Segment {
    pub fn new(start: Vec2, end: Vec2) -> Self {
        let delta = end - start;
        let length_squared = delta.length_squared();
        Self {
            start,
            end,
            delta,
            length_squared,
            length: length_squared.sqrt(),
            normal: Vec2::new(-delta.y, delta.x),
        }
    }

    pub fn start(&self) -> Vec2 {
        self.start
    }

    pub fn end(&self) -> Vec2 {
        self.end
    }

    /// `end - start`
    pub fn delta(&self) -> Vec2 {
        self.delta
    }

    pub fn length_squared(&self) -> f32 {
        self.length_squared
    }

    pub fn length(&self) -> f32 {
        self.length
    }

    /// Left-hand perpendicular of the segment, not normalized
    pub fn normal(&self) -> Vec2 {
        self.normal
    }

    /// Project this segment, translated by `offset`, onto `axis`.
    ///
    /// The endpoint order is preserved: the interval's `start` is the projection of this
    /// segment's `start` even when it is the larger of the two.
    pub fn project_onto_axis(&self, offset: Vec2, axis: Vec2) -> ProjectedInterval {
        ProjectedInterval::new(
            axis,
            (self.start + offset).dot(axis),
            (self.end + offset).dot(axis),
        )
    }
}

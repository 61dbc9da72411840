//! Convex polygons and the separating axis test

use crate::collision::{ProjectedInterval, Segment, ShapeGeometry};
use bevy::prelude::*;
use std::sync::LazyLock;

/// Unit axes whose cross product is within this are treated as the same axis
const AXIS_TOLERANCE: f32 = 1e-6;

/// The square covering grid cell (0, 0), used to probe grid cells for overlap
pub static UNIT_SQUARE: LazyLock<Polygon> = LazyLock::new(|| {
    Polygon::new(vec![
        Vec2::new(0.0, 0.0),
        Vec2::new(1.0, 0.0),
        Vec2::new(1.0, 1.0),
        Vec2::new(0.0, 1.0),
    ])
});

/// A convex polygon described by its ordered vertices.
///
/// Vertices must number at least three, describe a convex outline and be wound
/// consistently. None of this is checked here; see `ShapeDefinition` for validated input.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    vertices: Vec<Vec2>,
    edges: Vec<Segment>,
    normals: Vec<Vec2>,
    bounds: Rect,
}

impl Polygon {
    pub fn new(vertices: Vec<Vec2>) -> Self {
        let mut bounds = Rect::from_corners(vertices[0], vertices[0]);
        for vertex in &vertices[1..] {
            bounds.min = bounds.min.min(*vertex);
            bounds.max = bounds.max.max(*vertex);
        }

        let edges: Vec<Segment> = vertices
            .iter()
            .zip(vertices.iter().cycle().skip(1))
            .map(|(start, end)| Segment::new(*start, *end))
            .collect();

        let mut normals = Vec::with_capacity(edges.len());
        for edge in &edges {
            let normal = edge.normal().normalize_or_zero();
            if normal != Vec2::ZERO {
                push_unique_axis(&mut normals, normal);
            }
        }

        Self {
            vertices,
            edges,
            normals,
            bounds,
        }
    }

    /// Axis-aligned rectangle with its minimum corner at the origin
    pub fn rectangle(size: Vec2) -> Self {
        Self::new(vec![
            Vec2::ZERO,
            Vec2::new(size.x, 0.0),
            size,
            Vec2::new(0.0, size.y),
        ])
    }

    pub fn edges(&self) -> &[Segment] {
        &self.edges
    }

    /// Unit edge normals, one per distinct axis
    pub fn normals(&self) -> &[Vec2] {
        &self.normals
    }

    /// Candidate separating axes for a pair of polygons
    pub fn separating_axes(&self, other: &Polygon) -> Vec<Vec2> {
        let mut axes = Vec::with_capacity(self.normals.len() + other.normals.len());
        axes.extend_from_slice(&self.normals);
        for normal in &other.normals {
            push_unique_axis(&mut axes, *normal);
        }
        axes
    }
}

fn push_unique_axis(axes: &mut Vec<Vec2>, axis: Vec2) {
    // Opposite normals describe the same projection axis
    if !axes
        .iter()
        .any(|existing| existing.perp_dot(axis).abs() <= AXIS_TOLERANCE)
    {
        axes.push(axis);
    }
}

impl ShapeGeometry for Polygon {
    fn bounding_box(&self) -> Rect {
        self.bounds
    }

    fn vertices(&self) -> &[Vec2] {
        &self.vertices
    }

    fn project_onto_axis(&self, position: Vec2, axis: Vec2) -> ProjectedInterval {
        let first = self.edges[0].project_onto_axis(position, axis);
        let (start, end) = self.edges[1..]
            .iter()
            .map(|edge| edge.project_onto_axis(position, axis))
            .fold((first.start(), first.end()), |(start, end), projected| {
                (start.min(projected.start()), end.max(projected.end()))
            });

        ProjectedInterval::new(axis, start, end)
    }

    fn intersects_polygon(
        &self,
        other: &Polygon,
        my_position: Vec2,
        other_position: Vec2,
        strict: bool,
    ) -> bool {
        self.separating_axes(other).into_iter().all(|axis| {
            let mine = self.project_onto_axis(my_position, axis);
            let theirs = other.project_onto_axis(other_position, axis);
            mine.intersects(&theirs, strict)
        })
    }
}

use crate::collision::{Shape, ShapeGeometry};
use bevy::prelude::*;

/// Something that moves across the grid: a position and the shape it occupies.
///
/// The shape is translated with the agent but never rotated.
#[derive(Debug, Clone, PartialEq)]
pub struct Agent {
    pub position: Vec2,
    pub shape: Shape,
}

impl Agent {
    pub fn new(position: Vec2, shape: Shape) -> Self {
        Self { position, shape }
    }

    /// Agent occupying a single grid cell
    pub fn unit(position: Vec2) -> Self {
        Self::new(position, Shape::unit_square())
    }

    /// Cells the agent covers at its current position
    pub fn covered_cells(&self, strict: bool) -> Vec<IVec2> {
        self.shape
            .grid_cells_covered_at(self.position, strict)
            .collect()
    }

    /// Width and height of the agent's bounding box
    pub fn extent(&self) -> Vec2 {
        self.shape.bounding_box().size()
    }
}

impl Default for Agent {
    fn default() -> Self {
        Self::unit(Vec2::ZERO)
    }
}

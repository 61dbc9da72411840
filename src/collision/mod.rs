//! Convex shape collision: separating axis tests and grid rasterization

use crate::errors::{GridSightError, GridSightResult};
use bevy::math::{IVec2, Rect, Vec2};
use serde::{Deserialize, Serialize};

pub mod polygon;
pub mod projected_interval;
pub mod segment;

pub use polygon::*;
pub use projected_interval::*;
pub use segment::*;

/// Capabilities every shape variant provides.
///
/// Shapes are translated by an explicit position on every call and are never rotated.
pub trait ShapeGeometry {
    /// Bounds of the untranslated shape
    fn bounding_box(&self) -> Rect;

    /// Outline vertices of the untranslated shape
    fn vertices(&self) -> &[Vec2];

    /// Project the shape at `position` onto `axis`; the result always has `start <= end`
    fn project_onto_axis(&self, position: Vec2, axis: Vec2) -> ProjectedInterval;

    fn intersects_polygon(
        &self,
        other: &Polygon,
        my_position: Vec2,
        other_position: Vec2,
        strict: bool,
    ) -> bool;

    /// Test this shape at `my_position` against `other` at `other_position`.
    ///
    /// With `strict`, shapes that only touch do not intersect.
    fn intersects(
        &self,
        other: &Shape,
        my_position: Vec2,
        other_position: Vec2,
        strict: bool,
    ) -> bool {
        match other {
            Shape::Polygon(polygon) => {
                self.intersects_polygon(polygon, my_position, other_position, strict)
            }
        }
    }

    /// Grid cells whose unit square intersects this shape placed at `position`.
    ///
    /// Every candidate in the (padded) bounding box gets a full intersection test, so this
    /// gets slow for large shapes. Calling it again enumerates the same cells again.
    fn grid_cells_covered_at(&self, position: Vec2, strict: bool) -> impl Iterator<Item = IVec2> {
        let bounds = self.bounding_box();
        let first = (bounds.min + position).floor().as_ivec2() - IVec2::ONE;
        let last = (bounds.max + position).ceil().as_ivec2() + IVec2::ONE;

        (first.y..=last.y)
            .flat_map(move |y| (first.x..=last.x).map(move |x| IVec2::new(x, y)))
            .filter(move |cell| {
                self.intersects_polygon(&UNIT_SQUARE, position, cell.as_vec2(), strict)
            })
    }
}

/// Every supported collision shape
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Polygon(Polygon),
}

impl Shape {
    /// Shape covering exactly one grid cell when placed on integer coordinates
    pub fn unit_square() -> Self {
        Shape::Polygon(UNIT_SQUARE.clone())
    }

    pub fn variant_name(&self) -> &'static str {
        match self {
            Shape::Polygon(_) => "polygon",
        }
    }
}

impl From<Polygon> for Shape {
    fn from(polygon: Polygon) -> Self {
        Shape::Polygon(polygon)
    }
}

impl ShapeGeometry for Shape {
    fn bounding_box(&self) -> Rect {
        match self {
            Shape::Polygon(polygon) => polygon.bounding_box(),
        }
    }

    fn vertices(&self) -> &[Vec2] {
        match self {
            Shape::Polygon(polygon) => polygon.vertices(),
        }
    }

    fn project_onto_axis(&self, position: Vec2, axis: Vec2) -> ProjectedInterval {
        match self {
            Shape::Polygon(polygon) => polygon.project_onto_axis(position, axis),
        }
    }

    fn intersects_polygon(
        &self,
        other: &Polygon,
        my_position: Vec2,
        other_position: Vec2,
        strict: bool,
    ) -> bool {
        match self {
            Shape::Polygon(polygon) => {
                polygon.intersects_polygon(other, my_position, other_position, strict)
            }
        }
    }
}

/// Serializable description of a shape, as found in map files
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeDefinition {
    /// `polygon` or `rectangle`
    pub kind: String,
    #[serde(default)]
    pub vertices: Vec<[f32; 2]>,
    #[serde(default)]
    pub size: Option<[f32; 2]>,
}

impl ShapeDefinition {
    pub fn polygon(vertices: &[Vec2]) -> Self {
        Self {
            kind: "polygon".to_string(),
            vertices: vertices.iter().map(|v| [v.x, v.y]).collect(),
            size: None,
        }
    }

    pub fn rectangle(size: Vec2) -> Self {
        Self {
            kind: "rectangle".to_string(),
            vertices: Vec::new(),
            size: Some([size.x, size.y]),
        }
    }
}

impl TryFrom<&ShapeDefinition> for Shape {
    type Error = GridSightError;

    fn try_from(definition: &ShapeDefinition) -> GridSightResult<Self> {
        match definition.kind.as_str() {
            "polygon" => {
                if definition.vertices.len() < 3 {
                    return Err(GridSightError::InvalidShape {
                        reason: format!(
                            "polygon needs at least 3 vertices, got {}",
                            definition.vertices.len()
                        ),
                    });
                }
                if definition
                    .vertices
                    .iter()
                    .flatten()
                    .any(|value| !value.is_finite())
                {
                    return Err(GridSightError::InvalidShape {
                        reason: "polygon vertices must be finite".to_string(),
                    });
                }
                let vertices = definition.vertices.iter().map(|&v| Vec2::from(v)).collect();
                Ok(Shape::Polygon(Polygon::new(vertices)))
            }
            "rectangle" => {
                let [width, height] = definition.size.ok_or_else(|| GridSightError::InvalidShape {
                    reason: "rectangle needs a size".to_string(),
                })?;
                if !(width > 0.0 && height > 0.0 && width.is_finite() && height.is_finite()) {
                    return Err(GridSightError::InvalidShape {
                        reason: format!("rectangle size must be positive, got {width}x{height}"),
                    });
                }
                Ok(Shape::Polygon(Polygon::rectangle(Vec2::new(width, height))))
            }
            other => Err(GridSightError::UnsupportedShape {
                variant: other.to_string(),
            }),
        }
    }
}

pub mod collision;
pub mod components;
pub mod config;
pub mod errors;
pub mod map;
pub mod pathfinding;

// Selective re-exports for external consumers

// Errors - every fallible operation returns these
pub use errors::{GridSightError, GridSightResult};

// Collision - shapes and their queries
pub use collision::{Polygon, Shape, ShapeDefinition, ShapeGeometry};

// Pathfinding - the two cost callbacks and the grid surfaces they need
pub use crate::pathfinding::{
    GridAdapter, SearchGrid, TraversalEvaluator, actual_cost, find_path, heuristic_cost,
};

// Map - the concrete grid host
pub use components::Agent;
pub use map::{MapDefinition, Tile, TileGrid};

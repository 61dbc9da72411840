//! Query surfaces a grid exposes to the cost evaluator and to a search algorithm

use crate::collision::ShapeGeometry;
use crate::components::Agent;
use crate::map::Tile;
use crate::pathfinding::overlay::{OverlayKind, OverlaySink};
use bevy::prelude::*;

/// Read-only view of a tile grid
pub trait GridAdapter {
    /// Tile at integer coordinates, or `None` outside the grid
    fn tile_at(&self, x: i32, y: i32) -> Option<&Tile>;

    fn in_bounds(&self, x: i32, y: i32) -> bool;

    fn in_bounds_cell(&self, cell: IVec2) -> bool {
        self.in_bounds(cell.x, cell.y)
    }

    /// A cell is passable when it lies in the grid and its tile's movement modifier is nonzero
    fn is_passable(&self, cell: IVec2) -> bool {
        self.in_bounds_cell(cell)
            && self
                .tile_at(cell.x, cell.y)
                .is_some_and(|tile| tile.is_passable())
    }

    /// Every cell covered by the agent's shape anchored at `cell` is passable.
    ///
    /// With `strict`, cells the shape only touches are not covered.
    fn footprint_clear(&self, agent: &Agent, cell: IVec2, strict: bool) -> bool {
        agent
            .shape
            .grid_cells_covered_at(cell.as_vec2(), strict)
            .all(|covered| self.is_passable(covered))
    }
}

/// What a search algorithm needs from the grid on top of [`GridAdapter`]
pub trait SearchGrid: GridAdapter {
    /// Positions reachable in one move from `position`, using strict footprints.
    ///
    /// Moves are 8-connected. A diagonal move is offered only when both orthogonal
    /// cells it passes are open for the agent, so corners are never cut.
    fn neighbors_of(&self, agent: &Agent, position: IVec2) -> Vec<IVec2> {
        self.neighbors_with_footprint(agent, position, true)
    }

    /// [`SearchGrid::neighbors_of`] with the footprint strictness the cost evaluator uses
    fn neighbors_with_footprint(
        &self,
        agent: &Agent,
        position: IVec2,
        strict: bool,
    ) -> Vec<IVec2> {
        let open = |offset: IVec2| self.footprint_clear(agent, position + offset, strict);
        let mut neighbors = Vec::with_capacity(8);

        for offset in [IVec2::NEG_X, IVec2::NEG_Y, IVec2::Y, IVec2::X] {
            if open(offset) {
                neighbors.push(position + offset);
            }
        }

        for diagonal in [
            IVec2::new(-1, -1),
            IVec2::new(-1, 1),
            IVec2::new(1, -1),
            IVec2::new(1, 1),
        ] {
            if open(IVec2::new(diagonal.x, 0)) && open(IVec2::new(0, diagonal.y)) && open(diagonal)
            {
                neighbors.push(position + diagonal);
            }
        }

        neighbors
    }

    /// Called when the search expands `position`
    fn on_expand(&self, position: IVec2, overlay: &mut dyn OverlaySink) {
        overlay.mark(position.as_vec2(), OverlayKind::Expanded);
    }
}

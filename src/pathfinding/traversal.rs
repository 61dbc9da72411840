//! Straight-line traversal costs for agents with extended shapes
//!
//! The evaluator slides the agent's shape from one cell to another and checks its grid
//! footprint wherever the footprint can change, so a move is only accepted when every cell
//! the shape passes over is inside the grid and passable.

use crate::collision::ShapeGeometry;
use crate::components::Agent;
use crate::pathfinding::TraversalConfig;
use crate::pathfinding::grid_adapter::GridAdapter;
use crate::pathfinding::overlay::{NoOverlay, OverlayKind, OverlaySink};
use bevy::prelude::*;

/// Computes heuristic and actual move costs between grid cells
#[derive(Debug, Clone, Default)]
pub struct TraversalEvaluator {
    pub config: TraversalConfig,
}

impl TraversalEvaluator {
    pub fn new(config: TraversalConfig) -> Self {
        Self { config }
    }

    /// Straight-line distance between `start` and `end`; never exceeds the actual cost
    pub fn heuristic_cost<G: GridAdapter + ?Sized>(
        &self,
        _grid: &G,
        _agent: &Agent,
        start: IVec2,
        end: IVec2,
    ) -> f32 {
        (end - start).as_vec2().length()
    }

    /// Cost of moving the agent in a straight line from `start` to `end`, or `None` when the
    /// shape would leave the grid or touch an impassable tile on the way
    pub fn actual_cost<G: GridAdapter + ?Sized>(
        &self,
        grid: &G,
        agent: &Agent,
        start: IVec2,
        end: IVec2,
    ) -> Option<f32> {
        self.actual_cost_traced(grid, agent, start, end, &mut NoOverlay)
    }

    /// [`TraversalEvaluator::actual_cost`], reporting every sampled position to `overlay`
    pub fn actual_cost_traced<G: GridAdapter + ?Sized>(
        &self,
        grid: &G,
        agent: &Agent,
        start: IVec2,
        end: IVec2,
        overlay: &mut dyn OverlaySink,
    ) -> Option<f32> {
        let origin = start.as_vec2();
        let target = end.as_vec2();
        let offset = target - origin;
        let distance = offset.length();
        let tolerance = self.config.arrival_tolerance.get();

        self.check_sample(grid, agent, origin, overlay)?;

        if distance > tolerance {
            let direction = offset / distance;
            let mut travelled = 0.0;

            while distance - travelled > tolerance {
                let position = origin + direction * travelled;
                let step = self
                    .next_step(agent, position, direction)
                    .min(distance - travelled);

                if self.config.sample_midpoints {
                    let midpoint = origin + direction * (travelled + step * 0.5);
                    self.check_sample(grid, agent, midpoint, overlay)?;
                }

                travelled += step;
                // Arrival is checked at the exact target below
                if distance - travelled > tolerance {
                    self.check_sample(grid, agent, origin + direction * travelled, overlay)?;
                }
            }
        }

        self.check_sample(grid, agent, target, overlay)?;
        Some(distance)
    }

    /// Distance along `direction` until the first shape vertex reaches a grid line
    fn next_step(&self, agent: &Agent, position: Vec2, direction: Vec2) -> f32 {
        let max_step = self.config.max_step.get();
        let min_step = self.config.arrival_tolerance.get();

        agent
            .shape
            .vertices()
            .iter()
            .flat_map(|vertex| {
                let corner = *vertex + position;
                [
                    distance_to_grid_line(corner.x, direction.x),
                    distance_to_grid_line(corner.y, direction.y),
                ]
            })
            .flatten()
            .fold(max_step, f32::min)
            .max(min_step)
    }

    fn check_sample<G: GridAdapter + ?Sized>(
        &self,
        grid: &G,
        agent: &Agent,
        position: Vec2,
        overlay: &mut dyn OverlaySink,
    ) -> Option<()> {
        for cell in agent
            .shape
            .grid_cells_covered_at(position, self.config.strict_footprint)
        {
            if !grid.is_passable(cell) {
                trace!(
                    "Traversal blocked at ({:.3}, {:.3}) by cell ({}, {})",
                    position.x, position.y, cell.x, cell.y
                );
                return None;
            }
        }

        overlay.mark(position, OverlayKind::Sample);
        Some(())
    }
}

/// Distance travelled along a unit direction before `coordinate` reaches the next integer.
///
/// Returns `None` when the direction has no component on this axis.
fn distance_to_grid_line(coordinate: f32, direction: f32) -> Option<f32> {
    if direction == 0.0 {
        return None;
    }

    let along_axis = if direction > 0.0 {
        coordinate.floor() + 1.0 - coordinate
    } else {
        coordinate - (coordinate.ceil() - 1.0)
    };

    Some(along_axis / direction.abs())
}

/// Euclidean distance between two cells using the default evaluator
pub fn heuristic_cost<G: GridAdapter + ?Sized>(
    grid: &G,
    agent: &Agent,
    start: IVec2,
    end: IVec2,
) -> f32 {
    TraversalEvaluator::default().heuristic_cost(grid, agent, start, end)
}

/// Straight-line move cost using the default evaluator; `None` when the move is blocked
pub fn actual_cost<G: GridAdapter + ?Sized>(
    grid: &G,
    agent: &Agent,
    start: IVec2,
    end: IVec2,
) -> Option<f32> {
    TraversalEvaluator::default().actual_cost(grid, agent, start, end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::{Polygon, Shape};
    use crate::map::{Tile, TileGrid};
    use crate::pathfinding::overlay::OverlayLog;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;

    fn open_grid(width: u32, height: u32) -> TileGrid {
        TileGrid::filled(width, height, Tile::passable())
    }

    fn grid_with_walls(width: u32, height: u32, walls: &[(i32, i32)]) -> TileGrid {
        let mut grid = open_grid(width, height);
        for &(x, y) in walls {
            assert!(grid.set_tile(IVec2::new(x, y), Tile::impassable()));
        }
        grid
    }

    fn cell(x: i32, y: i32) -> IVec2 {
        IVec2::new(x, y)
    }

    #[test]
    fn test_distance_to_grid_line() {
        assert_eq!(distance_to_grid_line(0.25, 1.0), Some(0.75));
        assert_eq!(distance_to_grid_line(0.25, -1.0), Some(0.25));
        assert_eq!(distance_to_grid_line(2.0, 1.0), Some(1.0));
        assert_eq!(distance_to_grid_line(2.0, -1.0), Some(1.0));
        assert_eq!(distance_to_grid_line(-0.5, 1.0), Some(0.5));
        assert_eq!(distance_to_grid_line(0.5, 0.5), Some(1.0));
        assert_eq!(distance_to_grid_line(0.3, 0.0), None);
    }

    #[test]
    fn test_zero_step_config_is_clamped_and_completes() {
        let config: TraversalConfig =
            toml::from_str("max_step = 0.0\narrival_tolerance = 0.0").unwrap();
        assert_eq!(config.max_step.get(), 0.01);
        assert_eq!(config.arrival_tolerance.get(), 1e-6);

        let evaluator = TraversalEvaluator::new(config);
        let grid = open_grid(3, 1);
        assert_eq!(
            evaluator.actual_cost(&grid, &Agent::default(), cell(0, 0), cell(2, 0)),
            Some(2.0)
        );
    }

    #[test]
    fn test_heuristic_is_euclidean() {
        let grid = open_grid(5, 5);
        let agent = Agent::default();

        assert_eq!(heuristic_cost(&grid, &agent, cell(0, 0), cell(3, 4)), 5.0);
        assert_eq!(heuristic_cost(&grid, &agent, cell(2, 2), cell(2, 2)), 0.0);
    }

    #[test]
    fn test_blocked_center_rejects_diagonal() {
        let grid = grid_with_walls(3, 3, &[(1, 1)]);
        let agent = Agent::default();

        assert_eq!(actual_cost(&grid, &agent, cell(0, 0), cell(2, 2)), None);
    }

    #[test]
    fn test_clear_row_costs_distance() {
        let grid = grid_with_walls(3, 3, &[(1, 1)]);
        let agent = Agent::default();

        assert_eq!(actual_cost(&grid, &agent, cell(0, 0), cell(2, 0)), Some(2.0));
    }

    #[test]
    fn test_zero_length_move() {
        let grid = open_grid(2, 2);
        let agent = Agent::default();
        assert_eq!(actual_cost(&grid, &agent, cell(1, 1), cell(1, 1)), Some(0.0));

        let walled = grid_with_walls(2, 2, &[(1, 1)]);
        assert_eq!(actual_cost(&walled, &agent, cell(1, 1), cell(1, 1)), None);
    }

    #[test]
    fn test_leaving_the_grid_is_unreachable() {
        let grid = open_grid(3, 3);
        let agent = Agent::default();

        assert_eq!(actual_cost(&grid, &agent, cell(0, 0), cell(3, 0)), None);
        assert_eq!(actual_cost(&grid, &agent, cell(-1, 0), cell(1, 0)), None);
    }

    #[test]
    fn test_diagonal_does_not_cut_blocked_corner() {
        // The neighbor rule forbids this diagonal, and so does the swept footprint
        let grid = grid_with_walls(2, 2, &[(1, 0)]);
        let agent = Agent::default();

        assert_eq!(actual_cost(&grid, &agent, cell(0, 0), cell(1, 1)), None);
        assert!(actual_cost(&grid, &agent, cell(0, 1), cell(0, 0)).is_some());
    }

    #[test]
    fn test_shallow_line_catches_intermediate_wall() {
        // A unit square moving from (0, 0) to (4, 1) crosses into row 1 before column 3
        let grid = grid_with_walls(5, 2, &[(2, 1)]);
        let agent = Agent::default();

        assert_eq!(actual_cost(&grid, &agent, cell(0, 0), cell(4, 1)), None);

        let clear = open_grid(5, 2);
        let cost = actual_cost(&clear, &agent, cell(0, 0), cell(4, 1)).unwrap();
        assert!((cost - 17.0_f32.sqrt()).abs() < 1e-5);
    }

    #[test]
    fn test_samples_land_on_grid_lines() {
        let grid = open_grid(3, 1);
        let agent = Agent::default();
        let mut log = OverlayLog::new();

        let cost = TraversalEvaluator::default().actual_cost_traced(
            &grid,
            &agent,
            cell(0, 0),
            cell(2, 0),
            &mut log,
        );
        assert_eq!(cost, Some(2.0));

        let xs: Vec<f32> = log.positions(OverlayKind::Sample).map(|p| p.x).collect();
        assert_eq!(xs, vec![0.0, 0.5, 1.0, 1.5, 2.0]);
    }

    #[test]
    fn test_fractional_vertices_shorten_steps() {
        let grid = open_grid(4, 1);
        let agent = Agent::new(
            Vec2::ZERO,
            Shape::from(Polygon::rectangle(Vec2::new(0.5, 1.0))),
        );
        let evaluator = TraversalEvaluator::new(TraversalConfig {
            sample_midpoints: false,
            ..Default::default()
        });
        let mut log = OverlayLog::new();

        evaluator
            .actual_cost_traced(&grid, &agent, cell(0, 0), cell(2, 0), &mut log)
            .unwrap();

        // The right edge reaches a grid line halfway between the left edge's crossings
        let xs: Vec<f32> = log.positions(OverlayKind::Sample).map(|p| p.x).collect();
        assert_eq!(xs, vec![0.0, 0.5, 1.0, 1.5, 2.0]);
    }

    #[test]
    fn test_large_agent_needs_room() {
        let grid = open_grid(4, 4);
        let agent = Agent::new(
            Vec2::ZERO,
            Shape::from(Polygon::rectangle(Vec2::new(2.0, 2.0))),
        );

        let cost = actual_cost(&grid, &agent, cell(0, 0), cell(2, 2)).unwrap();
        assert!((cost - 8.0_f32.sqrt()).abs() < 1e-5);
        assert_eq!(actual_cost(&grid, &agent, cell(0, 0), cell(3, 3)), None);

        let walled = grid_with_walls(4, 4, &[(3, 0)]);
        assert_eq!(actual_cost(&walled, &agent, cell(0, 0), cell(2, 0)), None);
        assert!(actual_cost(&walled, &agent, cell(0, 2), cell(2, 2)).is_some());
    }

    #[test]
    fn test_vertical_move_has_no_horizontal_steps() {
        let grid = open_grid(1, 4);
        let agent = Agent::default();

        assert_eq!(actual_cost(&grid, &agent, cell(0, 3), cell(0, 0)), Some(3.0));
    }

    #[test]
    fn test_heuristic_is_admissible() {
        let grid = open_grid(8, 8);
        let agent = Agent::default();
        let mut rng = Pcg32::seed_from_u64(42);
        let mut finite = 0;

        for _ in 0..200 {
            let start = cell(rng.gen_range(0..8), rng.gen_range(0..8));
            let end = cell(rng.gen_range(0..8), rng.gen_range(0..8));

            if let Some(actual) = actual_cost(&grid, &agent, start, end) {
                finite += 1;
                assert!(heuristic_cost(&grid, &agent, start, end) <= actual);
            }
        }

        assert_eq!(finite, 200);
    }
}

//! Reference grid search driving the traversal costs through [`SearchGrid`]
//!
//! This is an ordinary 8-connected A*, used by the command line tool and the tests to
//! exercise the cost callbacks exactly the way an external pathfinder would.

use crate::components::Agent;
use crate::pathfinding::grid_adapter::SearchGrid;
use crate::pathfinding::overlay::OverlaySink;
use crate::pathfinding::traversal::TraversalEvaluator;
use crate::pathfinding::SearchConfig;
use bevy::prelude::*;
use pathfinding::prelude::astar;

/// A sequence of cells from start to goal and the total traversal cost
#[derive(Debug, Clone, PartialEq)]
pub struct GridPath {
    pub cells: Vec<IVec2>,
    pub cost: f32,
}

/// Find a path for `agent` from `start` to `goal` with A*.
///
/// Successors come from [`SearchGrid::neighbors_with_footprint`] with the evaluator's footprint
/// strictness and are kept only when the evaluator's actual cost is finite; the evaluator's
/// heuristic guides the search. Costs are scaled by the search's cost resolution into `u64`.
pub fn find_path<G: SearchGrid + ?Sized>(
    grid: &G,
    agent: &Agent,
    start: IVec2,
    goal: IVec2,
    evaluator: &TraversalEvaluator,
    config: &SearchConfig,
    overlay: &mut dyn OverlaySink,
) -> Option<GridPath> {
    let strict = evaluator.config.strict_footprint;
    let start_clear = grid.footprint_clear(agent, start, strict);
    let goal_clear = grid.footprint_clear(agent, goal, strict);
    if !start_clear || !goal_clear {
        warn!(
            "Pathfinding failed: start_clear={}, goal_clear={}",
            start_clear, goal_clear
        );
        return None;
    }

    let resolution = f64::from(config.cost_resolution.get());
    debug!(
        "Pathfinding: ({}, {}) -> ({}, {})",
        start.x, start.y, goal.x, goal.y
    );

    let (cells, _) = astar(
        &start,
        |&cell| {
            grid.on_expand(cell, &mut *overlay);
            grid.neighbors_with_footprint(agent, cell, strict)
                .into_iter()
                .filter_map(|next| {
                    evaluator
                        .actual_cost(grid, agent, cell, next)
                        .map(|cost| (next, (f64::from(cost) * resolution).ceil() as u64))
                })
                .collect::<Vec<_>>()
        },
        |&cell| {
            let estimate = evaluator.heuristic_cost(grid, agent, cell, goal);
            (f64::from(estimate) * resolution).floor() as u64
        },
        |&cell| cell == goal,
    )?;

    let cost = cells
        .windows(2)
        .map(|pair| (pair[1] - pair[0]).as_vec2().length())
        .sum();

    debug!(
        "Pathfinding success: {} cells, cost {:.3}",
        cells.len(),
        cost
    );

    Some(GridPath { cells, cost })
}

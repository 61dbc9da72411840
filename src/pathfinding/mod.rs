//! Grid traversal costs and the surfaces a pathfinder drives them through

use crate::config::range_types::{ArrivalTolerance, CostResolution, StepLength};
use serde::{Deserialize, Serialize};

pub mod grid_adapter;
pub mod overlay;
pub mod search;
pub mod traversal;

pub use grid_adapter::*;
pub use overlay::*;
pub use search::*;
pub use traversal::*;

/// Configuration for straight-line traversal sampling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraversalConfig {
    /// Remaining distance at which a traversal counts as arrived
    pub arrival_tolerance: ArrivalTolerance,
    /// Longest advance between two samples, in tiles
    pub max_step: StepLength,
    /// Cells the agent only touches do not count as covered
    pub strict_footprint: bool,
    /// Also sample halfway between consecutive grid-line crossings
    pub sample_midpoints: bool,
}

impl Default for TraversalConfig {
    fn default() -> Self {
        Self {
            arrival_tolerance: ArrivalTolerance::default(),
            max_step: StepLength::default(),
            strict_footprint: true,
            sample_midpoints: true,
        }
    }
}

/// Configuration for the reference grid search
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Integer cost units per tile of distance
    pub cost_resolution: CostResolution,
}

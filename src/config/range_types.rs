use derive_more::Display;
use serde::{Deserialize, Serialize};

/// A tile movement modifier constrained to [0.0, 1000.0]; zero marks an impassable tile
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Display, Serialize, Deserialize)]
#[serde(from = "f32")]
pub struct MovementModifier(f32);

impl MovementModifier {
    const MIN: f32 = 0.0;
    const MAX: f32 = 1000.0;

    pub const IMPASSABLE: Self = Self(0.0);
    pub const NORMAL: Self = Self(1.0);

    pub fn new(value: f32) -> Self {
        if value.is_nan() {
            return Self::IMPASSABLE;
        }
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> f32 {
        self.0
    }

    pub fn is_passable(self) -> bool {
        self.0 != 0.0
    }
}

impl From<f32> for MovementModifier {
    fn from(value: f32) -> Self {
        Self::new(value)
    }
}

impl Default for MovementModifier {
    fn default() -> Self {
        Self::NORMAL
    }
}

/// Remaining distance below which a traversal counts as arrived, constrained to [1e-6, 0.5]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Display, Serialize, Deserialize)]
#[serde(from = "f32")]
pub struct ArrivalTolerance(f32);

impl ArrivalTolerance {
    const MIN: f32 = 1e-6;
    const MAX: f32 = 0.5;

    pub fn new(value: f32) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> f32 {
        self.0
    }
}

impl From<f32> for ArrivalTolerance {
    fn from(value: f32) -> Self {
        Self::new(value)
    }
}

impl Default for ArrivalTolerance {
    fn default() -> Self {
        Self::new(1e-4)
    }
}

/// Longest single advance of a traversal sample in tiles, constrained to [0.01, 1.0]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Display, Serialize, Deserialize)]
#[serde(from = "f32")]
pub struct StepLength(f32);

impl StepLength {
    const MIN: f32 = 0.01;
    const MAX: f32 = 1.0;

    pub fn new(value: f32) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> f32 {
        self.0
    }
}

impl From<f32> for StepLength {
    fn from(value: f32) -> Self {
        Self::new(value)
    }
}

impl Default for StepLength {
    fn default() -> Self {
        Self::new(1.0)
    }
}

/// Integer cost units per tile used by the grid search, constrained to [1.0, 1_000_000.0]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Display, Serialize, Deserialize)]
#[serde(from = "f32")]
pub struct CostResolution(f32);

impl CostResolution {
    const MIN: f32 = 1.0;
    const MAX: f32 = 1_000_000.0;

    pub fn new(value: f32) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> f32 {
        self.0
    }
}

impl From<f32> for CostResolution {
    fn from(value: f32) -> Self {
        Self::new(value)
    }
}

impl Default for CostResolution {
    fn default() -> Self {
        Self::new(1000.0)
    }
}

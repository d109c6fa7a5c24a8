use crate::terrain::{Band, Cell};
use serde::{Deserialize, Serialize};
use std::{error::Error, fmt};

/// Full configuration for one planning run. Terrain inputs, colony tuning,
/// and the reporting scale all live here so a run is reproducible from a
/// single serialized value.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    pub grid_size: usize,
    pub start: Cell,
    pub goal: Cell,
    pub water_bands: Vec<Band>,
    pub road_bands: Vec<Band>,
    pub blocked_bands: Vec<Band>,
    pub hotspots: Vec<Cell>,
    /// Total colony size; must equal the sum of `class_split`.
    pub population: usize,
    /// Contiguous per-class counts: [scouts, rangers, heavies].
    pub class_split: [usize; 3],
    pub alpha: f64,
    pub beta: f64,
    pub evaporation_rate: f64,
    /// Deposit strength Q; each successful path deposits Q / path_len per cell.
    pub deposit_strength: f64,
    /// Initial pheromone tau0.
    pub initial_pheromone: f64,
    pub elite_multiplier: f64,
    pub max_iterations: usize,
    pub seed: u64,
    /// Reporting scale for converting grid paths to physical distance.
    pub meters_per_cell: f64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            grid_size: 30,
            start: Cell::new(0, 0),
            goal: Cell::new(29, 29),
            water_bands: Vec::new(),
            road_bands: Vec::new(),
            blocked_bands: Vec::new(),
            hotspots: Vec::new(),
            population: 30,
            class_split: [10, 10, 10],
            alpha: 1.0,
            beta: 2.0,
            evaporation_rate: 0.1,
            deposit_strength: 1.0,
            initial_pheromone: 0.1,
            elite_multiplier: 3.0,
            max_iterations: 100,
            seed: 42,
            meters_per_cell: 10.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum PlannerConfigError {
    GridSizeZero,
    GridSizeTooLarge { max: usize, actual: usize },
    CellOutOfBounds { role: &'static str, cell: Cell, grid_size: usize },
    StartBlocked(Cell),
    GoalBlocked(Cell),
    ClassSplitMismatch { population: usize, split_total: usize },
    EvaporationRateOutOfRange(f64),
    NonPositive { name: &'static str, value: f64 },
}

impl fmt::Display for PlannerConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlannerConfigError::GridSizeZero => write!(f, "grid_size must be positive"),
            PlannerConfigError::GridSizeTooLarge { max, actual } => {
                write!(f, "grid_size ({actual}) exceeds supported maximum ({max})")
            }
            PlannerConfigError::CellOutOfBounds {
                role,
                cell,
                grid_size,
            } => write!(
                f,
                "{role} cell ({}, {}) lies outside the {grid_size}x{grid_size} grid",
                cell.row, cell.col
            ),
            PlannerConfigError::StartBlocked(cell) => {
                write!(f, "start cell ({}, {}) is blocked terrain", cell.row, cell.col)
            }
            PlannerConfigError::GoalBlocked(cell) => {
                write!(f, "goal cell ({}, {}) is blocked terrain", cell.row, cell.col)
            }
            PlannerConfigError::ClassSplitMismatch {
                population,
                split_total,
            } => write!(
                f,
                "class_split sums to {split_total} but population is {population}"
            ),
            PlannerConfigError::EvaporationRateOutOfRange(rate) => {
                write!(f, "evaporation_rate ({rate}) must lie in (0, 1)")
            }
            PlannerConfigError::NonPositive { name, value } => {
                write!(f, "{name} ({value}) must be positive")
            }
        }
    }
}

impl Error for PlannerConfigError {}

impl PlannerConfig {
    pub const MAX_GRID_SIZE: usize = 1024;

    /// Checks everything that does not require the constructed terrain;
    /// blocked start/goal cells are caught at planner construction.
    pub fn validate(&self) -> Result<(), PlannerConfigError> {
        if self.grid_size == 0 {
            return Err(PlannerConfigError::GridSizeZero);
        }
        if self.grid_size > Self::MAX_GRID_SIZE {
            return Err(PlannerConfigError::GridSizeTooLarge {
                max: Self::MAX_GRID_SIZE,
                actual: self.grid_size,
            });
        }
        for (role, cell) in [("start", self.start), ("goal", self.goal)] {
            if cell.row >= self.grid_size || cell.col >= self.grid_size {
                return Err(PlannerConfigError::CellOutOfBounds {
                    role,
                    cell,
                    grid_size: self.grid_size,
                });
            }
        }
        for &hotspot in &self.hotspots {
            if hotspot.row >= self.grid_size || hotspot.col >= self.grid_size {
                return Err(PlannerConfigError::CellOutOfBounds {
                    role: "hotspot",
                    cell: hotspot,
                    grid_size: self.grid_size,
                });
            }
        }
        let split_total: usize = self.class_split.iter().sum();
        if split_total != self.population {
            return Err(PlannerConfigError::ClassSplitMismatch {
                population: self.population,
                split_total,
            });
        }
        if !(self.evaporation_rate > 0.0 && self.evaporation_rate < 1.0) {
            return Err(PlannerConfigError::EvaporationRateOutOfRange(
                self.evaporation_rate,
            ));
        }
        for (name, value) in [
            ("deposit_strength", self.deposit_strength),
            ("initial_pheromone", self.initial_pheromone),
            ("elite_multiplier", self.elite_multiplier),
            ("meters_per_cell", self.meters_per_cell),
        ] {
            if !(value > 0.0) {
                return Err(PlannerConfigError::NonPositive { name, value });
            }
        }
        Ok(())
    }
}

use crate::terrain::Cell;
use serde::{Deserialize, Serialize};

/// Geometric path length (unit and diagonal steps) scaled to meters.
pub fn path_length_meters(path: &[Cell], meters_per_cell: f64) -> f64 {
    path.windows(2)
        .map(|pair| pair[0].distance_to(pair[1]))
        .sum::<f64>()
        * meters_per_cell
}

/// One colony generation's outcome counts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IterationRecord {
    pub iteration: usize,
    pub successes: usize,
    pub dead_ends: usize,
    pub min_path_len: Option<usize>,
    pub improved_best: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BestPathSummary {
    pub cell_count: usize,
    pub length_meters: f64,
    pub cells: Vec<Cell>,
}

fn default_schema_version() -> u32 {
    1
}

/// Full run summary handed to external reporting/visualization. A `None`
/// best means the run exhausted its budget with zero successes.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlanSummary {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    pub grid_size: usize,
    pub iterations_run: usize,
    pub total_successes: usize,
    pub best: Option<BestPathSummary>,
    #[serde(default)]
    pub iterations: Vec<IterationRecord>,
}

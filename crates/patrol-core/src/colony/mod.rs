pub mod metrics;
#[cfg(test)]
mod tests;

mod iteration;

pub use metrics::*;

use crate::config::{PlannerConfig, PlannerConfigError};
use crate::pheromone::PheromoneField;
use crate::policy::AgentClassPolicy;
use crate::terrain::{Cell, TerrainClass, TerrainGrid};

/// Best path found so far: ordered cells start..=goal plus the cell count
/// used for ranking.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BestPath {
    pub path: Vec<Cell>,
    pub len: usize,
}

/// Terminal result of a planning run. `NoPathFound` is an expected outcome
/// of a poorly parameterized search, not an error; the caller decides
/// whether to relax constraints and re-invoke.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlanOutcome {
    Found(BestPath),
    NoPathFound,
}

/// Top-level ACO driver. Owns the terrain, pheromone field, and class
/// policy; runs colony iterations in strict sequence, carrying pheromone
/// state forward, and tracks the global best path.
pub struct AcoPlanner {
    pub(crate) config: PlannerConfig,
    pub(crate) terrain: TerrainGrid,
    pub(crate) pheromone: PheromoneField,
    pub(crate) policy: AgentClassPolicy,
    pub(crate) best: Option<BestPath>,
    pub(crate) iteration_index: usize,
    pub(crate) total_successes: usize,
    pub(crate) records: Vec<IterationRecord>,
}

impl AcoPlanner {
    /// Validates the configuration, builds the terrain and pheromone fields,
    /// and fails fast before any iteration runs.
    pub fn try_new(config: PlannerConfig) -> Result<Self, PlannerConfigError> {
        config.validate()?;
        let terrain = TerrainGrid::new(
            config.grid_size,
            &config.water_bands,
            &config.road_bands,
            &config.blocked_bands,
            config.goal,
            &config.hotspots,
        );
        if terrain.classify(config.start) == TerrainClass::Blocked {
            return Err(PlannerConfigError::StartBlocked(config.start));
        }
        if terrain.classify(config.goal) == TerrainClass::Blocked {
            return Err(PlannerConfigError::GoalBlocked(config.goal));
        }
        let pheromone = PheromoneField::new(&terrain, config.initial_pheromone);
        let policy = AgentClassPolicy::new(config.alpha, config.beta, config.class_split);
        Ok(Self {
            config,
            terrain,
            pheromone,
            policy,
            best: None,
            iteration_index: 0,
            total_successes: 0,
            records: Vec::new(),
        })
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    pub fn terrain(&self) -> &TerrainGrid {
        &self.terrain
    }

    pub fn pheromone(&self) -> &PheromoneField {
        &self.pheromone
    }

    pub fn best(&self) -> Option<&BestPath> {
        self.best.as_ref()
    }

    pub fn iterations_run(&self) -> usize {
        self.iteration_index
    }

    /// Run the configured iteration budget and report the outcome.
    pub fn plan(&mut self) -> PlanOutcome {
        for _ in 0..self.config.max_iterations {
            self.iterate();
        }
        match &self.best {
            Some(best) => PlanOutcome::Found(best.clone()),
            None => PlanOutcome::NoPathFound,
        }
    }

    /// Serializable run summary for the reporting collaborator.
    pub fn summary(&self) -> PlanSummary {
        PlanSummary {
            schema_version: 1,
            grid_size: self.config.grid_size,
            iterations_run: self.iteration_index,
            total_successes: self.total_successes,
            best: self.best.as_ref().map(|best| BestPathSummary {
                cell_count: best.len,
                length_meters: path_length_meters(&best.path, self.config.meters_per_cell),
                cells: best.path.clone(),
            }),
            iterations: self.records.clone(),
        }
    }
}

use patrol_core::config::PlannerConfig;
use patrol_core::link::{AgentFix, LinkModel};
use patrol_core::terrain::TerrainGrid;
use patrol_core::AcoPlanner;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;

/// PyO3 module exposing patrol-core to Python plotting/reporting tools.
/// Configs and results cross the boundary as JSON strings.
#[pyfunction]
fn version() -> &'static str {
    "0.1.0"
}

#[pyfunction]
fn plan_json(config_json: &str) -> PyResult<String> {
    let config: PlannerConfig =
        serde_json::from_str(config_json).map_err(|e| PyValueError::new_err(e.to_string()))?;
    let mut planner =
        AcoPlanner::try_new(config).map_err(|e| PyValueError::new_err(e.to_string()))?;
    planner.plan();
    serde_json::to_string(&planner.summary()).map_err(|e| PyValueError::new_err(e.to_string()))
}

#[pyfunction]
fn estimate_links_json(
    config_json: &str,
    agents_json: &str,
    model_json: &str,
    seed: u64,
) -> PyResult<String> {
    let config: PlannerConfig =
        serde_json::from_str(config_json).map_err(|e| PyValueError::new_err(e.to_string()))?;
    config
        .validate()
        .map_err(|e| PyValueError::new_err(e.to_string()))?;
    let agents: Vec<AgentFix> =
        serde_json::from_str(agents_json).map_err(|e| PyValueError::new_err(e.to_string()))?;
    let model: LinkModel =
        serde_json::from_str(model_json).map_err(|e| PyValueError::new_err(e.to_string()))?;

    let terrain = TerrainGrid::new(
        config.grid_size,
        &config.water_bands,
        &config.road_bands,
        &config.blocked_bands,
        config.goal,
        &config.hotspots,
    );
    let mut rng = ChaCha12Rng::seed_from_u64(seed);
    let report = model.estimate(&agents, &terrain, config.meters_per_cell, &mut rng);
    serde_json::to_string(&report).map_err(|e| PyValueError::new_err(e.to_string()))
}

#[pymodule]
fn _core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(version, m)?)?;
    m.add_function(wrap_pyfunction!(plan_json, m)?)?;
    m.add_function(wrap_pyfunction!(estimate_links_json, m)?)?;
    Ok(())
}

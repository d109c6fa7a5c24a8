use patrol_core::config::PlannerConfig;
use patrol_core::link::{AgentFix, LinkModel};
use patrol_core::terrain::{Band, Cell};
use patrol_core::AcoPlanner;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;
use std::time::Instant;

fn benchmark_config(grid_size: usize, population: usize) -> PlannerConfig {
    let per_class = population / 3;
    PlannerConfig {
        grid_size,
        start: Cell::new(0, 0),
        goal: Cell::new(grid_size - 1, grid_size - 1),
        water_bands: vec![Band::new(grid_size / 4, grid_size / 3, 0, grid_size - 1)],
        road_bands: vec![Band::new(grid_size / 2, grid_size / 2, 0, grid_size - 1)],
        blocked_bands: vec![Band::new(
            2 * grid_size / 3,
            2 * grid_size / 3 + 1,
            grid_size / 4,
            3 * grid_size / 4,
        )],
        hotspots: vec![Cell::new(grid_size / 2, grid_size / 4)],
        population,
        class_split: [per_class, per_class, population - 2 * per_class],
        seed: 42,
        ..PlannerConfig::default()
    }
}

fn random_fleet(count: u32, span_m: f64, seed: u64) -> Vec<AgentFix> {
    let mut rng = ChaCha12Rng::seed_from_u64(seed);
    (0..count)
        .map(|id| AgentFix {
            id,
            position: [rng.random::<f64>() * span_m, rng.random::<f64>() * span_m],
        })
        .collect()
}

fn main() {
    let grid_size = 64;
    let population = 60;
    let iterations = 50;
    println!(
        "Benchmarking {}x{} grid, {} ants, {} iterations",
        grid_size, grid_size, population, iterations
    );

    let config = benchmark_config(grid_size, population);
    let mut planner = AcoPlanner::try_new(config).expect("benchmark config must be valid");

    let start = Instant::now();
    for _ in 0..iterations {
        planner.iterate();
    }
    let duration = start.elapsed();
    println!("Time for {} iterations: {:?}", iterations, duration);
    println!("Avg time per iteration: {:?}", duration / iterations as u32);
    match planner.best() {
        Some(best) => println!("Best path after benchmark: {} cells", best.len),
        None => println!("No path found during benchmark"),
    }

    let fleet = random_fleet(200, 1000.0, 7);
    let model = LinkModel::default();
    let mut rng = ChaCha12Rng::seed_from_u64(11);
    let start = Instant::now();
    let report = model.estimate(&fleet, planner.terrain(), 10.0, &mut rng);
    let duration = start.elapsed();
    println!(
        "Link estimate for {} agents ({} pairs in range): {:?}",
        fleet.len(),
        report.pair_count,
        duration
    );
}

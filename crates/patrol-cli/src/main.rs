use anyhow::{bail, Context, Result};
use clap::Parser;
use patrol_core::colony::{PlanOutcome, PlanSummary};
use patrol_core::config::PlannerConfig;
use patrol_core::terrain::{Band, Cell};
use patrol_core::AcoPlanner;
use serde::Serialize;

/// Everything needed to reproduce and plot one run.
#[derive(Serialize)]
struct RunEnvelope {
    config: PlannerConfig,
    summary: PlanSummary,
}

/// Plan a patrol route over a terrain grid and print the run summary as JSON.
#[derive(Parser, Debug)]
#[command(name = "patrol", version)]
struct Args {
    /// Grid side length in cells.
    #[arg(long, default_value_t = 30)]
    grid_size: usize,

    /// Start cell as "row,col".
    #[arg(long, default_value = "0,0")]
    start: String,

    /// Goal cell as "row,col".
    #[arg(long, default_value = "29,29")]
    goal: String,

    /// Water region as "row_min,row_max,col_min,col_max"; repeatable.
    #[arg(long = "water-band")]
    water_bands: Vec<String>,

    /// Road region as "row_min,row_max,col_min,col_max"; repeatable.
    #[arg(long = "road-band")]
    road_bands: Vec<String>,

    /// Blocked region as "row_min,row_max,col_min,col_max"; repeatable.
    #[arg(long = "blocked-band")]
    blocked_bands: Vec<String>,

    /// Surveillance hotspot as "row,col"; repeatable.
    #[arg(long = "hotspot")]
    hotspots: Vec<String>,

    /// Colony size; must equal the sum of --class-split.
    #[arg(long, default_value_t = 30)]
    population: usize,

    /// Per-class population counts as "scouts,rangers,heavies".
    #[arg(long, default_value = "10,10,10")]
    class_split: String,

    #[arg(long, default_value_t = 1.0)]
    alpha: f64,

    #[arg(long, default_value_t = 2.0)]
    beta: f64,

    #[arg(long, default_value_t = 0.1)]
    evaporation_rate: f64,

    /// Deposit strength Q.
    #[arg(long, default_value_t = 1.0)]
    deposit_strength: f64,

    /// Initial pheromone tau0.
    #[arg(long, default_value_t = 0.1)]
    initial_pheromone: f64,

    #[arg(long, default_value_t = 3.0)]
    elite_multiplier: f64,

    #[arg(long, default_value_t = 100)]
    iterations: usize,

    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Physical scale used when reporting path length.
    #[arg(long, default_value_t = 10.0)]
    meters_per_cell: f64,

    /// Pretty-print the JSON summary.
    #[arg(long)]
    pretty: bool,
}

fn parse_cell(text: &str) -> Result<Cell> {
    let parts: Vec<usize> = text
        .split(',')
        .map(|p| p.trim().parse::<usize>().context("cell components must be integers"))
        .collect::<Result<_>>()?;
    if parts.len() != 2 {
        bail!("expected \"row,col\", got {text:?}");
    }
    Ok(Cell::new(parts[0], parts[1]))
}

fn parse_band(text: &str) -> Result<Band> {
    let parts: Vec<usize> = text
        .split(',')
        .map(|p| p.trim().parse::<usize>().context("band components must be integers"))
        .collect::<Result<_>>()?;
    if parts.len() != 4 {
        bail!("expected \"row_min,row_max,col_min,col_max\", got {text:?}");
    }
    Ok(Band::new(parts[0], parts[1], parts[2], parts[3]))
}

fn parse_split(text: &str) -> Result<[usize; 3]> {
    let parts: Vec<usize> = text
        .split(',')
        .map(|p| p.trim().parse::<usize>().context("split components must be integers"))
        .collect::<Result<_>>()?;
    if parts.len() != 3 {
        bail!("expected \"scouts,rangers,heavies\", got {text:?}");
    }
    Ok([parts[0], parts[1], parts[2]])
}

fn config_from_args(args: &Args) -> Result<PlannerConfig> {
    Ok(PlannerConfig {
        grid_size: args.grid_size,
        start: parse_cell(&args.start)?,
        goal: parse_cell(&args.goal)?,
        water_bands: args.water_bands.iter().map(|b| parse_band(b)).collect::<Result<_>>()?,
        road_bands: args.road_bands.iter().map(|b| parse_band(b)).collect::<Result<_>>()?,
        blocked_bands: args
            .blocked_bands
            .iter()
            .map(|b| parse_band(b))
            .collect::<Result<_>>()?,
        hotspots: args.hotspots.iter().map(|c| parse_cell(c)).collect::<Result<_>>()?,
        population: args.population,
        class_split: parse_split(&args.class_split)?,
        alpha: args.alpha,
        beta: args.beta,
        evaporation_rate: args.evaporation_rate,
        deposit_strength: args.deposit_strength,
        initial_pheromone: args.initial_pheromone,
        elite_multiplier: args.elite_multiplier,
        max_iterations: args.iterations,
        seed: args.seed,
        meters_per_cell: args.meters_per_cell,
    })
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = config_from_args(&args)?;
    let mut planner =
        AcoPlanner::try_new(config.clone()).context("invalid planner configuration")?;

    if let PlanOutcome::NoPathFound = planner.plan() {
        eprintln!("warning: no path found within the iteration budget");
    }

    let envelope = RunEnvelope {
        config,
        summary: planner.summary(),
    };
    let json = if args.pretty {
        serde_json::to_string_pretty(&envelope)?
    } else {
        serde_json::to_string(&envelope)?
    };
    println!("{json}");
    Ok(())
}

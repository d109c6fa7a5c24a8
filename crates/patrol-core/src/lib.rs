//! Patrol-route planning for heterogeneous survey fleets: an ant-colony
//! path planner over discretized terrain, plus a distance/terrain
//! communication-link reliability model for the agents executing the route.

pub mod colony;
pub mod config;
pub mod link;
pub mod neighborhood;
pub mod pheromone;
pub mod policy;
pub mod terrain;
pub mod walk;

pub use colony::{AcoPlanner, BestPath, PlanOutcome, PlanSummary};
pub use config::{PlannerConfig, PlannerConfigError};

use crate::terrain::{Cell, TerrainGrid};
use rand::Rng;
use rstar::{RTree, RTreeObject, AABB};
use serde::{Deserialize, Serialize};

/// A surveyed agent position in meters, used for link-pair queries.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AgentFix {
    pub id: u32,
    pub position: [f64; 2],
}

impl RTreeObject for AgentFix {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.position)
    }
}

/// Distance- and terrain-based packet-loss model between mobile agents.
///
/// Loss grows with `(distance / max_range)^exponent`, scaled by the
/// attenuation of the terrain under the link midpoint, and is always capped
/// to [0, 1].
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkModel {
    pub max_range_m: f64,
    pub path_loss_exponent: f64,
    pub trials_per_pair: usize,
}

impl Default for LinkModel {
    fn default() -> Self {
        Self {
            max_range_m: 120.0,
            path_loss_exponent: 2.0,
            trials_per_pair: 200,
        }
    }
}

/// Reliability estimate for one in-range agent pair.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PairLink {
    pub a: u32,
    pub b: u32,
    pub distance_m: f64,
    pub loss_probability: f64,
    pub delivered_fraction: f64,
}

fn default_schema_version() -> u32 {
    1
}

/// Descriptive statistics over every in-range pair.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LinkReport {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    pub pair_count: usize,
    pub mean_loss: f64,
    pub min_loss: f64,
    pub max_loss: f64,
    pub pairs: Vec<PairLink>,
}

fn cell_at(position: [f64; 2], meters_per_cell: f64, grid_size: usize) -> Cell {
    let col = ((position[0] / meters_per_cell) as usize).min(grid_size - 1);
    let row = ((position[1] / meters_per_cell) as usize).min(grid_size - 1);
    Cell::new(row, col)
}

impl LinkModel {
    /// Packet-loss probability for a link of length `distance_m` over the
    /// given terrain attenuation, capped to [0, 1].
    pub fn loss_probability(&self, distance_m: f64, attenuation: f64) -> f64 {
        let raw = (distance_m / self.max_range_m).powf(self.path_loss_exponent) * attenuation;
        raw.clamp(0.0, 1.0)
    }

    /// Estimate link reliability for every agent pair within `max_range_m`.
    ///
    /// Pairs come from an R*-tree envelope query over the positions; each
    /// pair's delivery fraction is measured with Bernoulli trials drawn
    /// from the injected generator.
    pub fn estimate<R: Rng + ?Sized>(
        &self,
        agents: &[AgentFix],
        terrain: &TerrainGrid,
        meters_per_cell: f64,
        rng: &mut R,
    ) -> LinkReport {
        let tree = RTree::bulk_load(agents.to_vec());
        let trials = self.trials_per_pair.max(1);

        let mut in_range: Vec<(AgentFix, AgentFix, f64)> = Vec::new();
        for agent in agents {
            let envelope = AABB::from_corners(
                [
                    agent.position[0] - self.max_range_m,
                    agent.position[1] - self.max_range_m,
                ],
                [
                    agent.position[0] + self.max_range_m,
                    agent.position[1] + self.max_range_m,
                ],
            );
            for other in tree.locate_in_envelope(&envelope) {
                if other.id <= agent.id {
                    continue;
                }
                let dx = other.position[0] - agent.position[0];
                let dy = other.position[1] - agent.position[1];
                let distance = (dx * dx + dy * dy).sqrt();
                if distance <= self.max_range_m {
                    in_range.push((*agent, *other, distance));
                }
            }
        }
        // Stable pair order keeps the trial stream reproducible regardless
        // of tree layout.
        in_range.sort_by_key(|(a, b, _)| (a.id, b.id));

        let mut pairs = Vec::with_capacity(in_range.len());
        for (a, b, distance) in in_range {
            let midpoint = [
                (a.position[0] + b.position[0]) * 0.5,
                (a.position[1] + b.position[1]) * 0.5,
            ];
            let terrain_class =
                terrain.classify(cell_at(midpoint, meters_per_cell, terrain.size()));
            let loss = self.loss_probability(distance, terrain_class.link_attenuation());
            let delivered = (0..trials)
                .filter(|_| rng.random::<f64>() >= loss)
                .count();
            pairs.push(PairLink {
                a: a.id,
                b: b.id,
                distance_m: distance,
                loss_probability: loss,
                delivered_fraction: delivered as f64 / trials as f64,
            });
        }

        let pair_count = pairs.len();
        let mean_loss = if pair_count > 0 {
            pairs.iter().map(|p| p.loss_probability).sum::<f64>() / pair_count as f64
        } else {
            0.0
        };
        let min_loss = pairs
            .iter()
            .map(|p| p.loss_probability)
            .fold(f64::INFINITY, f64::min);
        let max_loss = pairs
            .iter()
            .map(|p| p.loss_probability)
            .fold(f64::NEG_INFINITY, f64::max);

        LinkReport {
            schema_version: 1,
            pair_count,
            mean_loss,
            min_loss: if pair_count > 0 { min_loss } else { 0.0 },
            max_loss: if pair_count > 0 { max_loss } else { 0.0 },
            pairs,
        }
    }
}

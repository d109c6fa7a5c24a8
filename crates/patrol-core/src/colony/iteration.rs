use super::{AcoPlanner, BestPath, IterationRecord};
use crate::walk::{AntWalk, WalkOutcome};
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;
use rayon::prelude::*;

/// Per-walk RNG stream derived from the master seed. Each (iteration, ant)
/// pair gets its own generator, so results are identical whether walks run
/// sequentially or across rayon workers.
fn walk_seed(master: u64, iteration: usize, ant: usize) -> u64 {
    master
        .wrapping_add((iteration as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15))
        .wrapping_add((ant as u64).wrapping_mul(0xC2B2_AE3D_27D4_EB4F))
}

impl AcoPlanner {
    /// Run one colony generation: all walks against an immutable pheromone
    /// snapshot, then deposits and one evaporation sweep. Elite reinforcement
    /// and the best-path update happen only when a strictly shorter path
    /// appeared this generation.
    pub fn iterate(&mut self) -> IterationRecord {
        let iteration = self.iteration_index;
        self.iteration_index += 1;

        let terrain = &self.terrain;
        let pheromone = &self.pheromone;
        let start = self.config.start;
        let goal = self.config.goal;
        let seed = self.config.seed;
        let policy = &self.policy;

        // Walks only read the fields; deposits are buffered in the outcome
        // list and applied after every walk has finished.
        let mut walks: Vec<WalkOutcome> = (0..self.config.population)
            .into_par_iter()
            .map(|ant| {
                let (alpha_eff, beta_eff) = policy.exponents(policy.class_of(ant));
                let walk = AntWalk::new(terrain, pheromone, start, goal, alpha_eff, beta_eff);
                let mut rng = ChaCha12Rng::seed_from_u64(walk_seed(seed, iteration, ant));
                walk.run(&mut rng)
            })
            .collect();

        let mut successes = 0usize;
        let mut dead_ends = 0usize;
        let mut shortest: Option<(usize, usize)> = None;
        for (idx, outcome) in walks.iter().enumerate() {
            match outcome {
                WalkOutcome::Succeeded(path) => {
                    successes += 1;
                    if shortest.map(|(_, len)| path.len() < len).unwrap_or(true) {
                        shortest = Some((idx, path.len()));
                    }
                }
                WalkOutcome::Stuck => dead_ends += 1,
            }
        }

        for outcome in &walks {
            if let WalkOutcome::Succeeded(path) = outcome {
                let amount = self.config.deposit_strength / path.len() as f64;
                self.pheromone.deposit_path(path, amount, &self.terrain);
            }
        }

        self.pheromone.evaporate(self.config.evaporation_rate);

        let improved = match (shortest, &self.best) {
            (Some((_, len)), Some(best)) => len < best.len,
            (Some(_), None) => true,
            (None, _) => false,
        };
        if improved {
            let (idx, len) = shortest.expect("improvement implies a successful walk");
            let WalkOutcome::Succeeded(path) = walks.swap_remove(idx) else {
                unreachable!("shortest index points at a successful walk");
            };
            let bonus =
                self.config.deposit_strength / len as f64 * self.config.elite_multiplier;
            self.pheromone.reinforce(&path, bonus);
            self.best = Some(BestPath { path, len });
        }

        self.total_successes += successes;
        let record = IterationRecord {
            iteration,
            successes,
            dead_ends,
            min_path_len: shortest.map(|(_, len)| len),
            improved_best: improved,
        };
        self.records.push(record.clone());
        record
    }
}

use crate::neighborhood::{neighbors, VisitedMask};
use crate::pheromone::PheromoneField;
use crate::terrain::{Cell, TerrainGrid};
use rand::Rng;

/// Terminal state of a single ant walk.
///
/// `Stuck` is expected, bounded behavior of the stochastic search: the walk
/// contributes no path and no deposit that round, and is not retried.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WalkOutcome {
    Succeeded(Vec<Cell>),
    Stuck,
}

/// One agent's stochastic walk from start to goal.
///
/// Reads the pheromone and heuristic fields as an immutable snapshot; the
/// caller applies deposits after the walk completes, so concurrent walks in
/// the same iteration never observe each other.
pub struct AntWalk<'a> {
    terrain: &'a TerrainGrid,
    pheromone: &'a PheromoneField,
    start: Cell,
    goal: Cell,
    alpha_eff: f64,
    beta_eff: f64,
}

impl<'a> AntWalk<'a> {
    pub fn new(
        terrain: &'a TerrainGrid,
        pheromone: &'a PheromoneField,
        start: Cell,
        goal: Cell,
        alpha_eff: f64,
        beta_eff: f64,
    ) -> Self {
        Self {
            terrain,
            pheromone,
            start,
            goal,
            alpha_eff,
            beta_eff,
        }
    }

    /// Run the walk to a terminal state. Terminates within `size * size`
    /// steps because the visited mask strictly grows each move.
    pub fn run<R: Rng + ?Sized>(&self, rng: &mut R) -> WalkOutcome {
        let mut visited = VisitedMask::new(self.terrain.size());
        visited.mark(self.start);
        let mut path = vec![self.start];
        let mut current = self.start;

        loop {
            if current == self.goal {
                return WalkOutcome::Succeeded(path);
            }
            let candidates = neighbors(self.terrain, current, &visited);
            if candidates.is_empty() {
                return WalkOutcome::Stuck;
            }
            let weights: Vec<f64> = candidates
                .iter()
                .map(|&cell| {
                    self.pheromone.value(cell).powf(self.alpha_eff)
                        * self.terrain.heuristic(cell).powf(self.beta_eff)
                })
                .collect();
            let next = candidates[weighted_pick(rng, &weights)];
            visited.mark(next);
            path.push(next);
            current = next;
        }
    }
}

/// Roulette-wheel selection over unnormalized weights. Falls back to a
/// uniform pick when the weight mass is zero or non-finite.
fn weighted_pick<R: Rng + ?Sized>(rng: &mut R, weights: &[f64]) -> usize {
    let total: f64 = weights.iter().sum();
    if !total.is_finite() || total <= 0.0 {
        return rng.random_range(0..weights.len());
    }
    let threshold = rng.random_range(0.0..total);
    let mut cumulative = 0.0;
    for (idx, weight) in weights.iter().enumerate() {
        cumulative += weight;
        if threshold < cumulative {
            return idx;
        }
    }
    weights.len() - 1
}

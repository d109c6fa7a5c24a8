use crate::terrain::{Cell, TerrainGrid};

/// Pre-seeded hotspot cells start at this multiple of the base pheromone.
const HOTSPOT_SEED_FACTOR: f64 = 5.0;

/// Mutable scalar field over the grid, reinforced by successful paths and
/// decayed once per iteration. Values never go negative: deposits are pure
/// additions and evaporation is a bounded multiplicative decay.
#[derive(Clone, Debug)]
pub struct PheromoneField {
    size: usize,
    values: Vec<f64>,
}

impl PheromoneField {
    /// Initialize every cell to `tau0`, hotspot cells to `5 * tau0`.
    pub fn new(terrain: &TerrainGrid, tau0: f64) -> Self {
        let size = terrain.size();
        let mut values = vec![tau0; size * size];
        for &hotspot in terrain.hotspots() {
            values[hotspot.row * size + hotspot.col] = tau0 * HOTSPOT_SEED_FACTOR;
        }
        Self { size, values }
    }

    fn index(&self, cell: Cell) -> usize {
        debug_assert!(
            cell.row < self.size && cell.col < self.size,
            "cell out of field bounds"
        );
        cell.row * self.size + cell.col
    }

    pub fn value(&self, cell: Cell) -> f64 {
        self.values[self.index(cell)]
    }

    pub fn deposit(&mut self, cell: Cell, amount: f64) {
        debug_assert!(amount >= 0.0, "deposit must be non-negative");
        let idx = self.index(cell);
        self.values[idx] += amount;
    }

    /// Credit one completed path. Each cell receives `amount`; registered
    /// hotspot cells receive an additional `2 * amount` on top.
    pub fn deposit_path(&mut self, path: &[Cell], amount: f64, terrain: &TerrainGrid) {
        for &cell in path {
            self.deposit(cell, amount);
            if terrain.is_hotspot(cell) {
                self.deposit(cell, amount * 2.0);
            }
        }
    }

    /// Multiply every cell by `1 - rate`. Called exactly once per iteration,
    /// after all of that iteration's deposits.
    pub fn evaporate(&mut self, rate: f64) {
        debug_assert!(rate > 0.0 && rate < 1.0, "rate must be in (0, 1)");
        let keep = 1.0 - rate;
        for value in &mut self.values {
            *value *= keep;
        }
    }

    /// Elite update: flat bonus along the best-known path.
    pub fn reinforce(&mut self, path: &[Cell], bonus_per_cell: f64) {
        for &cell in path {
            self.deposit(cell, bonus_per_cell);
        }
    }

    pub fn iter_values(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::Band;
    use rand::Rng;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;

    fn open_terrain(size: usize, hotspots: &[Cell]) -> TerrainGrid {
        TerrainGrid::new(size, &[], &[], &[], Cell::new(size - 1, size - 1), hotspots)
    }

    #[test]
    fn initialization_seeds_hotspots_at_five_tau() {
        let terrain = open_terrain(6, &[Cell::new(2, 3)]);
        let field = PheromoneField::new(&terrain, 0.4);
        assert_eq!(field.value(Cell::new(2, 3)), 2.0);
        assert_eq!(field.value(Cell::new(0, 0)), 0.4);
    }

    #[test]
    fn double_evaporation_squares_the_decay() {
        let terrain = open_terrain(4, &[]);
        let mut field = PheromoneField::new(&terrain, 1.0);
        field.evaporate(0.3);
        field.evaporate(0.3);
        for value in field.iter_values() {
            assert!((value - 0.49).abs() < 1e-12);
        }
    }

    #[test]
    fn values_stay_non_negative_under_random_operations() {
        let terrain = open_terrain(5, &[Cell::new(1, 1)]);
        let mut field = PheromoneField::new(&terrain, 0.1);
        let mut rng = ChaCha12Rng::seed_from_u64(7);
        for _ in 0..500 {
            match rng.random_range(0..3) {
                0 => {
                    let cell = Cell::new(rng.random_range(0..5), rng.random_range(0..5));
                    field.deposit(cell, rng.random::<f64>());
                }
                1 => field.evaporate(rng.random_range(0.01..0.99)),
                _ => {
                    let path = [Cell::new(0, 0), Cell::new(1, 1), Cell::new(2, 2)];
                    field.reinforce(&path, rng.random::<f64>());
                }
            }
            assert!(field.iter_values().all(|v| v >= 0.0));
        }
    }

    #[test]
    fn hotspot_path_deposit_stacks_to_triple() {
        let terrain = open_terrain(4, &[Cell::new(1, 2)]);
        let mut field = PheromoneField::new(&terrain, 0.0);
        let path = [Cell::new(0, 0), Cell::new(1, 1), Cell::new(1, 2)];
        field.deposit_path(&path, 0.5, &terrain);
        assert_eq!(field.value(Cell::new(1, 1)), 0.5);
        assert_eq!(field.value(Cell::new(1, 2)), 1.5);
    }

    #[test]
    fn path_deposits_commute() {
        let terrain = TerrainGrid::new(
            6,
            &[Band::new(0, 1, 0, 5)],
            &[],
            &[],
            Cell::new(5, 5),
            &[Cell::new(3, 3)],
        );
        let paths: Vec<Vec<Cell>> = vec![
            vec![Cell::new(0, 0), Cell::new(1, 1), Cell::new(2, 2)],
            vec![Cell::new(0, 0), Cell::new(0, 1), Cell::new(3, 3)],
            vec![Cell::new(5, 5), Cell::new(4, 4), Cell::new(3, 3)],
        ];
        let amounts = [0.7, 0.35, 0.9];

        let mut forward = PheromoneField::new(&terrain, 0.2);
        for (path, amount) in paths.iter().zip(amounts) {
            forward.deposit_path(path, amount, &terrain);
        }
        let mut reverse = PheromoneField::new(&terrain, 0.2);
        for (path, amount) in paths.iter().zip(amounts).rev() {
            reverse.deposit_path(path, amount, &terrain);
        }

        let same = forward
            .iter_values()
            .zip(reverse.iter_values())
            .all(|(a, b)| (a - b).abs() < 1e-12);
        assert!(same, "deposit order must not matter");
    }

    #[test]
    fn reinforce_adds_flat_bonus() {
        let terrain = open_terrain(3, &[]);
        let mut field = PheromoneField::new(&terrain, 1.0);
        let path = [Cell::new(0, 0), Cell::new(1, 1)];
        field.reinforce(&path, 0.25);
        assert_eq!(field.value(Cell::new(0, 0)), 1.25);
        assert_eq!(field.value(Cell::new(2, 2)), 1.0);
    }
}

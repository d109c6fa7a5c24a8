use serde::{Deserialize, Serialize};

/// Distance offset that keeps the goal cell's heuristic finite.
const GOAL_EPSILON: f64 = 1e-6;

/// Terrain classification for one grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TerrainClass {
    Land,
    Water,
    Road,
    Blocked,
}

impl TerrainClass {
    /// Survey-priority multiplier applied to the inverse-distance heuristic.
    /// Water areas are the primary survey target, roads secondary.
    pub fn heuristic_factor(&self) -> f64 {
        match self {
            TerrainClass::Water => 3.0,
            TerrainClass::Road => 2.0,
            TerrainClass::Land => 1.0,
            TerrainClass::Blocked => 0.0,
        }
    }

    /// Signal attenuation multiplier for the link-reliability model.
    pub fn link_attenuation(&self) -> f64 {
        match self {
            TerrainClass::Water => 1.6,
            TerrainClass::Road => 0.8,
            TerrainClass::Land => 1.0,
            TerrainClass::Blocked => 2.5,
        }
    }
}

/// Integer grid coordinate, 0-based.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    pub fn distance_to(&self, other: Cell) -> f64 {
        let dr = self.row as f64 - other.row as f64;
        let dc = self.col as f64 - other.col as f64;
        (dr * dr + dc * dc).sqrt()
    }
}

/// Axis-aligned rectangular region of cells, bounds inclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Band {
    pub row_min: usize,
    pub row_max: usize,
    pub col_min: usize,
    pub col_max: usize,
}

impl Band {
    pub fn new(row_min: usize, row_max: usize, col_min: usize, col_max: usize) -> Self {
        Self {
            row_min,
            row_max,
            col_min,
            col_max,
        }
    }

    pub fn contains(&self, cell: Cell) -> bool {
        (self.row_min..=self.row_max).contains(&cell.row)
            && (self.col_min..=self.col_max).contains(&cell.col)
    }
}

/// Square terrain map with a precomputed heuristic field.
///
/// Immutable after construction; everything downstream (walks, pheromone
/// seeding, link attenuation) reads from it.
pub struct TerrainGrid {
    size: usize,
    classes: Vec<TerrainClass>,
    heuristic: Vec<f64>,
    hotspot_mask: Vec<bool>,
    hotspots: Vec<Cell>,
}

impl TerrainGrid {
    /// Build the grid from rectangular region definitions and the goal cell.
    ///
    /// Overlapping regions resolve as Blocked > Water > Road > Land. The
    /// heuristic at each cell is `1 / (dist_to_goal + eps)` scaled by the
    /// cell's terrain factor.
    pub fn new(
        size: usize,
        water_bands: &[Band],
        road_bands: &[Band],
        blocked_bands: &[Band],
        goal: Cell,
        hotspots: &[Cell],
    ) -> Self {
        let mut classes = vec![TerrainClass::Land; size * size];
        for (idx, class) in classes.iter_mut().enumerate() {
            let cell = Cell::new(idx / size, idx % size);
            if blocked_bands.iter().any(|b| b.contains(cell)) {
                *class = TerrainClass::Blocked;
            } else if water_bands.iter().any(|b| b.contains(cell)) {
                *class = TerrainClass::Water;
            } else if road_bands.iter().any(|b| b.contains(cell)) {
                *class = TerrainClass::Road;
            }
        }

        let heuristic = classes
            .iter()
            .enumerate()
            .map(|(idx, class)| {
                let cell = Cell::new(idx / size, idx % size);
                class.heuristic_factor() / (cell.distance_to(goal) + GOAL_EPSILON)
            })
            .collect();

        let mut hotspot_mask = vec![false; size * size];
        for hotspot in hotspots {
            hotspot_mask[hotspot.row * size + hotspot.col] = true;
        }

        Self {
            size,
            classes,
            heuristic,
            hotspot_mask,
            hotspots: hotspots.to_vec(),
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.row < self.size && cell.col < self.size
    }

    pub(crate) fn index(&self, cell: Cell) -> usize {
        debug_assert!(self.in_bounds(cell), "cell out of grid bounds");
        cell.row * self.size + cell.col
    }

    pub fn classify(&self, cell: Cell) -> TerrainClass {
        self.classes[self.index(cell)]
    }

    /// Static desirability of a cell: inverse goal distance times terrain
    /// factor. Zero exactly on Blocked cells.
    pub fn heuristic(&self, cell: Cell) -> f64 {
        self.heuristic[self.index(cell)]
    }

    pub fn is_hotspot(&self, cell: Cell) -> bool {
        self.hotspot_mask[self.index(cell)]
    }

    pub fn hotspots(&self) -> &[Cell] {
        &self.hotspots
    }
}

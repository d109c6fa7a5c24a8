use crate::terrain::{Cell, TerrainClass, TerrainGrid};

/// 8-connected compass offsets, (row, col).
const OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Per-walk record of cells already traversed. Created fresh for each walk
/// and discarded with it; never shared across walks or iterations.
#[derive(Clone, Debug)]
pub struct VisitedMask {
    size: usize,
    cells: Vec<bool>,
}

impl VisitedMask {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![false; size * size],
        }
    }

    pub fn mark(&mut self, cell: Cell) {
        self.cells[cell.row * self.size + cell.col] = true;
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.cells[cell.row * self.size + cell.col]
    }
}

/// Valid moves from `from`: the 8-neighbors that are in bounds, not Blocked,
/// and not yet visited. An empty result signals a dead end.
pub fn neighbors(terrain: &TerrainGrid, from: Cell, visited: &VisitedMask) -> Vec<Cell> {
    let mut out = Vec::with_capacity(OFFSETS.len());
    for (dr, dc) in OFFSETS {
        let row = from.row as isize + dr;
        let col = from.col as isize + dc;
        if row < 0 || col < 0 {
            continue;
        }
        let cell = Cell::new(row as usize, col as usize);
        if !terrain.in_bounds(cell)
            || terrain.classify(cell) == TerrainClass::Blocked
            || visited.contains(cell)
        {
            continue;
        }
        out.push(cell);
    }
    out
}

use crate::grid::{is_alive, Cell, Grid, DEAD, NEWBORN};

const NEIGHBOURS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 1),
    (1, -1),
    (1, 1),
    (-1, 0),
    (1, 0),
    (0, -1),
    (0, 1),
];

/// Living cells among the up to eight neighbours of `(i, j)`.
/// Neighbours past the edge of the grid are not counted.
pub fn neighbours(grid: &Grid, i: usize, j: usize) -> usize {
    NEIGHBOURS
        .iter()
        .filter_map(|&(di, dj)| grid.get_offset(i, j, di, dj))
        .filter(|c| is_alive(*c))
        .count()
}

/// Next value of a cell holding `current` with `n` living neighbours.
pub fn produce_value(current: Cell, n: usize) -> Cell {
    match (is_alive(current), n) {
        (false, 3) => NEWBORN,
        (true, 2 | 3) => current.saturating_add(1),
        _ => DEAD,
    }
}

/// Computes the next generation into a fresh grid; `grid` is only read.
pub fn advance(grid: &Grid) -> Grid {
    let (h, w) = grid.dimensions();
    let mut next = Grid::new(h, w);

    for (i, (src, dst)) in grid.rows().zip(next.rows_mut()).enumerate() {
        for (j, (c, out)) in src.iter().zip(dst.iter_mut()).enumerate() {
            *out = produce_value(*c, neighbours(grid, i, j));
        }
    }
    next
}

impl Grid {
    pub fn tick(&mut self) {
        *self = advance(self);
    }
}

use crate::error::{Error, Result};

/// Consecutive generations a cell has been alive, saturating at `u8::MAX`.
/// Zero is dead; there is no separate alive flag.
pub type Cell = u8;

pub const DEAD: Cell = 0;
pub const NEWBORN: Cell = 1;

#[inline]
pub fn is_alive(c: Cell) -> bool {
    c > DEAD
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub struct Rect {
    rows: usize, // i
    cols: usize, // j
}

impl Rect {
    #[inline]
    pub fn new(rows: usize, cols: usize) -> Self {
        Rect { rows, cols }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn unwrap(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// True when `self` is no larger than `other` on both axes.
    #[inline]
    pub fn fits_in(&self, other: &Rect) -> bool {
        self.rows <= other.rows && self.cols <= other.cols
    }

    #[inline]
    pub fn contains(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols
    }
}

impl std::fmt::Display for Rect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

/// Rectangular array of cell ages with fixed dimensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    size: Rect,
    data: Vec<Vec<Cell>>,
}

impl Grid {
    #[inline]
    pub fn new(rows: usize, cols: usize) -> Self {
        Grid {
            size: Rect::new(rows, cols),
            data: vec![vec![DEAD; cols]; rows],
        }
    }

    pub fn from_rows(data: Vec<Vec<Cell>>) -> Result<Self> {
        let rows = data.len();
        let cols = data.first().map_or(0, Vec::len);

        if !data.iter().all(|r| r.len() == cols) {
            return Err(Error::Parse("all rows of the grid should be same size".into()));
        }

        Ok(Grid {
            size: Rect::new(rows, cols),
            data,
        })
    }

    #[inline]
    pub fn size(&self) -> Rect {
        self.size
    }

    #[inline]
    pub fn dimensions(&self) -> (usize, usize) {
        self.size.unwrap()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.data.iter().map(Vec::as_slice)
    }

    pub(crate) fn rows_mut(&mut self) -> impl Iterator<Item = &mut [Cell]> {
        self.data.iter_mut().map(Vec::as_mut_slice)
    }

    fn check(&self, row: usize, col: usize) -> Result<()> {
        if self.size.contains(row, col) {
            Ok(())
        } else {
            Err(Error::OutOfRange {
                row,
                col,
                rows: self.size.rows(),
                cols: self.size.cols(),
            })
        }
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Result<Cell> {
        self.check(row, col)?;
        Ok(self.data[row][col])
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: Cell) -> Result<()> {
        self.check(row, col)?;
        self.data[row][col] = value;
        Ok(())
    }

    #[inline]
    pub fn is_alive(&self, row: usize, col: usize) -> Result<bool> {
        self.get(row, col).map(is_alive)
    }

    /// Cell at `(row + dr, col + dc)`, or `None` when that falls off the grid.
    #[inline]
    pub fn get_offset(&self, row: usize, col: usize, dr: isize, dc: isize) -> Option<Cell> {
        let i = row.checked_add_signed(dr)?;
        let j = col.checked_add_signed(dc)?;
        self.data.get(i)?.get(j).copied()
    }

    /// Dead cells become newborn, any living cell dies.
    pub fn toggle(&mut self, row: usize, col: usize) -> Result<Cell> {
        let next = if is_alive(self.get(row, col)?) { DEAD } else { NEWBORN };
        self.set(row, col, next)?;
        Ok(next)
    }

    pub fn clear(&mut self) {
        for r in self.data.iter_mut() {
            r.fill(DEAD);
        }
    }

    pub fn population(&self) -> usize {
        self.data
            .iter()
            .flatten()
            .filter(|c| is_alive(**c))
            .count()
    }
}

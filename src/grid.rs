use crate::error::{Error, Result};

/// Moore neighborhood offsets as (row, col)
#[rustfmt::skip]
const MOORE_OFFSETS: [(i32, i32); 8] = [
    (-1, -1), (-1, 0), (-1, 1),
    (0, -1),           (0, 1),
    (1, -1),  (1, 0),  (1, 1),
];

/// A grid position. Coordinates are signed so that shape previews near an
/// edge can reference positions outside the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Cell {
    pub row: i32,
    pub col: i32,
}

impl Cell {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Translate this cell by an offset, saturating at the `i32` limits.
    /// A saturated cell is always outside any grid.
    pub fn offset(self, by: Cell) -> Cell {
        Cell::new(self.row.saturating_add(by.row), self.col.saturating_add(by.col))
    }
}

/// Fixed-size alive/dead matrix, stored row-major. The default value has no
/// cells and only serves as a placeholder while a state is moved out.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<bool>,
}

impl Grid {
    /// Create a grid with every cell dead
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(Error::InvalidDimensions { rows, cols });
        }
        Ok(Self::dead(rows, cols))
    }

    /// Empty grid with the same dimensions as this one
    pub fn cleared(&self) -> Self {
        Self::dead(self.rows, self.cols)
    }

    fn dead(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![false; rows * cols],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn is_in_bounds(&self, cell: Cell) -> bool {
        cell.row >= 0
            && (cell.row as usize) < self.rows
            && cell.col >= 0
            && (cell.col as usize) < self.cols
    }

    fn index(&self, cell: Cell) -> Option<usize> {
        self.is_in_bounds(cell)
            .then(|| cell.row as usize * self.cols + cell.col as usize)
    }

    /// Alive state at a cell; positions outside the grid read as dead
    pub fn is_alive(&self, cell: Cell) -> bool {
        self.index(cell).is_some_and(|idx| self.cells[idx])
    }

    /// Flip one cell in place. Out-of-bounds cells are ignored.
    pub fn toggle(&mut self, cell: Cell) {
        if let Some(idx) = self.index(cell) {
            self.cells[idx] = !self.cells[idx];
        }
    }

    /// Count alive cells in the Moore neighborhood. Positions past the grid
    /// edge are excluded, there is no wraparound.
    pub fn count_live_neighbors(&self, cell: Cell) -> usize {
        MOORE_OFFSETS
            .iter()
            .filter(|&&(dr, dc)| self.is_alive(cell.offset(Cell::new(dr, dc))))
            .count()
    }

    /// Compute the next generation (B3/S23) into a fresh grid
    pub fn step(&self) -> Grid {
        let mut next = self.cleared();
        for row in 0..self.rows {
            for col in 0..self.cols {
                let cell = Cell::new(row as i32, col as i32);
                let neighbors = self.count_live_neighbors(cell);
                let alive = (self.cells[row * self.cols + col] && neighbors == 2) || neighbors == 3;
                next.cells[row * self.cols + col] = alive;
            }
        }
        next
    }

    /// Iterate over every alive cell in row-major order
    pub fn alive_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        let cols = self.cols;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, &alive)| alive)
            .map(move |(idx, _)| Cell::new((idx / cols) as i32, (idx % cols) as i32))
    }

    /// Number of alive cells
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }
}

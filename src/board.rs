use std::fmt;

use rand::Rng;

use crate::error::{Error, Result};

/// State of a single grid position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Dead,
    Alive,
}

impl Cell {
    pub fn is_alive(self) -> bool {
        self == Cell::Alive
    }

    /// The opposite state.
    pub fn toggled(self) -> Self {
        match self {
            Cell::Alive => Cell::Dead,
            Cell::Dead => Cell::Alive,
        }
    }
}

impl From<bool> for Cell {
    fn from(alive: bool) -> Self {
        if alive {
            Cell::Alive
        } else {
            Cell::Dead
        }
    }
}

/// How a freshly created board is filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Seeding {
    AllDead,
    /// Every cell independently alive with probability 1/2.
    #[default]
    Random,
}

/// Row-major `rows × cols` grid of cells. Dimensions are fixed for the
/// lifetime of the value; edits return a new board.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Board {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// An all-dead board.
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        let len = rows
            .checked_mul(cols)
            .filter(|&len| len > 0)
            .ok_or(Error::InvalidDimensions { rows, cols })?;
        Ok(Self {
            rows,
            cols,
            cells: vec![Cell::Dead; len],
        })
    }

    /// A board filled according to `seeding`.
    pub fn create<R: Rng + ?Sized>(
        rows: usize,
        cols: usize,
        seeding: Seeding,
        rng: &mut R,
    ) -> Result<Self> {
        let mut board = Self::new(rows, cols)?;
        if seeding == Seeding::Random {
            for cell in &mut board.cells {
                *cell = Cell::from(rng.gen_bool(0.5));
            }
        }
        Ok(board)
    }

    /// Build a board from text rows: `#`, `O` or `*` are alive, anything
    /// else is dead. All rows must have the same length.
    pub fn from_rows<S: AsRef<str>>(lines: &[S]) -> Result<Self> {
        let rows = lines.len();
        let cols = lines.first().map_or(0, |l| l.as_ref().chars().count());
        let mut board = Self::new(rows, cols)?;
        for (r, line) in lines.iter().enumerate() {
            let line = line.as_ref();
            if line.chars().count() != cols {
                return Err(Error::InvalidDimensions { rows, cols });
            }
            for (c, ch) in line.chars().enumerate() {
                board.cells[r * cols + c] = Cell::from(matches!(ch, '#' | 'O' | '*'));
            }
        }
        Ok(board)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn total_cells(&self) -> usize {
        self.cells.len()
    }

    /// Cells in row-major order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn contains(&self, r: isize, c: isize) -> bool {
        (0..self.rows as isize).contains(&r) && (0..self.cols as isize).contains(&c)
    }

    fn check(&self, r: usize, c: usize) -> Result<usize> {
        if r < self.rows && c < self.cols {
            Ok(r * self.cols + c)
        } else {
            Err(self.out_of_bounds(clamp_signed(r), clamp_signed(c)))
        }
    }

    fn out_of_bounds(&self, row: isize, col: isize) -> Error {
        Error::OutOfBounds {
            row,
            col,
            rows: self.rows,
            cols: self.cols,
        }
    }

    pub fn get(&self, r: usize, c: usize) -> Result<Cell> {
        self.check(r, c).map(|i| self.cells[i])
    }

    /// Read without bounds reporting; callers guarantee `r < rows, c < cols`.
    #[inline]
    pub(crate) fn at(&self, r: usize, c: usize) -> Cell {
        debug_assert!(r < self.rows && c < self.cols);
        self.cells[r * self.cols + c]
    }

    /// A copy of this board with `(r, c)` set to `state`.
    pub fn with_cell(&self, r: usize, c: usize, state: Cell) -> Result<Self> {
        let i = self.check(r, c)?;
        let mut next = self.clone();
        next.cells[i] = state;
        Ok(next)
    }

    /// Assemble a board of the same shape from a per-cell function.
    pub(crate) fn from_fn(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> Cell) -> Self {
        let cells = (0..rows)
            .flat_map(|r| (0..cols).map(move |c| (r, c)))
            .map(|(r, c)| f(r, c))
            .collect();
        Self { rows, cols, cells }
    }

    /// Mutable slot for builders that own a fresh board.
    pub(crate) fn slot_mut(&mut self, r: usize, c: usize) -> &mut Cell {
        let cols = self.cols;
        &mut self.cells[r * cols + c]
    }

    /// An all-dead board with the same dimensions.
    pub fn cleared(&self) -> Self {
        Self {
            rows: self.rows,
            cols: self.cols,
            cells: vec![Cell::Dead; self.cells.len()],
        }
    }

    /// Number of live cells.
    pub fn count_alive(&self) -> usize {
        self.cells.iter().filter(|c| c.is_alive()).count()
    }

    /// Coordinates of every live cell, row-major.
    pub fn alive_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let cols = self.cols;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_alive())
            .map(move |(i, _)| (i / cols, i % cols))
    }

    /// A copy with every `(dx, dy)` offset of `pattern` set alive around
    /// `center` (`(row, col)`, board centre if `None`). Offsets are
    /// column-first. Placements past the edge fail instead of wrapping.
    pub fn place_pattern(&self, pattern: &[(i32, i32)], center: Option<(usize, usize)>) -> Result<Self> {
        let (cr, cc) = center.unwrap_or((self.rows / 2, self.cols / 2));
        let mut next = self.clone();
        for &(dx, dy) in pattern {
            let r = cr as isize + dy as isize;
            let c = cc as isize + dx as isize;
            if !self.contains(r, c) {
                return Err(self.out_of_bounds(r, c));
            }
            *next.slot_mut(r as usize, c as usize) = Cell::Alive;
        }
        Ok(next)
    }
}

/// Saturating `usize -> isize` for error reporting.
fn clamp_signed(v: usize) -> isize {
    isize::try_from(v).unwrap_or(isize::MAX)
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.cols) {
            let line: String = row
                .iter()
                .map(|c| if c.is_alive() { '#' } else { '.' })
                .collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Board {}x{}", self.rows, self.cols)?;
        fmt::Display::fmt(self, f)
    }
}

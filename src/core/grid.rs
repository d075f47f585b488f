//! Grid module - the rectangular board of color ids
//!
//! Cells are stored in a flat row-major `Vec` (index `y * width + x`).
//! Row 0 is the top; row `height - 1` is the bottom. Each cell holds a
//! color id in `0..COLOR_COUNT` or the `EMPTY` sentinel while a removal
//! is in flight. The grid is owned exclusively by the engine; everything
//! external sees copies.

use crate::core::rng::SimpleRng;
use crate::types::{Cell, COLOR_COUNT, EMPTY};

/// Errors raised when building a grid from explicit rows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridInitError {
    /// Fewer than one row or one column
    TooSmall,
    /// Rows of differing lengths
    Ragged,
    /// A value outside `0..COLOR_COUNT` (and not `EMPTY`)
    BadValue,
}

impl GridInitError {
    pub fn code(self) -> &'static str {
        match self {
            GridInitError::TooSmall => "too_small",
            GridInitError::Ragged => "ragged",
            GridInitError::BadValue => "bad_value",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            GridInitError::TooSmall => "grid needs at least one row and one column",
            GridInitError::Ragged => "all rows must have the same length",
            GridInitError::BadValue => "cell value outside the color range",
        }
    }
}

/// The board: `height` rows x `width` columns of color ids
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    /// Flat array of cells, row-major order (y * width + x)
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a grid with every cell set to `EMPTY`
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![EMPTY; width * height],
        }
    }

    /// Build a grid from explicit rows (host setups and tests)
    pub fn from_rows(rows: &[Vec<Cell>]) -> Result<Self, GridInitError> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if height == 0 || width == 0 {
            return Err(GridInitError::TooSmall);
        }
        if rows.iter().any(|row| row.len() != width) {
            return Err(GridInitError::Ragged);
        }
        let mut cells = Vec::with_capacity(width * height);
        for row in rows {
            for &value in row {
                if value != EMPTY && !(0..COLOR_COUNT as Cell).contains(&value) {
                    return Err(GridInitError::BadValue);
                }
                cells.push(value);
            }
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline]
    fn index(&self, x: usize, y: usize) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y * self.width + x)
    }

    /// Get cell at (x, y); `None` if out of bounds
    pub fn get(&self, x: usize, y: usize) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at (x, y); returns false if out of bounds
    pub fn set(&mut self, x: usize, y: usize, value: Cell) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = value;
                true
            }
            None => false,
        }
    }

    /// Check signed coordinates against the bounds
    pub fn in_bounds(&self, x: i64, y: i64) -> bool {
        x >= 0 && (x as usize) < self.width && y >= 0 && (y as usize) < self.height
    }

    /// Swap two in-bounds cells; no-op if either is out of bounds
    pub fn swap(&mut self, a: (usize, usize), b: (usize, usize)) {
        if let (Some(ia), Some(ib)) = (self.index(a.0, a.1), self.index(b.0, b.1)) {
            self.cells.swap(ia, ib);
        }
    }

    /// Fill every cell with a random color id
    pub fn fill_random(&mut self, rng: &mut SimpleRng) {
        for cell in &mut self.cells {
            *cell = rng.next_color();
        }
    }

    /// True while any cell still holds the `EMPTY` sentinel
    pub fn contains_empty(&self) -> bool {
        self.cells.contains(&EMPTY)
    }

    /// Copy out as rows (snapshot payload)
    pub fn rows(&self) -> Vec<Vec<Cell>> {
        (0..self.height)
            .map(|y| {
                let start = y * self.width;
                self.cells[start..start + self.width].to_vec()
            })
            .collect()
    }
}

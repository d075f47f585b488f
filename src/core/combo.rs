//! Combo module - match detection and merging
//!
//! A combo is a contiguous run of at least `MIN_RUN` same-valued cells
//! along one row or one column. Detection slides a 3-cell window over
//! the grid, which yields overlapping length-3 combos for longer runs;
//! `reduce_combos` merges those into maximal, non-overlapping runs.
//! Combos are transient: found fresh on each scan, consumed by removal.

use crate::core::grid::Grid;
use crate::types::{Cell, EMPTY, MIN_RUN};

/// An (x, y, value) triple locating one matched cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    /// Column
    pub x: usize,
    /// Row
    pub y: usize,
    pub value: Cell,
}

impl Position {
    pub fn new(x: usize, y: usize, value: Cell) -> Self {
        Self { x, y, value }
    }
}

/// Combo shape; only straight runs exist in this rule set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ComboKind {
    Line,
}

/// Axis a line combo runs along
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// A matched run: kind, length and the ordered positions it covers.
/// Invariant: positions share one value, are colinear and contiguous,
/// ordered by their coordinate along the run axis.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Combo {
    pub kind: ComboKind,
    pub length: usize,
    pub positions: Vec<Position>,
}

impl Combo {
    /// Build a line combo from already-ordered positions
    pub fn line(positions: Vec<Position>) -> Self {
        Self {
            kind: ComboKind::Line,
            length: positions.len(),
            positions,
        }
    }

    /// Shared value of every position in the run
    pub fn value(&self) -> Cell {
        self.positions[0].value
    }

    /// Horizontal when all positions sit on one row, vertical otherwise.
    /// A single detection window never mixes axes.
    pub fn orientation(&self) -> Orientation {
        if self.positions.len() < 2 || self.positions[0].y == self.positions[1].y {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        }
    }

    /// Coordinate along the run axis for a given position
    fn axis_coord(&self, pos: &Position) -> usize {
        match self.orientation() {
            Orientation::Horizontal => pos.x,
            Orientation::Vertical => pos.y,
        }
    }

    /// Coordinate fixed across the run (the row of a horizontal combo)
    fn cross_coord(&self) -> usize {
        match self.orientation() {
            Orientation::Horizontal => self.positions[0].y,
            Orientation::Vertical => self.positions[0].x,
        }
    }

    fn axis_range(&self) -> (usize, usize) {
        let mut min = usize::MAX;
        let mut max = 0;
        for pos in &self.positions {
            let coord = self.axis_coord(pos);
            min = min.min(coord);
            max = max.max(coord);
        }
        (min, max)
    }

    /// True when `self` continues or overlaps `other`: same axis, same
    /// value, same fixed coordinate, and the two runs touch or share
    /// cells along the run axis.
    pub fn is_sequence_of(&self, other: &Combo) -> bool {
        if self.orientation() != other.orientation()
            || self.value() != other.value()
            || self.cross_coord() != other.cross_coord()
        {
            return false;
        }
        let (a_min, a_max) = self.axis_range();
        let (b_min, b_max) = other.axis_range();
        a_min <= b_max + 1 && b_min <= a_max + 1
    }

    /// Merge two sequential combos into one larger run. The result
    /// covers the ordered union of positions; the inputs are discarded.
    pub fn merged(a: &Combo, b: &Combo) -> Combo {
        let mut positions: Vec<Position> = a.positions.clone();
        positions.extend_from_slice(&b.positions);
        match a.orientation() {
            Orientation::Horizontal => positions.sort_by_key(|p| p.x),
            Orientation::Vertical => positions.sort_by_key(|p| p.y),
        }
        positions.dedup_by_key(|p| (p.x, p.y));
        Combo::line(positions)
    }
}

/// Scan the grid for combos: row-wise 3-windows first, then
/// column-wise. Windows over `EMPTY` never match. Overlapping windows
/// from longer runs are merged before returning.
pub fn find_combos(grid: &Grid) -> Vec<Combo> {
    let mut combos = Vec::new();
    let width = grid.width();
    let height = grid.height();

    // Horizontal runs, row-major.
    for y in 0..height {
        for x in 0..width.saturating_sub(MIN_RUN - 1) {
            let v = grid.get(x, y);
            if v != Some(EMPTY) && v == grid.get(x + 1, y) && v == grid.get(x + 2, y) {
                let value = v.unwrap_or(EMPTY);
                combos.push(Combo::line(vec![
                    Position::new(x, y, value),
                    Position::new(x + 1, y, value),
                    Position::new(x + 2, y, value),
                ]));
            }
        }
    }

    // Vertical runs, column-major.
    for x in 0..width {
        for y in 0..height.saturating_sub(MIN_RUN - 1) {
            let v = grid.get(x, y);
            if v != Some(EMPTY) && v == grid.get(x, y + 1) && v == grid.get(x, y + 2) {
                let value = v.unwrap_or(EMPTY);
                combos.push(Combo::line(vec![
                    Position::new(x, y, value),
                    Position::new(x, y + 1, value),
                    Position::new(x, y + 2, value),
                ]));
            }
        }
    }

    reduce_combos(combos)
}

/// Merge every pair of sequential combos, repeating until no pair is
/// left. Running to a fixpoint (rather than a single pairwise pass)
/// guarantees the result is maximal per connected run, so a 5-cell run
/// comes back as one length-5 combo and never as overlapping triples.
pub fn reduce_combos(mut combos: Vec<Combo>) -> Vec<Combo> {
    loop {
        let mut merged_at = None;
        'scan: for i in 0..combos.len() {
            for j in (i + 1)..combos.len() {
                if combos[j].is_sequence_of(&combos[i]) {
                    merged_at = Some((i, j));
                    break 'scan;
                }
            }
        }
        match merged_at {
            Some((i, j)) => {
                let merged = Combo::merged(&combos[i], &combos[j]);
                combos.remove(j);
                combos.remove(i);
                combos.push(merged);
            }
            None => return combos,
        }
    }
}

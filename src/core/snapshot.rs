//! Snapshot module - what observers receive
//!
//! Observers never see the live grid; every notification carries a
//! fresh copy of the cell rows plus the fall distances of the most
//! recent gravity resolution, which the animation layer uses to drive
//! falling-tile keyframes.

use crate::types::Cell;

/// Immutable copy of the grid published to subscribers.
/// `cells` never contains the `EMPTY` sentinel when delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridSnapshot {
    /// Color ids, `cells[row][col]`, row 0 on top
    pub cells: Vec<Vec<Cell>>,
    /// Rows each cell fell during the last gravity resolution
    /// (0 for cells that did not move); same shape as `cells`
    pub falls: Vec<Vec<u8>>,
    /// Combos removed since the engine started (diagnostic)
    pub combos_cleared: u32,
    /// Cascade rounds resolved since the engine started (diagnostic)
    pub cascades: u32,
}

impl GridSnapshot {
    pub fn width(&self) -> usize {
        self.cells.first().map_or(0, Vec::len)
    }

    pub fn height(&self) -> usize {
        self.cells.len()
    }
}

//! Core types shared across the engine
//! This module contains pure data types with no external dependencies

/// Default board dimensions
pub const DEFAULT_WIDTH: usize = 10;
pub const DEFAULT_HEIGHT: usize = 10;

/// Number of tile colors; cells hold a color id in `0..COLOR_COUNT`
pub const COLOR_COUNT: u8 = 5;

/// Minimum run length that counts as a combo
pub const MIN_RUN: usize = 3;

/// A cell holds a color id (`0..=4`) or `EMPTY` while a removal is
/// being resolved. `EMPTY` never survives a completed operation.
pub type Cell = i8;

/// Sentinel for "empty, pending refill/fall"
pub const EMPTY: Cell = -1;

/// Swap directions for player moves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// The direction a swapped-with tile travels
    pub fn opposite(&self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Grid offset as (dx, dy); positive y points down (row 0 is the top)
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// Parse direction from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "up" | "u" => Some(Direction::Up),
            "down" | "d" => Some(Direction::Down),
            "left" | "l" => Some(Direction::Left),
            "right" | "r" => Some(Direction::Right),
            _ => None,
        }
    }

    /// Convert to string
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

/// A player-initiated swap: offset plus its symbolic direction.
/// Constructed by the host per gesture; immutable once built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MovementInfo {
    /// Column offset of the destination cell
    pub x: i32,
    /// Row offset of the destination cell
    pub y: i32,
    pub direction: Direction,
}

impl MovementInfo {
    /// Build the offset pair from a direction
    pub fn new(direction: Direction) -> Self {
        let (x, y) = direction.delta();
        Self { x, y, direction }
    }

    /// Movement of the tile on the other side of the swap
    pub fn opposite(&self) -> Self {
        Self::new(self.direction.opposite())
    }
}

/// Reference to the cell a gesture started on, as exposed by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellRef {
    pub row: usize,
    pub col: usize,
}

impl CellRef {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Engine construction parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridConfig {
    pub width: usize,
    pub height: usize,
    /// RNG seed; same seed reproduces the same board and refills
    pub seed: u32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            seed: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_opposite_is_involutive() {
        for dir in Direction::ALL {
            assert_eq!(dir.opposite().opposite(), dir);
        }
    }

    #[test]
    fn direction_delta_matches_opposite() {
        for dir in Direction::ALL {
            let (dx, dy) = dir.delta();
            let (ox, oy) = dir.opposite().delta();
            assert_eq!((dx + ox, dy + oy), (0, 0));
        }
    }

    #[test]
    fn direction_string_roundtrip() {
        for dir in Direction::ALL {
            assert_eq!(Direction::from_str(dir.as_str()), Some(dir));
        }
        assert_eq!(Direction::from_str("sideways"), None);
    }

    #[test]
    fn movement_info_carries_direction_offset() {
        let m = MovementInfo::new(Direction::Up);
        assert_eq!((m.x, m.y), (0, -1));
        assert_eq!(m.opposite().direction, Direction::Down);
    }
}

//! Engine module - orchestration on top of the core rules

pub mod table;

pub use table::{GameTable, MoveError, Observer};

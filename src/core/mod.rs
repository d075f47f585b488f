//! Core module - pure game logic with no external dependencies
//!
//! Board storage, match detection/merging, deterministic RNG and the
//! snapshot type. No I/O and no timing in here; orchestration lives in
//! `crate::engine`.

pub mod combo;
pub mod grid;
pub mod rng;
pub mod snapshot;

// Re-export commonly used types
pub use combo::{find_combos, reduce_combos, Combo, ComboKind, Orientation, Position};
pub use grid::{Grid, GridInitError};
pub use rng::SimpleRng;
pub use snapshot::GridSnapshot;

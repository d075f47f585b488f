//! Match-3 grid engine.
//!
//! Owns a rectangular board of colored tiles, finds and merges combos
//! (runs of three or more), applies gravity after removals, validates
//! player swaps and resolves cascades, and publishes grid snapshots to
//! subscribed observers. Rendering and gesture handling live in the
//! host; this crate is the rule engine only.
//!
//! ```
//! use gem_grid::{Direction, GameTable, GridConfig, MovementInfo};
//! use gem_grid::types::CellRef;
//!
//! let mut table = GameTable::new(GridConfig { width: 6, height: 6, seed: 7 });
//! table.subscribe(|snapshot| {
//!     assert!(snapshot.cells.iter().flatten().all(|&c| c >= 0));
//! });
//! table.start();
//!
//! let movement = MovementInfo::new(Direction::Right);
//! let _ = table.handle_movement(&movement, CellRef::new(2, 2), 250);
//! table.tick(250);
//! ```

pub mod core;
pub mod engine;
pub mod types;

pub use crate::core::combo::{find_combos, reduce_combos, Combo, ComboKind, Position};
pub use crate::core::grid::{Grid, GridInitError};
pub use crate::core::rng::SimpleRng;
pub use crate::core::snapshot::GridSnapshot;
pub use crate::engine::{GameTable, MoveError};
pub use crate::types::{Cell, Direction, GridConfig, MovementInfo, EMPTY};

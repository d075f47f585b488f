//! Game table module - owns the grid and drives the rules
//!
//! `GameTable` is the orchestrator: it generates the board, finds and
//! removes combos, applies gravity, validates player moves, runs the
//! cascade loop and publishes snapshots to subscribers. Everything is
//! single-threaded and cooperative; the only deferred work is the
//! post-move notification, scheduled in milliseconds and drained by
//! `tick` the same way all game timers are driven.

use std::fmt;

use crate::core::combo::{find_combos, Combo};
use crate::core::grid::{Grid, GridInitError};
use crate::core::rng::SimpleRng;
use crate::core::snapshot::GridSnapshot;
use crate::types::{Cell, CellRef, EMPTY, GridConfig, MovementInfo};

/// Callback receiving a grid snapshot on every notification
pub type Observer = Box<dyn FnMut(&GridSnapshot)>;

/// Why a move was rejected. Rejection is pure: the grid is unchanged
/// and no notification fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    /// `start()` has not run yet
    NotStarted,
    /// Source or destination falls outside the board
    OutOfBounds,
    /// The swap would produce no combo; it was reverted
    NoCombo,
}

impl MoveError {
    pub fn code(self) -> &'static str {
        match self {
            MoveError::NotStarted => "not_started",
            MoveError::OutOfBounds | MoveError::NoCombo => "invalid_move",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            MoveError::NotStarted => "engine not started",
            MoveError::OutOfBounds => "move destination outside the grid",
            MoveError::NoCombo => "swap produces no combo",
        }
    }
}

/// Snapshot notification scheduled after a successful move.
/// Fire-and-forget: once scheduled it always fires; `move_id` is
/// diagnostic.
#[derive(Debug, Clone, Copy)]
struct PendingNotify {
    remaining_ms: u32,
    #[allow(dead_code)]
    move_id: u32,
}

/// The match-3 engine bound to one board
pub struct GameTable {
    config: GridConfig,
    grid: Grid,
    rng: SimpleRng,
    observers: Vec<Observer>,
    /// Fall distance of each cell during the most recent gravity
    /// resolution; shipped with every snapshot for fall animation
    falls: Vec<Vec<u8>>,
    pending: Vec<PendingNotify>,
    move_seq: u32,
    combos_cleared: u32,
    cascades: u32,
    started: bool,
}

impl GameTable {
    /// Create an engine bound to a board of the configured dimensions.
    /// Until `start()` runs, the board is a degenerate 1x1 placeholder.
    pub fn new(config: GridConfig) -> Self {
        Self {
            config,
            grid: Grid::new(1, 1),
            rng: SimpleRng::new(config.seed),
            observers: Vec::new(),
            falls: vec![vec![0; 1]; 1],
            pending: Vec::new(),
            move_seq: 0,
            combos_cleared: 0,
            cascades: 0,
            started: false,
        }
    }

    /// Build an already-started table from explicit rows (hosts and
    /// tests). Does not resolve combos and does not notify.
    pub fn with_grid(rows: &[Vec<Cell>], seed: u32) -> Result<Self, GridInitError> {
        let grid = Grid::from_rows(rows)?;
        let config = GridConfig {
            width: grid.width(),
            height: grid.height(),
            seed,
        };
        let falls = vec![vec![0; grid.width()]; grid.height()];
        Ok(Self {
            config,
            grid,
            rng: SimpleRng::new(seed),
            observers: Vec::new(),
            falls,
            pending: Vec::new(),
            move_seq: 0,
            combos_cleared: 0,
            cascades: 0,
            started: true,
        })
    }

    pub fn config(&self) -> GridConfig {
        self.config
    }

    pub fn started(&self) -> bool {
        self.started
    }

    /// Number of subscribed observers
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Notifications scheduled but not yet fired
    pub fn pending_notifications(&self) -> usize {
        self.pending.len()
    }

    /// Register an observer; notified synchronously, in subscription
    /// order, with a copy of the grid. No unsubscribe.
    pub fn subscribe(&mut self, observer: impl FnMut(&GridSnapshot) + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Copy of the current rows (diagnostic / host queries)
    pub fn rows(&self) -> Vec<Vec<Cell>> {
        self.grid.rows()
    }

    /// Same payload observers receive, on demand
    pub fn snapshot(&self) -> GridSnapshot {
        GridSnapshot {
            cells: self.grid.rows(),
            falls: self.falls.clone(),
            combos_cleared: self.combos_cleared,
            cascades: self.cascades,
        }
    }

    /// Allocate the board, fill it with random colors, notify, then
    /// settle it (a fresh board may already contain matches) and
    /// notify again. Idempotent: repeated calls are no-ops.
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;

        self.grid = Grid::new(self.config.width, self.config.height);
        self.grid.fill_random(&mut self.rng);
        self.falls = vec![vec![0; self.config.width]; self.config.height];

        self.notify_all();
        self.handle_combos();
        self.notify_all();
    }

    /// Validate and apply a player swap.
    ///
    /// Out-of-bounds destinations are rejected untouched; swaps that
    /// produce no combo are reverted. A valid swap runs the cascade
    /// loop to completion synchronously, then schedules a snapshot
    /// notification `animation_threshold_ms / 2` in the future so the
    /// host can animate the swap before the settled grid is revealed.
    pub fn handle_movement(
        &mut self,
        movement: &MovementInfo,
        target: CellRef,
        animation_threshold_ms: u32,
    ) -> Result<(), MoveError> {
        if !self.started {
            return Err(MoveError::NotStarted);
        }

        let (col, row) = (target.col as i64, target.row as i64);
        let dest_col = col + i64::from(movement.x);
        let dest_row = row + i64::from(movement.y);
        if !self.grid.in_bounds(col, row) || !self.grid.in_bounds(dest_col, dest_row) {
            return Err(MoveError::OutOfBounds);
        }

        let from = (col as usize, row as usize);
        let to = (dest_col as usize, dest_row as usize);
        self.grid.swap(from, to);

        if find_combos(&self.grid).is_empty() {
            self.grid.swap(from, to);
            return Err(MoveError::NoCombo);
        }

        self.handle_combos();

        self.move_seq = self.move_seq.wrapping_add(1);
        self.pending.push(PendingNotify {
            remaining_ms: animation_threshold_ms / 2,
            move_id: self.move_seq,
        });

        Ok(())
    }

    /// Advance the deferred-notification clock. Due notifications fire
    /// in FIFO order; each fires exactly once.
    pub fn tick(&mut self, elapsed_ms: u32) {
        if self.pending.is_empty() {
            return;
        }
        for entry in &mut self.pending {
            entry.remaining_ms = entry.remaining_ms.saturating_sub(elapsed_ms);
        }
        while let Some(idx) = self.pending.iter().position(|p| p.remaining_ms == 0) {
            self.pending.remove(idx);
            self.notify_all();
        }
    }

    /// Cascade loop: find, remove, apply gravity, until a scan comes
    /// back empty. Each round of gravity can expose new matches, so a
    /// single move may resolve a chain of arbitrary depth; iterations
    /// are bounded because every round removes at least three cells.
    /// Does not notify; callers decide when observers hear about it.
    pub fn handle_combos(&mut self) {
        loop {
            let combos = find_combos(&self.grid);
            if combos.is_empty() {
                break;
            }
            self.cascades = self.cascades.wrapping_add(1);
            self.combos_cleared = self.combos_cleared.wrapping_add(combos.len() as u32);
            self.remove_combos(&combos);
            self.update_grid_values();
        }
    }

    /// Blank out every matched position. Side effect only; gravity and
    /// notification are the caller's job.
    pub fn remove_combos(&mut self, combos: &[Combo]) {
        for combo in combos {
            for pos in &combo.positions {
                self.grid.set(pos.x, pos.y, EMPTY);
            }
        }
    }

    /// Gravity: bottom-up passes until the grid is gap-free.
    ///
    /// Within a pass, a gap pulls the value directly above it down one
    /// row (leaving a gap behind), and a gap in the top row is refilled
    /// with a fresh random color. Scanning bottom-up drains a column's
    /// gaps toward the top, so the outer loop runs at most `height`
    /// passes. Fall distances accumulate in `falls`, reset at the
    /// start of each resolution: a value carries its distance with it,
    /// a spawned tile starts at one.
    pub fn update_grid_values(&mut self) {
        let width = self.grid.width();
        let height = self.grid.height();
        self.falls = vec![vec![0; width]; height];

        loop {
            for y in (0..height).rev() {
                for x in 0..width {
                    if self.grid.get(x, y) != Some(EMPTY) {
                        continue;
                    }
                    if y == 0 {
                        let color = self.rng.next_color();
                        self.grid.set(x, 0, color);
                        self.falls[0][x] = 1;
                    } else {
                        let above = self.grid.get(x, y - 1).unwrap_or(EMPTY);
                        self.grid.set(x, y, above);
                        self.grid.set(x, y - 1, EMPTY);
                        if above != EMPTY {
                            self.falls[y][x] = self.falls[y - 1][x].saturating_add(1);
                        }
                        self.falls[y - 1][x] = 0;
                    }
                }
            }
            if !self.grid.contains_empty() {
                break;
            }
        }
    }

    /// Publish the current snapshot to every observer, in
    /// subscription order.
    fn notify_all(&mut self) {
        let snapshot = self.snapshot();
        for observer in &mut self.observers {
            observer(&snapshot);
        }
    }
}

impl fmt::Debug for GameTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameTable")
            .field("config", &self.config)
            .field("started", &self.started)
            .field("observers", &self.observers.len())
            .field("pending", &self.pending.len())
            .field("combos_cleared", &self.combos_cleared)
            .field("cascades", &self.cascades)
            .finish()
    }
}

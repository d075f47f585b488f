//! Headless engine runner (default binary).
//!
//! Stands in for the host UI: builds a table, subscribes a printing
//! observer, applies scripted moves and drains deferred notifications.
//! There is no rendering layer here; snapshots are printed as rows of
//! color ids.

use anyhow::{anyhow, Result};

use gem_grid::types::CellRef;
use gem_grid::{Direction, GameTable, GridConfig, GridSnapshot, MovementInfo};

/// Delay handed to `handle_movement`; the settle notification fires
/// after half of it.
const DEFAULT_THRESHOLD_MS: u32 = 250;

#[derive(Debug)]
struct DriverConfig {
    grid: GridConfig,
    threshold_ms: u32,
    moves: Vec<(Direction, CellRef)>,
}

fn parse_args(args: &[String]) -> Result<DriverConfig> {
    let mut config = DriverConfig {
        grid: GridConfig::default(),
        threshold_ms: DEFAULT_THRESHOLD_MS,
        moves: Vec::new(),
    };

    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--width" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --width"))?;
                config.grid.width = v
                    .parse::<usize>()
                    .map_err(|_| anyhow!("invalid --width value: {}", v))?;
            }
            "--height" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --height"))?;
                config.grid.height = v
                    .parse::<usize>()
                    .map_err(|_| anyhow!("invalid --height value: {}", v))?;
            }
            "--seed" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --seed"))?;
                config.grid.seed = v
                    .parse::<u32>()
                    .map_err(|_| anyhow!("invalid --seed value: {}", v))?;
            }
            "--threshold" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --threshold"))?;
                config.threshold_ms = v
                    .parse::<u32>()
                    .map_err(|_| anyhow!("invalid --threshold value: {}", v))?;
            }
            "--moves" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --moves"))?;
                for spec in v.split(';').filter(|s| !s.is_empty()) {
                    config.moves.push(parse_move(spec)?);
                }
            }
            other => {
                return Err(anyhow!("unknown argument: {}", other));
            }
        }
        i += 1;
    }

    Ok(config)
}

/// One scripted move: `direction:row,col` (e.g. `right:2,3`)
fn parse_move(spec: &str) -> Result<(Direction, CellRef)> {
    let (dir_str, cell_str) = spec
        .split_once(':')
        .ok_or_else(|| anyhow!("move: expected direction:row,col, got: {}", spec))?;
    let direction =
        Direction::from_str(dir_str).ok_or_else(|| anyhow!("move: unknown direction: {}", dir_str))?;
    let (row_str, col_str) = cell_str
        .split_once(',')
        .ok_or_else(|| anyhow!("move: expected row,col after ':', got: {}", cell_str))?;
    let row = row_str
        .parse::<usize>()
        .map_err(|_| anyhow!("move: invalid row: {}", row_str))?;
    let col = col_str
        .parse::<usize>()
        .map_err(|_| anyhow!("move: invalid col: {}", col_str))?;
    Ok((direction, CellRef::new(row, col)))
}

/// Printable form of one cell; negative (unresolved) cells print as a
/// dot so the printer never panics on arithmetic.
fn cell_char(cell: i8) -> char {
    match u8::try_from(cell) {
        Ok(id) => char::from(b'0' + id),
        Err(_) => '.',
    }
}

fn print_snapshot(snapshot: &GridSnapshot) {
    println!(
        "grid {}x{} | combos cleared: {} | cascades: {}",
        snapshot.width(),
        snapshot.height(),
        snapshot.combos_cleared,
        snapshot.cascades
    );
    for row in &snapshot.cells {
        let line: String = row.iter().map(|&c| cell_char(c)).collect();
        println!("  {}", line);
    }
}

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = parse_args(&args)?;

    let mut table = GameTable::new(config.grid);
    table.subscribe(print_snapshot);
    table.start();

    for (direction, target) in &config.moves {
        let movement = MovementInfo::new(*direction);
        match table.handle_movement(&movement, *target, config.threshold_ms) {
            Ok(()) => println!(
                "move {} at {},{}: applied",
                direction.as_str(),
                target.row,
                target.col
            ),
            Err(err) => println!(
                "move {} at {},{}: rejected ({})",
                direction.as_str(),
                target.row,
                target.col,
                err.message()
            ),
        }
        // Drain the deferred settle notification before the next move.
        table.tick(config.threshold_ms);
    }

    Ok(())
}

//! Exhaustive solver library for Ricochet Robots sliding puzzles.
//!
//! Robots slide in straight lines and only stop when they hit a wall or
//! another robot. This crate models the walled board, searches for one or
//! all shortest goal-satisfying move sequences, and can map the minimum
//! number of moves needed to reach each cell for a chosen robot.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub mod board;
pub mod fmt;
pub mod goal;
pub mod movement;
pub mod parse;
pub mod reach;
pub mod solver;

// Re-export main types
pub use board::{Board, CellWalls, Direction, Goal, GoalTarget, Position, RobotState};
pub use fmt::{no_solution_line, BoardDisplay};
pub use parse::load;
pub use reach::{map_reachability, ReachConfig, ReachabilityMap, DEFAULT_REACH_CEILING};
pub use solver::{
    solve, SearchConfig, SearchMode, SearchOutcome, SearchStats, Solution, Step,
    UNBOUNDED_MOVE_CEILING,
};

/// Fatal puzzle-loading errors. An unsolvable puzzle is not an error: the
/// search reports it as an ordinary empty outcome.
#[derive(Debug, Error)]
pub enum PuzzleError {
    /// The puzzle file could not be read at all.
    #[error("could not open {} for reading", path.display())]
    FileOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// A record started with a keyword the format does not define.
    #[error("unknown token in the input file: {0}")]
    UnknownKeyword(String),
    /// A record was truncated, out of range, or inconsistent with the rest
    /// of the file.
    #[error("malformed puzzle: {0}")]
    Malformed(String),
}

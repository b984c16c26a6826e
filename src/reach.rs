//! Minimum-move reachability maps for a single tracked robot.
//!
//! The mapper reuses the solver's branching, every robot may move, but
//! instead of testing goals it records the fewest moves after which the
//! tracked robot has been seen on each cell.

use crate::board::{Board, Direction, Position, RobotState};

/// Depth ceiling applied when no explicit bound is given. The walk is
/// exhaustive in the number of moves, so some ceiling is needed to keep
/// it finite; cells only reachable in more moves stay unmarked.
pub const DEFAULT_REACH_CEILING: u32 = 10;

/// Reachability parameters.
#[derive(Debug, Clone, Default)]
pub struct ReachConfig {
    /// Explicit move bound. `None` falls back to [`DEFAULT_REACH_CEILING`].
    pub max_moves: Option<u32>,
}

/// Per-cell minimum move counts for the tracked robot. `None` cells were
/// never visited within the bound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReachabilityMap {
    rows: i32,
    cols: i32,
    cells: Vec<Option<u32>>,
}

impl ReachabilityMap {
    fn new(rows: i32, cols: i32) -> Self {
        Self {
            rows,
            cols,
            cells: vec![None; rows as usize * cols as usize],
        }
    }

    pub fn rows(&self) -> i32 {
        self.rows
    }

    pub fn cols(&self) -> i32 {
        self.cols
    }

    /// Minimum move count recorded for `pos`, `None` if unreached.
    pub fn get(&self, pos: Position) -> Option<u32> {
        self.cells[self.index(pos)]
    }

    /// Row-major rows of the grid, northmost first.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[Option<u32>]> + '_ {
        self.cells.chunks(self.cols as usize)
    }

    /// Marks `pos` as reached in `moves`, keeping the smaller count if the
    /// cell was already reached.
    fn record(&mut self, pos: Position, moves: u32) {
        let index = self.index(pos);
        let cell = &mut self.cells[index];
        match *cell {
            Some(best) if best <= moves => {}
            _ => *cell = Some(moves),
        }
    }

    fn index(&self, pos: Position) -> usize {
        (pos.row - 1) as usize * self.cols as usize + (pos.col - 1) as usize
    }
}

/// Walks every move sequence within the bound from the board's starting
/// state and records where the tracked robot has been. The starting cell
/// is always marked with zero moves.
pub fn map_reachability(board: &Board, robot: usize, config: &ReachConfig) -> ReachabilityMap {
    let bound = config.max_moves.unwrap_or(DEFAULT_REACH_CEILING);
    let mut map = ReachabilityMap::new(board.rows(), board.cols());
    let mut state = board.start().clone();
    walk(board, &mut state, robot, 0, bound, &mut map);
    debug_assert_eq!(state, *board.start());
    map
}

fn walk(
    board: &Board,
    state: &mut RobotState,
    tracked: usize,
    depth: u32,
    bound: u32,
    map: &mut ReachabilityMap,
) {
    map.record(state.position(tracked), depth);
    if depth == bound {
        return;
    }
    for robot in 0..board.robot_count() {
        for dir in Direction::ALL {
            if !board.is_valid_move(state, robot, dir) {
                continue;
            }
            let dest = board.slide_destination(state, robot, dir);
            let prev = state.move_robot(robot, dest);
            walk(board, state, tracked, depth + 1, bound, map);
            state.move_robot(robot, prev);
        }
    }
}

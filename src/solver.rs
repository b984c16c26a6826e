//! Depth-bounded exhaustive search for shortest solutions.
//!
//! The search walks every move sequence up to a bound, depth first. A
//! shared incumbent records the shortest solution length seen so far and
//! prunes every branch that could not match it. Moves are applied to a
//! single working state and undone on backtrack, so branching never
//! copies the board.

use std::time::{Duration, Instant};

use crate::board::{Board, Direction, RobotState};

/// Hard ceiling for iterative deepening when no move bound is supplied.
/// Keeps the search finite even on unsolvable boards.
pub const UNBOUNDED_MOVE_CEILING: u32 = 20;

/// Incumbent value meaning no solution has been found yet.
const NO_INCUMBENT: u32 = u32::MAX;

/// Which solutions the search reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    /// Report a single solution of the minimal length.
    FirstShortest,
    /// Report every solution of the minimal length within the bound.
    AllShortest,
}

/// Search parameters.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub mode: SearchMode,
    /// Explicit move bound. `None` deepens the bound one move at a time
    /// up to [`UNBOUNDED_MOVE_CEILING`].
    pub max_moves: Option<u32>,
    /// Skip branches where a robot immediately undoes its own last slide.
    /// No minimal solution contains such a pair, so the reported outcome
    /// is unchanged; the search just visits fewer states.
    pub prune_reversals: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            mode: SearchMode::FirstShortest,
            max_moves: None,
            prune_reversals: false,
        }
    }
}

/// One slide of a solution, with the state it produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub robot: char,
    pub dir: Direction,
    pub state: RobotState,
}

/// A goal-satisfying move sequence from the starting state. Empty when the
/// start already satisfies every goal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    pub steps: Vec<Step>,
}

impl Solution {
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// Counters filled in while searching.
#[derive(Debug, Clone, Default)]
pub struct SearchStats {
    /// Moves applied across the whole search, all deepening rounds included.
    pub states_expanded: u64,
    /// Completed solutions seen before minimal-length filtering.
    pub solutions_recorded: u64,
    /// Wall-clock time spent searching.
    pub elapsed: Duration,
}

/// What the search produced: the minimal-length solutions, empty when
/// nothing satisfies the goals within the bound, plus the run counters.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub solutions: Vec<Solution>,
    pub stats: SearchStats,
}

impl SearchOutcome {
    /// Length of the reported solutions, `None` when there are none.
    pub fn shortest_len(&self) -> Option<usize> {
        self.solutions.first().map(Solution::len)
    }
}

/// A move under consideration, identified by roster index.
#[derive(Debug, Clone, Copy)]
struct Move {
    robot: usize,
    dir: Direction,
}

/// Everything the recursion reads and writes, owned in one place so the
/// incumbent's data flow stays explicit.
struct SearchContext<'a> {
    board: &'a Board,
    root: &'a RobotState,
    mode: SearchMode,
    bound: u32,
    prune_reversals: bool,
    /// Shortest completed solution length so far.
    incumbent: u32,
    solutions: Vec<Solution>,
    states_expanded: u64,
    solutions_recorded: u64,
}

impl SearchContext<'_> {
    /// Records the current path as a completed solution and tightens the
    /// incumbent. `FirstShortest` keeps only the best path seen so far;
    /// `AllShortest` keeps everything and lets [`solve`] filter later.
    fn record(&mut self, path: &[Move], len: u32) {
        self.solutions_recorded += 1;
        let improved = len < self.incumbent;
        if improved {
            self.incumbent = len;
        }
        match self.mode {
            SearchMode::FirstShortest => {
                if improved {
                    let solution = self.materialize(path);
                    self.solutions.clear();
                    self.solutions.push(solution);
                }
            }
            SearchMode::AllShortest => {
                let solution = self.materialize(path);
                self.solutions.push(solution);
            }
        }
    }

    /// Rebuilds the path as a [`Solution`] by replaying it from the root.
    fn materialize(&self, path: &[Move]) -> Solution {
        let mut state = self.root.clone();
        let steps = path
            .iter()
            .map(|mv| {
                state = self.board.apply_move(&state, mv.robot, mv.dir);
                Step {
                    robot: self.board.label(mv.robot),
                    dir: mv.dir,
                    state: state.clone(),
                }
            })
            .collect();
        Solution { steps }
    }
}

/// Runs the search from the board's starting state. With an explicit bound
/// this is a single bounded walk; without one the bound is deepened one
/// move at a time, so the first round that finds anything holds exactly
/// the minimal-length solutions.
pub fn solve(board: &Board, config: &SearchConfig) -> SearchOutcome {
    let started = Instant::now();
    let root = board.start().clone();
    let mut stats = SearchStats::default();

    // A start that already satisfies every goal needs no moves at all.
    if board.is_satisfied(&root) {
        stats.elapsed = started.elapsed();
        return SearchOutcome {
            solutions: vec![Solution { steps: Vec::new() }],
            stats,
        };
    }

    let mut solutions = Vec::new();
    match config.max_moves {
        Some(bound) => {
            solutions = run_bounded(board, &root, config, bound, &mut stats);
        }
        None => {
            for bound in 1..=UNBOUNDED_MOVE_CEILING {
                solutions = run_bounded(board, &root, config, bound, &mut stats);
                if !solutions.is_empty() {
                    break;
                }
            }
        }
    }

    // Keep only the minimal length. Longer entries are completions that
    // were recorded before the incumbent tightened.
    if let Some(min) = solutions.iter().map(Solution::len).min() {
        solutions.retain(|solution| solution.len() == min);
        if config.mode == SearchMode::FirstShortest {
            solutions.truncate(1);
        }
    }

    stats.elapsed = started.elapsed();
    SearchOutcome { solutions, stats }
}

/// One exhaustive walk with a fixed bound.
fn run_bounded(
    board: &Board,
    root: &RobotState,
    config: &SearchConfig,
    bound: u32,
    stats: &mut SearchStats,
) -> Vec<Solution> {
    let mut ctx = SearchContext {
        board,
        root,
        mode: config.mode,
        bound,
        prune_reversals: config.prune_reversals,
        incumbent: NO_INCUMBENT,
        solutions: Vec::new(),
        states_expanded: 0,
        solutions_recorded: 0,
    };
    let mut state = root.clone();
    let mut path = Vec::new();
    explore(&mut ctx, &mut state, &mut path, 0);
    debug_assert_eq!(state, *root);

    stats.states_expanded += ctx.states_expanded;
    stats.solutions_recorded += ctx.solutions_recorded;
    ctx.solutions
}

/// Tries every robot and direction from the current state, recursing into
/// branches the bound and the incumbent still allow. `state` and `path`
/// are restored before returning.
fn explore(ctx: &mut SearchContext, state: &mut RobotState, path: &mut Vec<Move>, depth: u32) {
    let next_depth = depth + 1;
    for robot in 0..ctx.board.robot_count() {
        for dir in Direction::ALL {
            if next_depth > ctx.bound || next_depth > ctx.incumbent {
                continue;
            }
            if ctx.prune_reversals && reverses_last(path.last(), robot, dir) {
                continue;
            }
            if !ctx.board.is_valid_move(state, robot, dir) {
                continue;
            }

            let dest = ctx.board.slide_destination(state, robot, dir);
            let prev = state.move_robot(robot, dest);
            ctx.states_expanded += 1;
            path.push(Move { robot, dir });

            let solved = ctx.board.first_goal_satisfied(state) && ctx.board.is_satisfied(state);
            if solved {
                ctx.record(path, next_depth);
            } else {
                explore(ctx, state, path, next_depth);
            }

            path.pop();
            state.move_robot(robot, prev);

            if solved && ctx.mode == SearchMode::FirstShortest {
                // Sibling branches of this frame cannot be shorter, so hand
                // control back to the caller to try other prefixes.
                return;
            }
        }
    }
}

/// True if sliding `robot` in `dir` would immediately undo its own last
/// slide. Reversing always lands back on the departure cell, so such a
/// pair can be dropped from any solution, and no minimal one contains it.
fn reverses_last(last: Option<&Move>, robot: usize, dir: Direction) -> bool {
    last.map_or(false, |mv| mv.robot == robot && mv.dir == dir.opposite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{GoalTarget, Position};

    /// Open 5 x 5 board, one robot in the northwest corner, goal in the
    /// southeast corner. The shortest solutions are south-east and
    /// east-south, two moves each.
    fn corner_board() -> Board {
        let mut board = Board::new(5, 5).unwrap();
        board.place_robot('A', Position::new(1, 1)).unwrap();
        board
            .add_goal(GoalTarget::Robot('A'), Position::new(5, 5))
            .unwrap();
        board.validate().unwrap();
        board
    }

    /// 3 x 3 board where each robot has its own one-move goal, so the two
    /// moves can happen in either order.
    fn two_goal_board() -> Board {
        let mut board = Board::new(3, 3).unwrap();
        board.place_robot('A', Position::new(1, 1)).unwrap();
        board.place_robot('B', Position::new(3, 3)).unwrap();
        board
            .add_goal(GoalTarget::Robot('A'), Position::new(1, 3))
            .unwrap();
        board
            .add_goal(GoalTarget::Robot('B'), Position::new(3, 1))
            .unwrap();
        board.validate().unwrap();
        board
    }

    fn dirs(solution: &Solution) -> Vec<Direction> {
        solution.steps.iter().map(|step| step.dir).collect()
    }

    /// Replays a solution from the start and checks every step is a legal
    /// slide ending where the recorded state says it does.
    fn assert_replays(board: &Board, solution: &Solution) {
        let mut state = board.start().clone();
        for step in &solution.steps {
            let robot = board.robot_index(step.robot).unwrap();
            assert!(board.is_valid_move(&state, robot, step.dir));
            state = board.apply_move(&state, robot, step.dir);
            assert_eq!(state, step.state);
        }
        assert!(board.is_satisfied(&state));
    }

    #[test]
    fn test_first_shortest_finds_a_two_move_solution() {
        let board = corner_board();
        let outcome = solve(&board, &SearchConfig::default());

        assert_eq!(outcome.solutions.len(), 1);
        assert_eq!(outcome.shortest_len(), Some(2));
        assert_replays(&board, &outcome.solutions[0]);
        assert!(outcome.stats.states_expanded > 0);
        assert!(outcome.stats.solutions_recorded >= 1);
    }

    #[test]
    fn test_all_shortest_finds_both_orders() {
        let board = corner_board();
        let config = SearchConfig {
            mode: SearchMode::AllShortest,
            ..SearchConfig::default()
        };
        let outcome = solve(&board, &config);

        let sequences: Vec<Vec<Direction>> = outcome.solutions.iter().map(dirs).collect();
        assert_eq!(sequences.len(), 2);
        assert!(sequences.contains(&vec![Direction::South, Direction::East]));
        assert!(sequences.contains(&vec![Direction::East, Direction::South]));
        for solution in &outcome.solutions {
            assert_replays(&board, solution);
        }
    }

    #[test]
    fn test_loose_bound_still_reports_only_minimal_solutions() {
        let board = corner_board();
        let config = SearchConfig {
            mode: SearchMode::AllShortest,
            max_moves: Some(4),
            ..SearchConfig::default()
        };
        let outcome = solve(&board, &config);

        assert_eq!(outcome.solutions.len(), 2);
        assert!(outcome.solutions.iter().all(|solution| solution.len() == 2));
    }

    #[test]
    fn test_bound_below_shortest_finds_nothing() {
        let board = corner_board();
        let config = SearchConfig {
            max_moves: Some(1),
            ..SearchConfig::default()
        };
        let outcome = solve(&board, &config);

        assert!(outcome.solutions.is_empty());
        assert_eq!(outcome.shortest_len(), None);
        assert!(outcome.stats.states_expanded > 0);
    }

    #[test]
    fn test_wildcard_goal_solved_by_the_nearest_robot() {
        let mut board = Board::new(5, 5).unwrap();
        board.place_robot('A', Position::new(3, 1)).unwrap();
        board.place_robot('B', Position::new(5, 5)).unwrap();
        board.add_vertical_wall(3, 3.5).unwrap();
        board.add_goal(GoalTarget::Any, Position::new(3, 3)).unwrap();
        board.validate().unwrap();

        let outcome = solve(&board, &SearchConfig::default());
        assert_eq!(outcome.shortest_len(), Some(1));
        let step = &outcome.solutions[0].steps[0];
        assert_eq!(step.robot, 'A');
        assert_eq!(step.dir, Direction::East);
        assert_replays(&board, &outcome.solutions[0]);
    }

    #[test]
    fn test_solutions_ending_away_from_the_first_goal_are_found() {
        // Both orders work here, and in one of them the final slide lands
        // on the second goal while the first was satisfied a move earlier.
        let board = two_goal_board();
        let config = SearchConfig {
            mode: SearchMode::AllShortest,
            ..SearchConfig::default()
        };
        let outcome = solve(&board, &config);

        assert_eq!(outcome.shortest_len(), Some(2));
        assert_eq!(outcome.solutions.len(), 2);
        for solution in &outcome.solutions {
            assert_replays(&board, solution);
        }
    }

    #[test]
    fn test_already_satisfied_start_needs_no_moves() {
        let mut board = Board::new(3, 3).unwrap();
        board.place_robot('A', Position::new(2, 2)).unwrap();
        board
            .add_goal(GoalTarget::Robot('A'), Position::new(2, 2))
            .unwrap();
        board.validate().unwrap();

        for mode in [SearchMode::FirstShortest, SearchMode::AllShortest] {
            let config = SearchConfig {
                mode,
                ..SearchConfig::default()
            };
            let outcome = solve(&board, &config);
            assert_eq!(outcome.solutions.len(), 1);
            assert!(outcome.solutions[0].is_empty());
            assert_eq!(outcome.shortest_len(), Some(0));
        }
    }

    #[test]
    fn test_unsolvable_board_terminates_without_a_bound() {
        // Neither robot can move at all, so the goal is unreachable and
        // every deepening round exhausts instantly.
        let mut board = Board::new(1, 2).unwrap();
        board.place_robot('A', Position::new(1, 1)).unwrap();
        board.place_robot('B', Position::new(1, 2)).unwrap();
        board
            .add_goal(GoalTarget::Robot('A'), Position::new(1, 2))
            .unwrap();
        board.validate().unwrap();

        let outcome = solve(&board, &SearchConfig::default());
        assert!(outcome.solutions.is_empty());
        assert_eq!(outcome.stats.states_expanded, 0);
    }

    #[test]
    fn test_first_shortest_matches_the_common_minimal_length() {
        for board in [corner_board(), two_goal_board()] {
            let first = solve(&board, &SearchConfig::default());
            let all = solve(
                &board,
                &SearchConfig {
                    mode: SearchMode::AllShortest,
                    ..SearchConfig::default()
                },
            );

            let len = first.shortest_len().unwrap();
            assert!(all.solutions.iter().all(|solution| solution.len() == len));
        }
    }

    #[test]
    fn test_reversal_pruning_preserves_the_outcome() {
        for board in [corner_board(), two_goal_board()] {
            let plain = SearchConfig {
                mode: SearchMode::AllShortest,
                max_moves: Some(3),
                prune_reversals: false,
            };
            let pruned = SearchConfig {
                prune_reversals: true,
                ..plain.clone()
            };

            let full = solve(&board, &plain);
            let trimmed = solve(&board, &pruned);

            let full_seqs: Vec<Vec<Direction>> = full.solutions.iter().map(dirs).collect();
            let trimmed_seqs: Vec<Vec<Direction>> = trimmed.solutions.iter().map(dirs).collect();
            assert_eq!(full_seqs, trimmed_seqs);
            assert!(trimmed.stats.states_expanded < full.stats.states_expanded);
        }
    }
}

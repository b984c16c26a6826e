//! Board representation: grid geometry, walls, robots and goals.
//!
//! The static puzzle definition lives in [`Board`] and never changes once
//! loaded. The part that changes during search, the robot positions, lives
//! in [`RobotState`] so branching copies a handful of coordinates instead
//! of the whole board.

use serde::Serialize;
use smallvec::SmallVec;

use crate::PuzzleError;

/// Cell coordinates, 1-indexed. Row 1 is the north edge, column 1 the west.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// The adjacent cell one step in `dir`. May leave the grid; callers
    /// consult walls before stepping.
    pub fn step(self, dir: Direction) -> Position {
        let (dr, dc) = dir.delta();
        Position::new(self.row + dr, self.col + dc)
    }
}

/// Slide direction. `ALL` fixes the order branches are enumerated in,
/// which decides which of several equally short solutions is found first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    /// Every direction, in enumeration order.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    /// (row, col) offset of one step in this direction.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (-1, 0),
            Direction::South => (1, 0),
            Direction::East => (0, 1),
            Direction::West => (0, -1),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }

    fn mask(self) -> u8 {
        1 << (self as u8)
    }
}

/// Wall flags for a single cell, one bit per side. Walls are stored
/// mirrored: a wall between two cells is flagged on both.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CellWalls(u8);

impl CellWalls {
    /// True if the side facing `dir` is walled.
    pub fn has(self, dir: Direction) -> bool {
        self.0 & dir.mask() != 0
    }

    fn set(&mut self, dir: Direction) {
        self.0 |= dir.mask();
    }
}

/// Which robot a goal cell is for. `Any` is the wildcard written `?` in
/// puzzle files: any robot on the cell satisfies it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoalTarget {
    Robot(char),
    Any,
}

/// A target cell that must be occupied for the puzzle to be solved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Goal {
    pub target: GoalTarget,
    pub pos: Position,
}

/// Robot positions, indexed like the board's roster. This is the only part
/// of a configuration that changes as robots move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RobotState {
    positions: SmallVec<[Position; 8]>,
}

impl RobotState {
    /// Current position of the robot at roster index `robot`.
    pub fn position(&self, robot: usize) -> Position {
        self.positions[robot]
    }

    /// The roster index of the robot occupying `pos`, if any.
    pub fn robot_at(&self, pos: Position) -> Option<usize> {
        self.positions.iter().position(|&p| p == pos)
    }

    /// Moves one robot and returns the position it previously held, so the
    /// caller can undo the move when backtracking.
    pub fn move_robot(&mut self, robot: usize, to: Position) -> Position {
        std::mem::replace(&mut self.positions[robot], to)
    }
}

/// The static puzzle definition: grid dimensions, wall map, robot roster
/// with starting positions, and goals. Built once by the loader and shared
/// immutably by the search.
#[derive(Debug, Clone)]
pub struct Board {
    rows: i32,
    cols: i32,
    walls: Vec<CellWalls>,
    labels: SmallVec<[char; 8]>,
    goals: Vec<Goal>,
    start: RobotState,
}

impl Board {
    /// Creates an empty board of the given size. The outward-facing sides
    /// of every perimeter cell are walled implicitly, so robots can never
    /// slide off the grid.
    pub fn new(rows: i32, cols: i32) -> Result<Board, PuzzleError> {
        if rows < 1 || cols < 1 {
            return Err(PuzzleError::Malformed(format!(
                "board dimensions must be positive, got {rows} x {cols}"
            )));
        }
        let cells = rows as usize * cols as usize;
        let mut board = Board {
            rows,
            cols,
            walls: vec![CellWalls::default(); cells],
            labels: SmallVec::new(),
            goals: Vec::new(),
            start: RobotState {
                positions: SmallVec::new(),
            },
        };
        for col in 1..=cols {
            board.wall_mut(Position::new(1, col)).set(Direction::North);
            board.wall_mut(Position::new(rows, col)).set(Direction::South);
        }
        for row in 1..=rows {
            board.wall_mut(Position::new(row, 1)).set(Direction::West);
            board.wall_mut(Position::new(row, cols)).set(Direction::East);
        }
        Ok(board)
    }

    pub fn rows(&self) -> i32 {
        self.rows
    }

    pub fn cols(&self) -> i32 {
        self.cols
    }

    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.row >= 1 && pos.row <= self.rows && pos.col >= 1 && pos.col <= self.cols
    }

    /// Wall flags of the cell at `pos`, which must be in bounds.
    pub fn walls_at(&self, pos: Position) -> CellWalls {
        self.walls[self.index(pos)]
    }

    /// Number of robots on the board.
    pub fn robot_count(&self) -> usize {
        self.labels.len()
    }

    /// Letter of the robot at roster index `robot`.
    pub fn label(&self, robot: usize) -> char {
        self.labels[robot]
    }

    /// Roster index of the robot with the given letter.
    pub fn robot_index(&self, label: char) -> Option<usize> {
        self.labels.iter().position(|&l| l == label)
    }

    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    /// The first goal declared for `pos`, if any. Used when rendering.
    pub fn goal_at(&self, pos: Position) -> Option<GoalTarget> {
        self.goals
            .iter()
            .find(|goal| goal.pos == pos)
            .map(|goal| goal.target)
    }

    /// Starting robot positions.
    pub fn start(&self) -> &RobotState {
        &self.start
    }

    /// Places a robot. Labels must be unique uppercase letters and no two
    /// robots may start on the same cell.
    pub fn place_robot(&mut self, label: char, pos: Position) -> Result<(), PuzzleError> {
        if !label.is_ascii_uppercase() {
            return Err(PuzzleError::Malformed(format!(
                "robot label must be an uppercase letter, got {label:?}"
            )));
        }
        if !self.in_bounds(pos) {
            return Err(PuzzleError::Malformed(format!(
                "robot {label} placed outside the board at ({}, {})",
                pos.row, pos.col
            )));
        }
        if self.robot_index(label).is_some() {
            return Err(PuzzleError::Malformed(format!(
                "robot {label} is placed twice"
            )));
        }
        if self.start.robot_at(pos).is_some() {
            return Err(PuzzleError::Malformed(format!(
                "two robots start on cell ({}, {})",
                pos.row, pos.col
            )));
        }
        self.labels.push(label);
        self.start.positions.push(pos);
        Ok(())
    }

    /// Adds a wall between the two horizontally adjacent cells either side
    /// of `boundary` on `row`. A boundary of 2.5 separates columns 2 and 3.
    pub fn add_vertical_wall(&mut self, row: i32, boundary: f64) -> Result<(), PuzzleError> {
        let col = lower_cell(boundary)?;
        let west = Position::new(row, col);
        let east = Position::new(row, col + 1);
        if !self.in_bounds(west) || !self.in_bounds(east) {
            return Err(PuzzleError::Malformed(format!(
                "vertical wall at row {row}, boundary {boundary} is outside the board"
            )));
        }
        self.wall_mut(west).set(Direction::East);
        self.wall_mut(east).set(Direction::West);
        Ok(())
    }

    /// Adds a wall between the two vertically adjacent cells either side
    /// of `boundary` on `col`. A boundary of 2.5 separates rows 2 and 3.
    pub fn add_horizontal_wall(&mut self, boundary: f64, col: i32) -> Result<(), PuzzleError> {
        let row = lower_cell(boundary)?;
        let north = Position::new(row, col);
        let south = Position::new(row + 1, col);
        if !self.in_bounds(north) || !self.in_bounds(south) {
            return Err(PuzzleError::Malformed(format!(
                "horizontal wall at boundary {boundary}, column {col} is outside the board"
            )));
        }
        self.wall_mut(north).set(Direction::South);
        self.wall_mut(south).set(Direction::North);
        Ok(())
    }

    /// Adds a goal cell. Goals may share cells and may target robots that
    /// are declared later in the file; [`Board::validate`] checks them
    /// against the final roster.
    pub fn add_goal(&mut self, target: GoalTarget, pos: Position) -> Result<(), PuzzleError> {
        if let GoalTarget::Robot(label) = target {
            if !label.is_ascii_uppercase() {
                return Err(PuzzleError::Malformed(format!(
                    "goal robot must be an uppercase letter or '?', got {label:?}"
                )));
            }
        }
        if !self.in_bounds(pos) {
            return Err(PuzzleError::Malformed(format!(
                "goal placed outside the board at ({}, {})",
                pos.row, pos.col
            )));
        }
        self.goals.push(Goal { target, pos });
        Ok(())
    }

    /// Cross-record checks run once the whole file has been read: every
    /// concrete goal must name a robot that is actually on the board.
    pub fn validate(&self) -> Result<(), PuzzleError> {
        for goal in &self.goals {
            if let GoalTarget::Robot(label) = goal.target {
                if self.robot_index(label).is_none() {
                    return Err(PuzzleError::Malformed(format!(
                        "goal names robot {label}, but no such robot is on the board"
                    )));
                }
            }
        }
        Ok(())
    }

    fn index(&self, pos: Position) -> usize {
        debug_assert!(self.in_bounds(pos));
        (pos.row - 1) as usize * self.cols as usize + (pos.col - 1) as usize
    }

    fn wall_mut(&mut self, pos: Position) -> &mut CellWalls {
        let index = self.index(pos);
        &mut self.walls[index]
    }
}

/// The cell on the lower-numbered side of a fractional wall boundary.
fn lower_cell(boundary: f64) -> Result<i32, PuzzleError> {
    if !boundary.is_finite() {
        return Err(PuzzleError::Malformed(format!(
            "wall boundary must be a finite number, got {boundary}"
        )));
    }
    Ok(boundary.floor() as i32)
}

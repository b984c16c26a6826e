//! Text rendering: board pictures, move lines and reachability grids.

use std::fmt;

use crate::board::{Board, Direction, GoalTarget, Position, RobotState};
use crate::reach::ReachabilityMap;
use crate::solver::Step;

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::North => "north",
            Direction::South => "south",
            Direction::East => "east",
            Direction::West => "west",
        };
        f.write_str(name)
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "robot {} moves {}", self.robot, self.dir)
    }
}

/// A board paired with the robot state to draw on it. Walls come out as
/// `---` and `|` segments, robots as their letters, goal cells as the
/// lowercased robot letter or `?` for wildcards.
pub struct BoardDisplay<'a> {
    board: &'a Board,
    state: &'a RobotState,
}

impl Board {
    /// Pairs this board with a robot state for printing.
    pub fn display<'a>(&'a self, state: &'a RobotState) -> BoardDisplay<'a> {
        BoardDisplay { board: self, state }
    }
}

impl BoardDisplay<'_> {
    fn cell_char(&self, pos: Position) -> char {
        if let Some(robot) = self.state.robot_at(pos) {
            return self.board.label(robot);
        }
        match self.board.goal_at(pos) {
            Some(GoalTarget::Robot(label)) => label.to_ascii_lowercase(),
            Some(GoalTarget::Any) => '?',
            None => ' ',
        }
    }
}

impl fmt::Display for BoardDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let board = self.board;
        for row in 1..=board.rows() {
            for col in 1..=board.cols() {
                let walled = board.walls_at(Position::new(row, col)).has(Direction::North);
                write!(f, "+{}", if walled { "---" } else { "   " })?;
            }
            writeln!(f, "+")?;
            for col in 1..=board.cols() {
                let pos = Position::new(row, col);
                let sep = if board.walls_at(pos).has(Direction::West) {
                    '|'
                } else {
                    ' '
                };
                write!(f, "{sep} {} ", self.cell_char(pos))?;
            }
            writeln!(f, "|")?;
        }
        for _ in 1..=board.cols() {
            f.write_str("+---")?;
        }
        writeln!(f, "+")
    }
}

impl fmt::Display for ReachabilityMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.iter_rows() {
            for cell in row {
                match cell {
                    Some(moves) => write!(f, " {moves} ")?,
                    None => f.write_str(" . ")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// The no-solution report. The bounded wording names the bound that was
/// exhausted; the unbounded one makes no such claim.
pub fn no_solution_line(max_moves: Option<u32>) -> String {
    match max_moves {
        Some(bound) => format!("no solutions with {bound} or fewer moves"),
        None => "no solutions".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reach::{map_reachability, ReachConfig};

    fn walled_board() -> Board {
        let mut board = Board::new(2, 2).unwrap();
        board.place_robot('A', Position::new(1, 1)).unwrap();
        board.add_vertical_wall(1, 1.5).unwrap();
        board
            .add_goal(GoalTarget::Robot('A'), Position::new(2, 2))
            .unwrap();
        board.validate().unwrap();
        board
    }

    #[test]
    fn test_direction_names() {
        assert_eq!(Direction::North.to_string(), "north");
        assert_eq!(Direction::South.to_string(), "south");
        assert_eq!(Direction::East.to_string(), "east");
        assert_eq!(Direction::West.to_string(), "west");
    }

    #[test]
    fn test_board_rendering() {
        let board = walled_board();
        let rendered = board.display(board.start()).to_string();
        let expected = "\
+---+---+
| A |   |
+   +   +
|     a |
+---+---+
";
        assert_eq!(rendered, expected);
    }

    #[test]
    fn test_robot_covers_the_goal_marker() {
        let board = walled_board();
        let mut state = board.start().clone();
        state.move_robot(0, Position::new(2, 2));
        let rendered = board.display(&state).to_string();
        assert!(rendered.contains(" A |"));
        assert!(!rendered.contains('a'));
    }

    #[test]
    fn test_wildcard_goal_renders_question_mark() {
        let mut board = Board::new(2, 2).unwrap();
        board.place_robot('B', Position::new(1, 1)).unwrap();
        board.add_goal(GoalTarget::Any, Position::new(2, 1)).unwrap();
        board.validate().unwrap();
        let rendered = board.display(board.start()).to_string();
        assert!(rendered.contains('?'));
    }

    #[test]
    fn test_step_line() {
        let board = walled_board();
        let state = board.start().clone();
        let step = Step {
            robot: 'A',
            dir: Direction::South,
            state,
        };
        assert_eq!(step.to_string(), "robot A moves south");
    }

    #[test]
    fn test_reachability_grid_rendering() {
        let mut board = Board::new(3, 3).unwrap();
        board.place_robot('A', Position::new(1, 1)).unwrap();
        board.add_vertical_wall(1, 1.5).unwrap();
        let map = map_reachability(
            &board,
            0,
            &ReachConfig {
                max_moves: Some(1),
            },
        );
        // Every cell is three characters wide, so rows end with a space.
        let expected = " 0  .  . \n .  .  . \n 1  .  . \n";
        assert_eq!(map.to_string(), expected);
    }

    #[test]
    fn test_no_solution_lines() {
        assert_eq!(no_solution_line(Some(1)), "no solutions with 1 or fewer moves");
        assert_eq!(no_solution_line(Some(12)), "no solutions with 12 or fewer moves");
        assert_eq!(no_solution_line(None), "no solutions");
    }
}

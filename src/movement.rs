//! Slide physics: move validity, slide destinations and move application.
//!
//! A robot committed to a direction keeps moving cell by cell until the
//! next cell is blocked by a wall or occupied by another robot. A move
//! that would slide zero cells is not a move at all.

use crate::board::{Board, Direction, Position, RobotState};

impl Board {
    /// True if `robot` can advance at least one cell in `dir`: no wall on
    /// that side and the adjacent cell unoccupied.
    pub fn is_valid_move(&self, state: &RobotState, robot: usize, dir: Direction) -> bool {
        let from = state.position(robot);
        !self.walls_at(from).has(dir) && state.robot_at(from.step(dir)).is_none()
    }

    /// The cell `robot` comes to rest on when it slides in `dir`: the last
    /// free cell before a wall or another robot. Callers must only pass
    /// moves that [`Board::is_valid_move`] accepts.
    pub fn slide_destination(&self, state: &RobotState, robot: usize, dir: Direction) -> Position {
        debug_assert!(self.is_valid_move(state, robot, dir));
        let mut pos = state.position(robot);
        loop {
            // The perimeter is fully walled, so this terminates on-grid.
            if self.walls_at(pos).has(dir) {
                break;
            }
            let next = pos.step(dir);
            if state.robot_at(next).is_some() {
                break;
            }
            pos = next;
        }
        pos
    }

    /// Applies one slide and returns the resulting state, leaving the
    /// input untouched.
    pub fn apply_move(&self, state: &RobotState, robot: usize, dir: Direction) -> RobotState {
        let dest = self.slide_destination(state, robot, dir);
        let mut next = state.clone();
        next.move_robot(robot, dest);
        next
    }
}

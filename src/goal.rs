//! Goal satisfaction checks over a robot state.

use crate::board::{Board, GoalTarget, RobotState};

impl Board {
    /// Authoritative check: every concrete goal has its named robot on its
    /// cell and every wildcard goal is occupied by some robot, all at the
    /// same time. A board without goals is trivially satisfied.
    pub fn is_satisfied(&self, state: &RobotState) -> bool {
        self.goals().iter().all(|goal| match goal.target {
            GoalTarget::Robot(label) => match self.robot_index(label) {
                Some(robot) => state.position(robot) == goal.pos,
                None => false,
            },
            GoalTarget::Any => state.robot_at(goal.pos).is_some(),
        })
    }

    /// Cheap screen on the first declared goal only. Never false for a
    /// state [`Board::is_satisfied`] accepts, so the search can skip the
    /// full scan whenever this one fails.
    pub fn first_goal_satisfied(&self, state: &RobotState) -> bool {
        match self.goals().first() {
            None => true,
            Some(goal) => match goal.target {
                GoalTarget::Robot(label) => match self.robot_index(label) {
                    Some(robot) => state.position(robot) == goal.pos,
                    None => false,
                },
                GoalTarget::Any => state.robot_at(goal.pos).is_some(),
            },
        }
    }
}

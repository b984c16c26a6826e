//! Puzzle-file loading.
//!
//! The format is a whitespace-delimited token stream: the first two tokens
//! are the grid dimensions, and everything after is keyword-led records
//! (`robot`, `vertical_wall`, `horizontal_wall`, `goal`) in any order.
//! Newlines carry no meaning beyond separating tokens.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use crate::board::{Board, GoalTarget, Position};
use crate::PuzzleError;

/// Reads and parses a puzzle file into a validated board.
pub fn load(path: &Path) -> Result<Board, PuzzleError> {
    let text = fs::read_to_string(path).map_err(|source| PuzzleError::FileOpen {
        path: path.to_path_buf(),
        source,
    })?;
    text.parse()
}

impl FromStr for Board {
    type Err = PuzzleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut tokens = s.split_whitespace();
        let rows = next_number(&mut tokens, "row count")?;
        let cols = next_number(&mut tokens, "column count")?;
        let mut board = Board::new(rows, cols)?;

        while let Some(keyword) = tokens.next() {
            match keyword {
                "robot" => {
                    let label = next_letter(&mut tokens, "robot letter")?;
                    let pos = next_position(&mut tokens)?;
                    board.place_robot(label, pos)?;
                }
                "vertical_wall" => {
                    let row = next_number(&mut tokens, "wall row")?;
                    let boundary = next_boundary(&mut tokens)?;
                    board.add_vertical_wall(row, boundary)?;
                }
                "horizontal_wall" => {
                    let boundary = next_boundary(&mut tokens)?;
                    let col = next_number(&mut tokens, "wall column")?;
                    board.add_horizontal_wall(boundary, col)?;
                }
                "goal" => {
                    let target = next_goal_target(&mut tokens)?;
                    let pos = next_position(&mut tokens)?;
                    board.add_goal(target, pos)?;
                }
                other => return Err(PuzzleError::UnknownKeyword(other.to_string())),
            }
        }

        board.validate()?;
        Ok(board)
    }
}

type Tokens<'a> = std::str::SplitWhitespace<'a>;

fn next_token<'a>(tokens: &mut Tokens<'a>, what: &str) -> Result<&'a str, PuzzleError> {
    tokens.next().ok_or_else(|| {
        PuzzleError::Malformed(format!("unexpected end of file, expected {what}"))
    })
}

fn next_number(tokens: &mut Tokens<'_>, what: &str) -> Result<i32, PuzzleError> {
    let token = next_token(tokens, what)?;
    token
        .parse()
        .map_err(|_| PuzzleError::Malformed(format!("expected {what}, got {token:?}")))
}

fn next_boundary(tokens: &mut Tokens<'_>) -> Result<f64, PuzzleError> {
    let token = next_token(tokens, "wall boundary")?;
    token
        .parse()
        .map_err(|_| PuzzleError::Malformed(format!("expected wall boundary, got {token:?}")))
}

fn next_letter(tokens: &mut Tokens<'_>, what: &str) -> Result<char, PuzzleError> {
    let token = next_token(tokens, what)?;
    let mut chars = token.chars();
    match (chars.next(), chars.next()) {
        (Some(letter), None) => Ok(letter),
        _ => Err(PuzzleError::Malformed(format!(
            "expected a single {what}, got {token:?}"
        ))),
    }
}

fn next_position(tokens: &mut Tokens<'_>) -> Result<Position, PuzzleError> {
    let row = next_number(tokens, "row")?;
    let col = next_number(tokens, "column")?;
    Ok(Position::new(row, col))
}

fn next_goal_target(tokens: &mut Tokens<'_>) -> Result<GoalTarget, PuzzleError> {
    let token = next_token(tokens, "goal robot")?;
    if token == "?" {
        return Ok(GoalTarget::Any);
    }
    let mut chars = token.chars();
    match (chars.next(), chars.next()) {
        (Some(letter), None) => Ok(GoalTarget::Robot(letter)),
        _ => Err(PuzzleError::Malformed(format!(
            "expected a robot letter or '?', got {token:?}"
        ))),
    }
}

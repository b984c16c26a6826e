//! CLI entry point for the ricochet solver.
//!
//! Usage:
//!   ricochet-solver <puzzle.txt> [options]
//!
//! Options:
//!   --max-moves <n>      Search no deeper than n moves (default: deepen up to 20)
//!   --all-solutions      Report every minimal-length solution
//!   --visualize <robot>  Print a reachability grid for a robot instead of solving
//!   --json               Emit machine-readable JSON instead of board pictures

use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use serde::Serialize;

use ricochet_solver::{
    load, map_reachability, no_solution_line, solve, Board, Direction, PuzzleError, ReachConfig,
    ReachabilityMap, SearchConfig, SearchMode, SearchOutcome, DEFAULT_REACH_CEILING,
};

#[derive(Parser)]
#[command(name = "ricochet-solver")]
#[command(about = "Exhaustive solver for Ricochet Robots sliding puzzles")]
#[command(version)]
struct Cli {
    /// Path to the puzzle description file
    #[arg(value_name = "PUZZLE")]
    puzzle: PathBuf,

    /// Highest number of moves to consider
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    max_moves: Option<u32>,

    /// Report every minimal-length solution instead of a single one
    #[arg(long)]
    all_solutions: bool,

    /// Print which cells this robot can reach instead of solving
    #[arg(long, value_name = "ROBOT", value_parser = parse_robot_letter)]
    visualize: Option<char>,

    /// Emit machine-readable JSON instead of board pictures
    #[arg(long)]
    json: bool,
}

fn parse_robot_letter(arg: &str) -> Result<char, String> {
    let mut chars = arg.chars();
    match (chars.next(), chars.next()) {
        (Some(letter), None) if letter.is_ascii_uppercase() => Ok(letter),
        _ => Err(format!("expected a single uppercase letter, got {arg:?}")),
    }
}

/// Machine-readable solve report.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SolveOutput {
    solutions: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    min_moves: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_moves: Option<u32>,
    moves: Vec<Vec<MoveOutput>>,
    states_expanded: u64,
    time_elapsed_ms: u64,
}

#[derive(Debug, Serialize)]
struct MoveOutput {
    robot: char,
    direction: Direction,
}

/// Machine-readable reachability report.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ReachOutput {
    robot: char,
    max_moves: u32,
    grid: Vec<Vec<Option<u32>>>,
}

fn main() {
    let cli = Cli::parse();

    let board = match load(&cli.puzzle) {
        Ok(board) => board,
        Err(err) => {
            report_error(&err);
            std::process::exit(1);
        }
    };

    // Visualization replaces solving when both are requested.
    if let Some(letter) = cli.visualize {
        run_visualize(&board, letter, &cli);
    } else {
        run_solve(&board, &cli);
    }
}

fn report_error(err: &PuzzleError) {
    eprintln!("Error: {err}");
    let mut source = err.source();
    while let Some(cause) = source {
        eprintln!("  caused by: {cause}");
        source = cause.source();
    }
}

fn run_visualize(board: &Board, letter: char, cli: &Cli) {
    let robot = match board.robot_index(letter) {
        Some(robot) => robot,
        None => {
            eprintln!("Error: no robot {letter} on the board");
            std::process::exit(1);
        }
    };
    let config = ReachConfig {
        max_moves: cli.max_moves,
    };
    let map = map_reachability(board, robot, &config);

    if cli.json {
        let output = format_reach(letter, &config, &map);
        println!("{}", serde_json::to_string_pretty(&output).unwrap());
    } else {
        println!("Reachable by robot {letter}:");
        print!("{map}");
    }
}

fn run_solve(board: &Board, cli: &Cli) {
    let config = SearchConfig {
        mode: if cli.all_solutions {
            SearchMode::AllShortest
        } else {
            SearchMode::FirstShortest
        },
        max_moves: cli.max_moves,
        ..SearchConfig::default()
    };
    let outcome = solve(board, &config);

    if cli.json {
        let output = format_solve(&outcome, &config);
        println!("{}", serde_json::to_string_pretty(&output).unwrap());
        return;
    }

    print!("{}", board.display(board.start()));

    if outcome.solutions.is_empty() {
        println!("{}", no_solution_line(config.max_moves));
        return;
    }

    if cli.all_solutions {
        let len = outcome.shortest_len().unwrap_or(0);
        println!("{} different {} move solutions:", outcome.solutions.len(), len);
        println!();
        for solution in &outcome.solutions {
            for step in &solution.steps {
                println!("{step}");
            }
            println!("All goals are satisfied after {len} moves");
        }
    } else {
        let solution = &outcome.solutions[0];
        for step in &solution.steps {
            println!("{step}");
            print!("{}", board.display(&step.state));
        }
        println!("All goals are satisfied after {} moves", solution.len());
    }
}

fn format_solve(outcome: &SearchOutcome, config: &SearchConfig) -> SolveOutput {
    SolveOutput {
        solutions: outcome.solutions.len(),
        min_moves: outcome.shortest_len(),
        max_moves: config.max_moves,
        moves: outcome
            .solutions
            .iter()
            .map(|solution| {
                solution
                    .steps
                    .iter()
                    .map(|step| MoveOutput {
                        robot: step.robot,
                        direction: step.dir,
                    })
                    .collect()
            })
            .collect(),
        states_expanded: outcome.stats.states_expanded,
        time_elapsed_ms: outcome.stats.elapsed.as_millis() as u64,
    }
}

fn format_reach(letter: char, config: &ReachConfig, map: &ReachabilityMap) -> ReachOutput {
    ReachOutput {
        robot: letter,
        max_moves: config.max_moves.unwrap_or(DEFAULT_REACH_CEILING),
        grid: map.iter_rows().map(|row| row.to_vec()).collect(),
    }
}

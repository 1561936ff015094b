//! Tube sorting puzzle solver.
//!
//! This crate provides a bounded depth-first solver for "ball sort"
//! puzzles: tubes of colored tokens that must be poured around until
//! every tube is empty or full of a single color.

pub mod executor;
pub mod io;
pub mod moves;
pub mod parser;
pub mod puzzle;
pub mod solver;
pub mod validator;

use thiserror::Error;

// Re-export main types
pub use executor::{replay, verify_solution, ReplayError};
pub use io::{load_puzzle, parse_puzzle, read_puzzle, InputFormat, LoadError, LoadOptions, PuzzleFile};
pub use moves::candidate_destinations;
pub use parser::{parse_recognized_text, ParseError, ParserConfig};
pub use puzzle::{Color, Move, Puzzle, PuzzleError, Solution, Tube};
pub use solver::{search, SolverConfig, SolverResult, DEFAULT_CEILING};
pub use validator::{validate, validation_report, ColorMismatch, ValidationReport};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolveError {
    #[error("puzzle is inconsistent: {0}")]
    Invalid(ValidationReport),
}

/// Validate the puzzle, then search it.
///
/// An inconsistent puzzle is rejected without searching. Finding no
/// solution is not an error: the result's `solution` is `None`.
pub fn solve_puzzle(puzzle: &Puzzle, config: &SolverConfig) -> Result<SolverResult, SolveError> {
    let report = validation_report(puzzle);
    if !report.is_valid() {
        return Err(SolveError::Invalid(report));
    }
    Ok(search(puzzle, config))
}

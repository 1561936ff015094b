//! Pour execution and solution replay.
//!
//! `pour` is the state transition used by the search. `replay` lets a
//! consumer of a solution re-apply it move by move, checking each pour
//! against the physical rules of the puzzle.

use thiserror::Error;

use crate::moves::can_pour;
use crate::puzzle::{Move, Puzzle, Solution};

/// Why a move could not be replayed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReplayError {
    #[error("step {step} ({mv}): tube index out of range")]
    TubeOutOfRange { step: usize, mv: Move },
    #[error("step {step} ({mv}): source and destination are the same tube")]
    SameTube { step: usize, mv: Move },
    #[error("step {step} ({mv}): source tube is empty")]
    EmptySource { step: usize, mv: Move },
    #[error("step {step} ({mv}): destination is full or shows a different color")]
    Blocked { step: usize, mv: Move },
}

/// Pour the top run of the source tube onto the destination tube.
///
/// Tokens move one at a time while the source top still shows the color
/// it started with. Returns the number of tokens moved. Legality is the
/// caller's responsibility.
pub(crate) fn pour(puzzle: &mut Puzzle, mv: Move) -> usize {
    let tubes = puzzle.tubes_mut();
    let Some(color) = tubes[mv.source].top().cloned() else {
        return 0;
    };

    let mut moved = 0;
    while let Some(token) = tubes[mv.source].pop_if(&color) {
        tubes[mv.destination].push(token);
        moved += 1;
    }
    moved
}

/// Apply one move after checking it is a legal pour
pub fn apply_move(puzzle: &mut Puzzle, mv: Move, step: usize) -> Result<usize, ReplayError> {
    let (Some(source), Some(destination)) = (puzzle.tube(mv.source), puzzle.tube(mv.destination))
    else {
        return Err(ReplayError::TubeOutOfRange { step, mv });
    };

    if mv.source == mv.destination {
        return Err(ReplayError::SameTube { step, mv });
    }
    if source.is_empty() {
        return Err(ReplayError::EmptySource { step, mv });
    }
    if !can_pour(source, destination, puzzle.capacity()) {
        return Err(ReplayError::Blocked { step, mv });
    }

    Ok(pour(puzzle, mv))
}

/// Re-apply a solution to a copy of the puzzle, returning the final state
pub fn replay(puzzle: &Puzzle, solution: &Solution) -> Result<Puzzle, ReplayError> {
    let mut state = puzzle.clone();
    for (step, mv) in solution.into_iter().enumerate() {
        apply_move(&mut state, *mv, step + 1)?;
    }
    Ok(state)
}

/// Simple verification: does the solution sort the puzzle?
pub fn verify_solution(puzzle: &Puzzle, solution: &Solution) -> bool {
    replay(puzzle, solution).is_ok_and(|state| state.is_resolved())
}

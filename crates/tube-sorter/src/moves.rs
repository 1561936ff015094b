//! Move generation and pruning rules for the search.
//!
//! For a source tube, these rules decide which other tubes its top run
//! may be poured into. Destinations are always produced in ascending
//! index order so the search is reproducible.

use smallvec::SmallVec;

use crate::puzzle::{Puzzle, Tube};

/// Destination indices for one source tube
pub type Destinations = SmallVec<[usize; 8]>;

/// Check if the whole top run of `source` can be poured onto `destination`.
///
/// This is the physical rule of the puzzle: the source must hold something,
/// the destination must be empty or show the same top color, and the
/// destination must have room for the entire run.
pub fn can_pour(source: &Tube, destination: &Tube, capacity: usize) -> bool {
    let Some(color) = source.top() else {
        return false;
    };

    if destination.len() + source.run_length() > capacity {
        return false;
    }

    destination.top().map_or(true, |top| top == color)
}

/// Get the tubes the top run of `source` may be poured into
pub fn candidate_destinations(puzzle: &Puzzle, source: usize) -> Destinations {
    let mut destinations = Destinations::new();

    let Some(origin) = puzzle.tube(source) else {
        return destinations;
    };
    // Nothing to move
    let Some(origin_color) = origin.top() else {
        return destinations;
    };
    let quantity = origin.run_length();

    for (index, tube) in puzzle.tubes().iter().enumerate() {
        if index == source {
            continue;
        }

        // Rule 1: an empty tube takes anything, except a source that is
        // already one color end to end (pouring it would only relocate it)
        if tube.is_empty() {
            if origin.is_uniform() {
                continue;
            }
            destinations.push(index);
            continue;
        }

        // Rule 2: the whole run must fit
        if tube.len() + quantity > puzzle.capacity() {
            continue;
        }

        // Rule 3: the run can only land on its own color
        if tube.top() == Some(origin_color) {
            destinations.push(index);
        }
    }

    destinations
}

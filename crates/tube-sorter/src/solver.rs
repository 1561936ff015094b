//! Bounded depth-first backtracking solver.
//!
//! The solver tries pours in ascending (source, destination) order and
//! returns the first solution it reaches, not the shortest one. Each
//! attempted move works on its own copy of the puzzle, so abandoned
//! branches never leak state into their siblings.
//!
//! The search keeps its frames on an explicit stack instead of recursing,
//! which visits states in exactly the order a recursive walk would.

use std::time::Instant;

use crate::executor::pour;
use crate::moves::{candidate_destinations, Destinations};
use crate::puzzle::{Move, Puzzle, Solution};

/// Default limit on the number of moves a search path may record
pub const DEFAULT_CEILING: usize = 100;

/// Configuration for the solver
#[derive(Debug, Clone)]
pub struct SolverConfig {
    /// Move budget. A path stops being extended once it holds more than
    /// `ceiling` moves, so the longest solution reported is `ceiling + 1`.
    pub ceiling: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            ceiling: DEFAULT_CEILING,
        }
    }
}

/// Result of the solver search
#[derive(Debug, Clone)]
pub struct SolverResult {
    /// The first solution found, if any
    pub solution: Option<Solution>,
    /// Number of search frames entered
    pub states_explored: usize,
    /// Number of moves whose follow-up search was cut by the ceiling
    pub ceiling_hits: usize,
    /// Time elapsed in milliseconds
    pub time_elapsed_ms: u64,
}

impl SolverResult {
    pub fn solved(&self) -> bool {
        self.solution.is_some()
    }
}

/// A frame in the search: one puzzle state and the moves still to try from it
#[derive(Debug, Clone)]
struct SearchFrame {
    puzzle: Puzzle,
    /// Moves this frame may still hand down to its children
    remaining: usize,
    source: usize,
    next_source: usize,
    destinations: Destinations,
    cursor: usize,
}

impl SearchFrame {
    fn new(puzzle: Puzzle, remaining: usize) -> Self {
        Self {
            puzzle,
            remaining,
            source: 0,
            next_source: 0,
            destinations: Destinations::new(),
            cursor: 0,
        }
    }

    /// Next candidate move, sources ascending, destinations ascending
    fn next_move(&mut self) -> Option<Move> {
        loop {
            if let Some(&destination) = self.destinations.get(self.cursor) {
                self.cursor += 1;
                return Some(Move::new(self.source, destination));
            }

            if self.next_source >= self.puzzle.tube_count() {
                return None;
            }
            self.source = self.next_source;
            self.next_source += 1;
            self.destinations = candidate_destinations(&self.puzzle, self.source);
            self.cursor = 0;
        }
    }

    /// Destination top must match the source top unless the destination is empty
    fn colors_agree(&self, mv: Move) -> bool {
        let origin = self.puzzle.tube(mv.source).and_then(|t| t.top());
        let target = self.puzzle.tube(mv.destination).and_then(|t| t.top());
        match (origin, target) {
            (Some(origin), Some(target)) => origin == target,
            _ => true,
        }
    }
}

#[derive(Debug, Default)]
struct SearchStats {
    states_explored: usize,
    ceiling_hits: usize,
}

/// Walk the search tree rooted at `puzzle`, returning the first solved path
fn run_search(puzzle: &Puzzle, ceiling: usize, stats: &mut SearchStats) -> Option<Solution> {
    let mut stack: Vec<SearchFrame> = vec![SearchFrame::new(puzzle.clone(), ceiling)];
    // path[k] is the move that produced stack[k + 1]
    let mut path: Vec<Move> = Vec::new();
    stats.states_explored += 1;

    while let Some(frame) = stack.last_mut() {
        let Some(mv) = frame.next_move() else {
            // Every move from this state failed. The state itself may still
            // be the goal; the root was checked before the search began.
            let exhausted = stack.pop();
            if stack.is_empty() {
                break;
            }
            if exhausted.is_some_and(|f| f.puzzle.is_resolved()) {
                return Some(Solution::new(path));
            }
            path.pop();
            continue;
        };

        // MoveGenerator already guarantees this; keep the rule local too
        if !frame.colors_agree(mv) {
            continue;
        }

        let mut next = frame.puzzle.clone();
        pour(&mut next, mv);
        path.push(mv);

        match frame.remaining.checked_sub(1) {
            Some(remaining) => {
                stats.states_explored += 1;
                stack.push(SearchFrame::new(next, remaining));
            }
            None => {
                // Over the ceiling: no further search below this move,
                // but reaching the goal with it still counts
                stats.ceiling_hits += 1;
                if next.is_resolved() {
                    return Some(Solution::new(path));
                }
                path.pop();
            }
        }
    }

    None
}

/// Search for a sequence of pours that sorts the puzzle.
///
/// The puzzle is expected to have passed validation; see
/// [`crate::solve_puzzle`] for the checked entry point. A `None` solution
/// is the normal negative result: nothing was found within the ceiling.
pub fn search(puzzle: &Puzzle, config: &SolverConfig) -> SolverResult {
    let start_time = Instant::now();
    let mut stats = SearchStats::default();

    let solution = if puzzle.is_resolved() {
        Some(Solution::default())
    } else {
        run_search(puzzle, config.ceiling, &mut stats)
    };

    SolverResult {
        solution,
        states_explored: stats.states_explored,
        ceiling_hits: stats.ceiling_hits,
        time_elapsed_ms: start_time.elapsed().as_millis() as u64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_two_color_puzzle() -> Puzzle {
        Puzzle::from_rows(
            vec![vec!["R", "R", "B", "B"], vec!["B", "B", "R", "R"], vec![], vec![]],
            4,
        )
        .unwrap()
    }

    #[test]
    fn test_finds_first_solution_in_enumeration_order() {
        let puzzle = create_two_color_puzzle();
        let result = search(&puzzle, &SolverConfig::default());

        let solution = result.solution.expect("puzzle is solvable");
        assert_eq!(
            solution.moves(),
            &[Move::new(0, 2), Move::new(1, 0), Move::new(1, 2)]
        );
        assert_eq!(solution.rendered(), vec!["1 -> 3", "2 -> 1", "2 -> 3"]);
        assert_eq!(result.ceiling_hits, 0);
    }

    #[test]
    fn test_already_solved_returns_empty_solution() {
        let puzzle = Puzzle::from_rows(vec![vec!["R", "R"], vec!["B", "B"]], 2).unwrap();
        let result = search(&puzzle, &SolverConfig::default());

        assert!(result.solved());
        assert!(result.solution.unwrap().is_empty());
        assert_eq!(result.states_explored, 0);
    }

    #[test]
    fn test_ceiling_allows_one_move_past_budget() {
        // Shortest solution is three moves
        let puzzle = create_two_color_puzzle();

        let result = search(&puzzle, &SolverConfig { ceiling: 2 });
        assert_eq!(result.solution.map(|s| s.len()), Some(3));

        let result = search(&puzzle, &SolverConfig { ceiling: 1 });
        assert!(!result.solved());
        assert!(result.ceiling_hits > 0);
    }

    #[test]
    fn test_zero_ceiling_checks_single_moves() {
        // One pour finishes it
        let puzzle = Puzzle::from_rows(vec![vec!["R", "R", "R"], vec!["R"], vec![]], 4).unwrap();
        let result = search(&puzzle, &SolverConfig { ceiling: 0 });

        assert_eq!(result.solution.unwrap().moves(), &[Move::new(0, 1)]);
    }

    #[test]
    fn test_no_moves_available() {
        // Both tubes full and mixed: nothing can move
        let puzzle = Puzzle::from_rows(vec![vec!["R", "B"], vec!["B", "R"]], 2).unwrap();
        let result = search(&puzzle, &SolverConfig::default());

        assert!(!result.solved());
        assert_eq!(result.states_explored, 1);
    }

    #[test]
    fn test_search_leaves_input_untouched() {
        let puzzle = create_two_color_puzzle();
        let _ = search(&puzzle, &SolverConfig::default());
        assert_eq!(puzzle, create_two_color_puzzle());
    }
}

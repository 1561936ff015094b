//! End-to-end solving scenarios.

use tube_sorter::{
    parse_recognized_text, replay, search, solve_puzzle, validate, validation_report, Move,
    ParserConfig, Puzzle, SolveError, SolverConfig,
};

fn puzzle(rows: Vec<Vec<&str>>, capacity: usize) -> Puzzle {
    Puzzle::from_rows(rows, capacity).unwrap()
}

#[test]
fn test_solvable_two_color_puzzle() {
    let input = puzzle(
        vec![vec!["R", "R", "B", "B"], vec!["B", "B", "R", "R"], vec![], vec![]],
        4,
    );
    assert!(validate(&input));

    let result = solve_puzzle(&input, &SolverConfig::default()).unwrap();
    let solution = result.solution.expect("puzzle is solvable");
    assert!(!solution.is_empty());

    let solved = replay(&input, &solution).unwrap();
    assert!(solved.is_resolved());
    assert!(solved
        .tubes()
        .iter()
        .all(|tube| tube.is_resolved(input.capacity())));
}

#[test]
fn test_already_solved_puzzle() {
    let input = puzzle(vec![vec!["R", "R"], vec!["B", "B"]], 2);
    assert!(validate(&input));

    let result = solve_puzzle(&input, &SolverConfig::default()).unwrap();
    assert_eq!(result.solution.map(|s| s.len()), Some(0));
}

#[test]
fn test_inconsistent_puzzle_is_not_searched() {
    let input = puzzle(vec![vec!["R", "R"], vec!["B", "B", "B"]], 3);
    assert!(!validate(&input));

    let report = validation_report(&input);
    assert_eq!(report.mismatches.len(), 1);
    assert_eq!(report.mismatches[0].color.as_str(), "R");
    assert_eq!(report.mismatches[0].observed, 2);

    match solve_puzzle(&input, &SolverConfig::default()) {
        Err(SolveError::Invalid(r)) => assert_eq!(r, report),
        Ok(_) => panic!("inconsistent puzzle must not be searched"),
    }
}

#[test]
fn test_ceiling_hides_deeper_solutions() {
    // Needs three pours; a ceiling of one only reaches two-move paths
    let input = puzzle(
        vec![vec!["R", "R", "B", "B"], vec!["B", "B", "R", "R"], vec![], vec![]],
        4,
    );

    let bounded = search(&input, &SolverConfig { ceiling: 1 });
    assert!(!bounded.solved());

    let unbounded = search(&input, &SolverConfig::default());
    assert!(unbounded.solved());
}

#[test]
fn test_identical_input_gives_identical_solution() {
    let input = puzzle(
        vec![vec!["R", "R", "B", "B"], vec!["B", "B", "R", "R"], vec![], vec![]],
        4,
    );

    let first = search(&input, &SolverConfig::default()).solution;
    let second = search(&input, &SolverConfig::default()).solution;
    assert_eq!(first, second);
}

#[test]
fn test_recognized_text_to_solution() {
    let text = "B R\nB R\nR B\nR B\n";
    let input = parse_recognized_text(text, &ParserConfig::default()).unwrap();

    let result = solve_puzzle(&input, &SolverConfig::default()).unwrap();
    let solution = result.solution.unwrap();
    assert_eq!(solution.moves()[0], Move::new(0, 2));
    assert_eq!(
        solution.rendered(),
        vec!["1 -> 3", "2 -> 1", "2 -> 3"]
    );
}

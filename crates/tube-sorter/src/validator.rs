//! Color tally validation.
//!
//! A puzzle is consistent when every color that appears has exactly
//! `capacity` tokens in total, so that each color can fill one tube.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use crate::puzzle::{Color, Puzzle};

/// A color whose total count differs from the tube capacity
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorMismatch {
    pub color: Color,
    pub observed: usize,
    pub expected: usize,
}

impl fmt::Display for ColorMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "color {} has {} tokens, expected {}",
            self.color, self.observed, self.expected
        )
    }
}

/// Result of validating a puzzle's color tally
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    /// Number of distinct colors seen
    pub colors: usize,
    /// Mismatched colors, in order of first appearance
    pub mismatches: Vec<ColorMismatch>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.mismatches.is_empty()
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            return write!(f, "{} colors, all complete", self.colors);
        }
        for (i, mismatch) in self.mismatches.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}", mismatch)?;
        }
        Ok(())
    }
}

/// Count each color across all tubes, bottom to top, tube by tube
fn tally(puzzle: &Puzzle) -> Vec<(&Color, usize)> {
    let mut slots: HashMap<&Color, usize> = HashMap::new();
    let mut counts: Vec<(&Color, usize)> = Vec::new();

    for color in puzzle.tubes().iter().flat_map(|tube| tube.colors()) {
        match slots.get(color) {
            Some(&slot) => counts[slot].1 += 1,
            None => {
                slots.insert(color, counts.len());
                counts.push((color, 1));
            }
        }
    }

    counts
}

/// Build a full report of every color whose count differs from capacity
pub fn validation_report(puzzle: &Puzzle) -> ValidationReport {
    let counts = tally(puzzle);
    let expected = puzzle.capacity();

    let mismatches = counts
        .iter()
        .filter(|(_, observed)| *observed != expected)
        .map(|(color, observed)| ColorMismatch {
            color: (*color).clone(),
            observed: *observed,
            expected,
        })
        .collect();

    ValidationReport {
        colors: counts.len(),
        mismatches,
    }
}

/// Check that every color present fills exactly one tube
pub fn validate(puzzle: &Puzzle) -> bool {
    tally(puzzle)
        .iter()
        .all(|(_, observed)| *observed == puzzle.capacity())
}

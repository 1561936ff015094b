//! Puzzle representation types.
//!
//! A puzzle is a rack of tubes, each holding a stack of colored tokens.
//! Index 0 of a tube is its bottom, the last element is its top. These
//! types serialize to and from the JSON puzzle format used by the CLI.

use std::fmt;

use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;

/// An opaque color token. Only equality is meaningful.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(String);

impl Color {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// A blank label cannot identify a color
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl From<&str> for Color {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

impl From<String> for Color {
    fn from(label: String) -> Self {
        Self(label)
    }
}

impl From<char> for Color {
    fn from(label: char) -> Self {
        Self(label.to_string())
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single tube, read and written only at its top
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tube {
    colors: Vec<Color>,
}

impl Tube {
    pub fn new(colors: Vec<Color>) -> Self {
        Self { colors }
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Tokens from bottom to top
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    pub fn top(&self) -> Option<&Color> {
        self.colors.last()
    }

    /// Length of the run of tokens at the top that share the top color
    pub fn run_length(&self) -> usize {
        match self.top() {
            Some(top) => self.colors.iter().rev().take_while(|c| *c == top).count(),
            None => 0,
        }
    }

    /// Check if every token in the tube has the same color.
    /// An empty tube is trivially uniform.
    pub fn is_uniform(&self) -> bool {
        self.run_length() == self.len()
    }

    /// Check if the tube is empty, or full and a single color
    pub fn is_resolved(&self, capacity: usize) -> bool {
        self.is_empty() || (self.len() == capacity && self.is_uniform())
    }

    pub fn push(&mut self, color: Color) {
        self.colors.push(color);
    }

    pub fn pop(&mut self) -> Option<Color> {
        self.colors.pop()
    }

    /// Pop the top token only if it has the given color
    pub fn pop_if(&mut self, color: &Color) -> Option<Color> {
        if self.top() == Some(color) {
            self.colors.pop()
        } else {
            None
        }
    }
}

impl FromIterator<Color> for Tube {
    fn from_iter<I: IntoIterator<Item = Color>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Shape errors detected before any search work starts
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PuzzleError {
    #[error("tube capacity must be positive")]
    ZeroCapacity,
    #[error("tube {tube} holds {len} tokens but capacity is {capacity}")]
    TubeOverflow {
        tube: usize,
        len: usize,
        capacity: usize,
    },
    #[error("tube {tube} has a blank color at position {position}")]
    BlankColor { tube: usize, position: usize },
}

/// The rack of tubes together with the shared tube capacity
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Puzzle {
    capacity: usize,
    tubes: Vec<Tube>,
}

impl Puzzle {
    /// Build a puzzle, rejecting shapes the solver cannot work with
    pub fn new(tubes: Vec<Tube>, capacity: usize) -> Result<Self, PuzzleError> {
        if capacity == 0 {
            return Err(PuzzleError::ZeroCapacity);
        }

        for (index, tube) in tubes.iter().enumerate() {
            if tube.len() > capacity {
                return Err(PuzzleError::TubeOverflow {
                    tube: index,
                    len: tube.len(),
                    capacity,
                });
            }
            if let Some(position) = tube.colors().iter().position(Color::is_blank) {
                return Err(PuzzleError::BlankColor {
                    tube: index,
                    position,
                });
            }
        }

        Ok(Self { capacity, tubes })
    }

    /// Build a puzzle from nested rows of color labels, bottom first
    pub fn from_rows<R, C>(rows: impl IntoIterator<Item = R>, capacity: usize) -> Result<Self, PuzzleError>
    where
        R: IntoIterator<Item = C>,
        C: Into<Color>,
    {
        let tubes = rows
            .into_iter()
            .map(|row| row.into_iter().map(Into::into).collect())
            .collect();
        Self::new(tubes, capacity)
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn tubes(&self) -> &[Tube] {
        &self.tubes
    }

    pub fn tube(&self, index: usize) -> Option<&Tube> {
        self.tubes.get(index)
    }

    pub fn tube_count(&self) -> usize {
        self.tubes.len()
    }

    /// Check if every tube is resolved
    pub fn is_resolved(&self) -> bool {
        self.tubes.iter().all(|tube| tube.is_resolved(self.capacity))
    }

    pub(crate) fn tubes_mut(&mut self) -> &mut [Tube] {
        &mut self.tubes
    }
}

/// A pour from one tube onto another, holding 0-based tube indices.
///
/// Displays with 1-based indices, e.g. `1 -> 3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub source: usize,
    pub destination: usize,
}

impl Move {
    pub fn new(source: usize, destination: usize) -> Self {
        Self {
            source,
            destination,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.source + 1, self.destination + 1)
    }
}

impl Serialize for Move {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Ordered moves, in application order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Solution {
    moves: Vec<Move>,
}

impl Solution {
    pub fn new(moves: Vec<Move>) -> Self {
        Self { moves }
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Moves rendered with 1-based tube numbers
    pub fn rendered(&self) -> Vec<String> {
        self.moves.iter().map(Move::to_string).collect()
    }
}

impl From<Vec<Move>> for Solution {
    fn from(moves: Vec<Move>) -> Self {
        Self::new(moves)
    }
}

impl<'a> IntoIterator for &'a Solution {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.moves.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tube(labels: &[&str]) -> Tube {
        labels.iter().map(|l| Color::from(*l)).collect()
    }

    #[test]
    fn test_run_length() {
        assert_eq!(tube(&[]).run_length(), 0);
        assert_eq!(tube(&["R", "B", "B"]).run_length(), 2);
        assert_eq!(tube(&["B", "R", "B"]).run_length(), 1);
        assert_eq!(tube(&["R", "R", "R"]).run_length(), 3);
    }

    #[test]
    fn test_tube_resolved() {
        assert!(tube(&[]).is_resolved(4));
        assert!(tube(&["R", "R", "R", "R"]).is_resolved(4));
        // uniform but not full
        assert!(!tube(&["R", "R", "R"]).is_resolved(4));
        assert!(!tube(&["R", "R", "B", "R"]).is_resolved(4));
    }

    #[test]
    fn test_puzzle_resolved_ignores_tube_order() {
        let puzzle =
            Puzzle::from_rows(vec![vec!["R", "R", "R", "R"], vec![], vec!["B", "B", "B", "B"]], 4)
                .unwrap();
        assert!(puzzle.is_resolved());

        let puzzle =
            Puzzle::from_rows(vec![vec![], vec!["B", "B", "B", "B"], vec!["R", "R", "R", "R"]], 4)
                .unwrap();
        assert!(puzzle.is_resolved());

        let puzzle = Puzzle::from_rows(vec![vec!["R", "R", "B", "R"]], 4).unwrap();
        assert!(!puzzle.is_resolved());
    }

    #[test]
    fn test_pop_if() {
        let mut t = tube(&["R", "B"]);
        assert_eq!(t.pop_if(&Color::from("R")), None);
        assert_eq!(t.pop_if(&Color::from("B")), Some(Color::from("B")));
        assert_eq!(t.len(), 1);
    }

    #[test]
    fn test_shape_errors() {
        assert_eq!(
            Puzzle::from_rows(vec![vec!["R"]], 0),
            Err(PuzzleError::ZeroCapacity)
        );
        assert_eq!(
            Puzzle::from_rows(vec![vec!["R", "R"], vec!["B", "B", "B"]], 2),
            Err(PuzzleError::TubeOverflow {
                tube: 1,
                len: 3,
                capacity: 2
            })
        );
        assert_eq!(
            Puzzle::from_rows(vec![vec!["R", " "]], 2),
            Err(PuzzleError::BlankColor {
                tube: 0,
                position: 1
            })
        );
    }

    #[test]
    fn test_move_display_is_one_based() {
        assert_eq!(Move::new(0, 2).to_string(), "1 -> 3");
        let solution = Solution::new(vec![Move::new(0, 2), Move::new(1, 0)]);
        assert_eq!(solution.rendered(), vec!["1 -> 3", "2 -> 1"]);
        assert_eq!(
            serde_json::to_string(&solution).unwrap(),
            r#"["1 -> 3","2 -> 1"]"#
        );
    }
}

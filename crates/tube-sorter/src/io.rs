//! Loading puzzles from files, readers and strings.
//!
//! Two input formats are accepted: the JSON puzzle file
//!
//! ```json
//! { "capacity": 4, "tubes": [["R", "R", "B", "B"], ["B", "B", "R", "R"], [], []] }
//! ```
//!
//! where `capacity` may be omitted and is then taken from the first tube,
//! and recognized text as handled by [`crate::parser`].

use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::parser::{parse_recognized_text, ParseError, ParserConfig, DEFAULT_CAPACITY, DEFAULT_SPARE_TUBES};
use crate::puzzle::{Color, Puzzle, PuzzleError, Tube};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum InputFormat {
    #[default]
    Json,
    Text,
}

/// How to interpret puzzle input
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    pub format: InputFormat,
    /// Overrides the capacity found in (or inferred from) the input
    pub capacity: Option<usize>,
    /// Empty tubes to append to recognized text; defaults to two
    pub spare_tubes: Option<usize>,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read puzzle: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid puzzle JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("capacity not given and the first tube is empty")]
    UnknownCapacity,
    #[error(transparent)]
    Puzzle(#[from] PuzzleError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// On-disk JSON representation of a puzzle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PuzzleFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<usize>,
    pub tubes: Vec<Vec<Color>>,
}

impl PuzzleFile {
    /// Convert into a checked puzzle, inferring capacity from the first tube
    pub fn into_puzzle(self, capacity_override: Option<usize>) -> Result<Puzzle, LoadError> {
        let capacity = capacity_override
            .or(self.capacity)
            .or_else(|| self.tubes.first().map(Vec::len).filter(|len| *len > 0))
            .ok_or(LoadError::UnknownCapacity)?;

        let tubes = self.tubes.into_iter().map(Tube::new).collect();
        Ok(Puzzle::new(tubes, capacity)?)
    }
}

impl From<&Puzzle> for PuzzleFile {
    fn from(puzzle: &Puzzle) -> Self {
        Self {
            capacity: Some(puzzle.capacity()),
            tubes: puzzle
                .tubes()
                .iter()
                .map(|tube| tube.colors().to_vec())
                .collect(),
        }
    }
}

/// Parse puzzle content already held in memory
pub fn parse_puzzle(content: &str, options: &LoadOptions) -> Result<Puzzle, LoadError> {
    match options.format {
        InputFormat::Json => {
            let file: PuzzleFile = serde_json::from_str(content)?;
            file.into_puzzle(options.capacity)
        }
        InputFormat::Text => {
            let config = ParserConfig {
                capacity: options.capacity.unwrap_or(DEFAULT_CAPACITY),
                spare_tubes: options.spare_tubes.unwrap_or(DEFAULT_SPARE_TUBES),
            };
            Ok(parse_recognized_text(content, &config)?)
        }
    }
}

/// Read a puzzle from any reader, e.g. stdin
pub fn read_puzzle<R: Read>(mut reader: R, options: &LoadOptions) -> Result<Puzzle, LoadError> {
    let mut content = String::new();
    reader.read_to_string(&mut content)?;
    parse_puzzle(&content, options)
}

/// Load a puzzle from a file
pub fn load_puzzle<P: AsRef<Path>>(path: P, options: &LoadOptions) -> Result<Puzzle, LoadError> {
    let content = std::fs::read_to_string(path)?;
    parse_puzzle(&content, options)
}

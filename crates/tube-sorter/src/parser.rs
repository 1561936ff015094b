//! Puzzle producer for recognized text.
//!
//! Character recognition of a puzzle screenshot yields one text line per
//! layer of the tube rack, top layer first, with one token per tube.
//! Racks shown as two rows of tubes come out as `2 * capacity` lines,
//! the lower rack following the upper one.
//!
//! ```text
//! B R      top
//! B R
//! R B
//! R B      bottom
//! ```

use thiserror::Error;

use crate::puzzle::{Color, Puzzle, PuzzleError, Tube};

pub const DEFAULT_CAPACITY: usize = 4;
pub const DEFAULT_SPARE_TUBES: usize = 2;

#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Tube capacity, which is also the number of layers per rack
    pub capacity: usize,
    /// Empty tubes appended after the recognized ones
    pub spare_tubes: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            spare_tubes: DEFAULT_SPARE_TUBES,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("no tokens found in text")]
    Empty,
    #[error("found {found} layers, expected {capacity} per rack")]
    LayerCount { found: usize, capacity: usize },
    #[error("layer {layer} has {found} tokens, expected {expected}")]
    RaggedLayer {
        layer: usize,
        found: usize,
        expected: usize,
    },
    #[error(transparent)]
    Puzzle(#[from] PuzzleError),
}

/// The color is the first character of a recognized token
fn token_color(token: &str) -> Color {
    Color::new(token.chars().take(1).collect::<String>())
}

/// Parse recognized text into a puzzle
pub fn parse_recognized_text(text: &str, config: &ParserConfig) -> Result<Puzzle, ParseError> {
    let capacity = config.capacity;
    if capacity == 0 {
        return Err(PuzzleError::ZeroCapacity.into());
    }

    let mut layers: Vec<Vec<&str>> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| line.split_whitespace().collect())
        .collect();

    if layers.is_empty() {
        return Err(ParseError::Empty);
    }

    if capacity.checked_mul(2) == Some(layers.len()) {
        let lower = layers.split_off(capacity);
        for (layer, rest) in layers.iter_mut().zip(lower) {
            layer.extend(rest);
        }
    } else if layers.len() != capacity {
        return Err(ParseError::LayerCount {
            found: layers.len(),
            capacity,
        });
    }

    let width = layers[0].len();
    for (index, layer) in layers.iter().enumerate() {
        if layer.len() != width {
            return Err(ParseError::RaggedLayer {
                layer: index,
                found: layer.len(),
                expected: width,
            });
        }
    }

    // Column k read bottom-up is tube k
    let mut tubes: Vec<Tube> = (0..width)
        .map(|column| {
            layers
                .iter()
                .rev()
                .map(|layer| token_color(layer[column]))
                .collect()
        })
        .collect();
    tubes.extend(std::iter::repeat_with(Tube::default).take(config.spare_tubes));

    Ok(Puzzle::new(tubes, capacity)?)
}

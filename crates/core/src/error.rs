//! Construction-time errors.
//!
//! Everything that can go wrong while the game is running (blocked moves,
//! rejected rotations, game over) is reported as a value, never as an error.

use thiserror::Error;

use crate::types::Point;

/// Problems with a plain-text map.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MapError {
    #[error("map contains no rows")]
    Empty,
    #[error("row {line} has {found} columns, expected {expected}")]
    Ragged {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("unknown glyph {glyph:?} at row {line}, column {column}")]
    UnknownGlyph {
        line: usize,
        column: usize,
        glyph: char,
    },
}

/// Problems detected while building the engine or registering objects.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("board must be at least 1x1, got {width}x{height}")]
    InvalidDimensions { width: i32, height: i32 },
    #[error("wall cell {0} lies outside the board")]
    WallOutOfBounds(Point),
    #[error("spawn origin {0} lies outside the board")]
    SpawnOutOfBounds(Point),
    #[error("cell {0} lies outside the board")]
    OutOfBounds(Point),
    #[error("cell {0} is already occupied")]
    Occupied(Point),
    #[error("a piece holds at most {max} cells, got {count}")]
    TooManyCells { count: usize, max: usize },
    #[error("a piece needs at least one cell")]
    NoCells,
    #[error(transparent)]
    Map(#[from] MapError),
}

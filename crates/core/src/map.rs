//! Map module - plain-text level geometry
//!
//! One character row per line. `#` marks a wall cell, `.` or a space marks an
//! open cell. Trailing `\r` and trailing blank lines are ignored; every other
//! row must have the same width.
//!
//! ```
//! use fieldtris_core::MapSpec;
//!
//! let map: MapSpec = "#..#\n####\n".parse().unwrap();
//! assert_eq!((map.width, map.height), (4, 2));
//! assert_eq!(map.walls.len(), 6);
//! ```

use std::str::FromStr;

use crate::error::MapError;
use crate::types::{Point, Rect, WALL_GLYPH};

/// Board dimensions plus the wall cells seeded at construction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapSpec {
    pub width: i32,
    pub height: i32,
    pub walls: Vec<Point>,
}

impl MapSpec {
    /// A board without walls; the grid edge is the only boundary
    pub fn empty(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            walls: Vec::new(),
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_size(self.width, self.height)
    }

    pub fn parse(text: &str) -> Result<Self, MapError> {
        let mut rows: Vec<&str> = text
            .lines()
            .map(|line| line.strip_suffix('\r').unwrap_or(line))
            .collect();
        while rows.last().is_some_and(|row| row.trim().is_empty()) {
            rows.pop();
        }
        if rows.is_empty() {
            return Err(MapError::Empty);
        }

        let width = rows[0].chars().count();
        let mut walls = Vec::new();
        for (y, row) in rows.iter().enumerate() {
            let found = row.chars().count();
            if found != width {
                return Err(MapError::Ragged {
                    line: y + 1,
                    expected: width,
                    found,
                });
            }
            for (x, glyph) in row.chars().enumerate() {
                match glyph {
                    WALL_GLYPH => walls.push(Point::new(x as i32, y as i32)),
                    '.' | ' ' => {}
                    _ => {
                        return Err(MapError::UnknownGlyph {
                            line: y + 1,
                            column: x + 1,
                            glyph,
                        })
                    }
                }
            }
        }

        Ok(Self {
            width: width as i32,
            height: rows.len() as i32,
            walls,
        })
    }
}

impl FromStr for MapSpec {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

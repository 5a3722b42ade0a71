//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental value types used throughout the workspace.
//! Everything here is plain data with no external dependencies, so the same types
//! flow through the simulation core, the terminal view, and the input mapping.
//!
//! # Board Dimensions
//!
//! Default playfield when no map file is supplied:
//!
//! - **Width**: 10 columns (indexed 0-9, left to right)
//! - **Height**: 20 rows (indexed 0-19, top to bottom)
//! - **Spawn origin**: `(BOARD_WIDTH / 2 - 1, 0)`
//!
//! # Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 25 | Game loop interval (40 FPS) |
//! | `GRAVITY_INTERVAL_MS` | 500 | Time between forced downward steps |
//!
//! # Examples
//!
//! ```
//! use fieldtris_types::{GameAction, PieceKind, Point, Rect};
//!
//! let kind = PieceKind::from_str("t").unwrap();
//! assert_eq!(kind, PieceKind::T);
//!
//! let p = Point::new(2, 3) + Point::new(1, -1);
//! assert_eq!(p, Point::new(3, 2));
//!
//! let r = Rect::new(0, 0, 9, 19);
//! assert_eq!((r.width(), r.height()), (10, 20));
//!
//! assert_eq!(GameAction::from_str("rotate"), Some(GameAction::Rotate));
//! ```

use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// Default board width in cells
pub const BOARD_WIDTH: i32 = 10;

/// Default board height in cells
pub const BOARD_HEIGHT: i32 = 20;

/// Game loop interval in milliseconds (40 FPS)
pub const TICK_MS: u32 = 25;

/// Interval between gravity steps in milliseconds
pub const GRAVITY_INTERVAL_MS: u32 = 500;

/// Number of cells in every catalog shape
pub const MAX_PIECE_CELLS: usize = 4;

/// Map glyph marking a wall cell
pub const WALL_GLYPH: char = '#';

/// Integer grid coordinate, used both as an absolute cell and as an offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0, y: 0 };
    pub const LEFT: Point = Point { x: -1, y: 0 };
    pub const RIGHT: Point = Point { x: 1, y: 0 };
    pub const DOWN: Point = Point { x: 0, y: 1 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Manhattan distance to `other`
    pub fn manhattan(self, other: Point) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    /// Component-wise sign, e.g. `(3, -2)` becomes `(1, -1)`
    pub fn signum(self) -> Point {
        Point::new(self.x.signum(), self.y.signum())
    }
}

impl Add for Point {
    type Output = Point;
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl AddAssign for Point {
    fn add_assign(&mut self, rhs: Point) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl SubAssign for Point {
    fn sub_assign(&mut self, rhs: Point) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl Neg for Point {
    type Output = Point;
    fn neg(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Point::new(x, y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Axis-aligned rectangle given by two inclusive corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl Rect {
    pub const fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Rectangle covering a `width x height` grid anchored at the origin
    pub const fn from_size(width: i32, height: i32) -> Self {
        Self::new(0, 0, width - 1, height - 1)
    }

    pub fn left_top(&self) -> Point {
        Point::new(self.x1.min(self.x2), self.y1.min(self.y2))
    }

    pub fn right_top(&self) -> Point {
        Point::new(self.x1.max(self.x2), self.y1.min(self.y2))
    }

    pub fn left_bottom(&self) -> Point {
        Point::new(self.x1.min(self.x2), self.y1.max(self.y2))
    }

    pub fn right_bottom(&self) -> Point {
        Point::new(self.x1.max(self.x2), self.y1.max(self.y2))
    }

    pub fn width(&self) -> i32 {
        (self.x2 - self.x1).abs() + 1
    }

    pub fn height(&self) -> i32 {
        (self.y2 - self.y1).abs() + 1
    }

    pub fn contains(&self, p: Point) -> bool {
        let lt = self.left_top();
        let rb = self.right_bottom();
        p.x >= lt.x && p.x <= rb.x && p.y >= lt.y && p.y <= rb.y
    }
}

/// The seven tetromino piece kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PieceKind {
    I,
    O,
    S,
    Z,
    L,
    J,
    T,
}

impl PieceKind {
    /// All kinds in catalog order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::L,
        PieceKind::J,
        PieceKind::T,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use fieldtris_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "l" => Some(PieceKind::L),
            "j" => Some(PieceKind::J),
            "t" => Some(PieceKind::T),
            _ => None,
        }
    }

    /// Single uppercase letter for display
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::O => "O",
            PieceKind::S => "S",
            PieceKind::Z => "Z",
            PieceKind::L => "L",
            PieceKind::J => "J",
            PieceKind::T => "T",
        }
    }
}

/// Presentation tag carried by every cell.
///
/// The simulation never branches on it; it is handed through to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VisualTag {
    Wall,
    Piece(PieceKind),
}

/// One occupied grid unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
    pub tag: VisualTag,
}

impl Cell {
    pub const fn new(x: i32, y: i32, tag: VisualTag) -> Self {
        Self { x, y, tag }
    }

    pub fn at(pos: Point, tag: VisualTag) -> Self {
        Self::new(pos.x, pos.y, tag)
    }

    pub fn pos(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Copy of this cell shifted by `delta`
    pub fn translated(&self, delta: Point) -> Cell {
        Cell::new(self.x + delta.x, self.y + delta.y, self.tag)
    }
}

/// Stable handle of an object registered with the engine.
///
/// Handles are issued once and never reused within a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub u32);

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Commands accepted from the input collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down
    MoveDown,
    /// Rotate piece 90° clockwise
    Rotate,
    /// Leave the game loop
    Quit,
}

impl GameAction {
    /// Parse action from string
    ///
    /// # Examples
    ///
    /// ```
    /// use fieldtris_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("QUIT"), Some(GameAction::Quit));
    /// assert_eq!(GameAction::from_str("hardDrop"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "movedown" => Some(GameAction::MoveDown),
            "rotate" => Some(GameAction::Rotate),
            "quit" => Some(GameAction::Quit),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::MoveDown => "moveDown",
            GameAction::Rotate => "rotate",
            GameAction::Quit => "quit",
        }
    }
}

/// Notifications emitted by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// The player piece could not move down and settled.
    Locked(ObjectId),
    /// A filled row was removed.
    LineCleared(i32),
    /// A new piece could not enter the board.
    GameOver,
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameEvent::Locked(id) => write!(f, "locked({})", id),
            GameEvent::LineCleared(row) => write!(f, "lineCleared({})", row),
            GameEvent::GameOver => write!(f, "gameOver()"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_dimensions_are_inclusive() {
        let r = Rect::new(3, 7, 1, 2);
        assert_eq!(r.width(), 3);
        assert_eq!(r.height(), 6);
        assert_eq!(r.left_top(), Point::new(1, 2));
        assert_eq!(r.right_bottom(), Point::new(3, 7));
        assert_eq!(r.right_top(), Point::new(3, 2));
        assert_eq!(r.left_bottom(), Point::new(1, 7));
    }

    #[test]
    fn rect_contains_edges() {
        let r = Rect::from_size(BOARD_WIDTH, BOARD_HEIGHT);
        assert!(r.contains(Point::new(0, 0)));
        assert!(r.contains(Point::new(9, 19)));
        assert!(!r.contains(Point::new(10, 0)));
        assert!(!r.contains(Point::new(0, -1)));
    }

    #[test]
    fn point_arithmetic() {
        let a = Point::new(2, 5);
        let b = Point::new(-1, 3);
        assert_eq!(a + b, Point::new(1, 8));
        assert_eq!(a - b, Point::new(3, 2));
        assert_eq!(-a, Point::new(-2, -5));
        assert_eq!(a.manhattan(b), 5);
        assert_eq!(Point::new(0, 3).signum(), Point::DOWN);
    }

    #[test]
    fn cell_translation_keeps_tag() {
        let c = Cell::new(1, 1, VisualTag::Piece(PieceKind::S));
        let moved = c.translated(Point::new(2, -1));
        assert_eq!(moved.pos(), Point::new(3, 0));
        assert_eq!(moved.tag, c.tag);
    }

    #[test]
    fn event_display() {
        assert_eq!(GameEvent::Locked(ObjectId(3)).to_string(), "locked(#3)");
        assert_eq!(GameEvent::LineCleared(19).to_string(), "lineCleared(19)");
        assert_eq!(GameEvent::GameOver.to_string(), "gameOver()");
    }
}

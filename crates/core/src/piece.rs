//! Piece module - the mutable tetrimino entity
//!
//! A piece owns an ordered list of cells. Translation and rotation here never
//! validate anything: the controller applies a change, asks the field whether
//! it collides, and applies the inverse change when it does.

use arrayvec::ArrayVec;

use crate::capability::{Collidable, Contact, GravityAffected, PlayerControllable, Positionable, Turn};
use crate::error::EngineError;
use crate::pieces::{rotates, spawn_cells};
use crate::types::{Cell, PieceKind, Point, VisualTag, MAX_PIECE_CELLS};

/// A tetrimino, or a fragment of one left over after line clears
#[derive(Debug, Clone, PartialEq)]
pub struct Piece {
    kind: Option<PieceKind>,
    origin: Point,
    cells: ArrayVec<Cell, MAX_PIECE_CELLS>,
    gravity: bool,
    collidable: bool,
    player: bool,
    last_contact: Option<Contact>,
}

impl Piece {
    /// Create a piece of `kind` at `origin`.
    ///
    /// The piece starts staged: no gravity, no collision, no player control.
    pub fn spawn(kind: PieceKind, origin: Point) -> Self {
        Self {
            kind: Some(kind),
            origin,
            cells: spawn_cells(kind, origin),
            gravity: false,
            collidable: false,
            player: false,
            last_contact: None,
        }
    }

    /// Create a settled piece (gravity and collision on) from explicit cells.
    ///
    /// The kind is taken from the first cell's tag when it names one.
    pub fn from_cells(cells: &[Cell]) -> Result<Self, EngineError> {
        if cells.is_empty() {
            return Err(EngineError::NoCells);
        }
        if cells.len() > MAX_PIECE_CELLS {
            return Err(EngineError::TooManyCells {
                count: cells.len(),
                max: MAX_PIECE_CELLS,
            });
        }
        let kind = match cells[0].tag {
            VisualTag::Piece(kind) => Some(kind),
            VisualTag::Wall => None,
        };
        Ok(Self {
            kind,
            origin: cells[0].pos(),
            cells: cells.iter().copied().collect(),
            gravity: true,
            collidable: true,
            player: false,
            last_contact: None,
        })
    }

    pub fn kind(&self) -> Option<PieceKind> {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// A piece whose last cell was removed is gone for good.
    pub fn is_destroyed(&self) -> bool {
        self.is_empty()
    }

    pub fn set_collidable(&mut self, collidable: bool) {
        self.collidable = collidable;
    }

    /// Most recent rejected step involving this piece
    pub fn last_contact(&self) -> Option<Contact> {
        self.last_contact
    }

    /// Positions of the cells, in order
    pub fn positions(&self) -> impl Iterator<Item = Point> + '_ {
        self.cells.iter().map(|c| c.pos())
    }

    /// Largest row index covered by the piece
    pub fn bottom(&self) -> Option<i32> {
        self.cells.iter().map(|c| c.y).max()
    }

    /// Translate every cell by `delta`
    pub fn move_by(&mut self, delta: Point) {
        self.origin += delta;
        for cell in &mut self.cells {
            *cell = cell.translated(delta);
        }
    }

    /// Remove the cell at `at`, returning whether one was there
    pub fn remove_cell(&mut self, at: Point) -> bool {
        match self.cells.iter().position(|c| c.pos() == at) {
            Some(idx) => {
                self.cells.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Detach the first isolated cell into a new one-cell piece.
    ///
    /// A cell is isolated when no other cell of this piece is within
    /// Manhattan distance 1. At most one cell is detached per call; the new
    /// piece inherits this piece's kind and flags.
    pub fn split(&mut self) -> Option<Piece> {
        if self.cells.len() < 2 {
            return None;
        }

        let idx = (0..self.cells.len()).find(|&i| {
            let here = self.cells[i].pos();
            self.cells
                .iter()
                .enumerate()
                .all(|(j, other)| i == j || here.manhattan(other.pos()) > 1)
        })?;

        let cell = self.cells.remove(idx);
        let mut cells = ArrayVec::new();
        cells.push(cell);

        Some(Piece {
            kind: self.kind,
            origin: cell.pos(),
            cells,
            gravity: self.gravity,
            collidable: self.collidable,
            player: self.player,
            last_contact: None,
        })
    }
}

impl Positionable for Piece {
    fn cells(&self) -> &[Cell] {
        &self.cells
    }

    fn origin(&self) -> Point {
        self.origin
    }
}

impl Collidable for Piece {
    fn is_collidable(&self) -> bool {
        self.collidable
    }

    fn on_collided(&mut self, contact: Contact) {
        self.last_contact = Some(contact);
    }
}

impl GravityAffected for Piece {
    fn gravity_enabled(&self) -> bool {
        self.gravity
    }

    fn set_gravity_enabled(&mut self, enabled: bool) {
        self.gravity = enabled;
    }
}

impl PlayerControllable for Piece {
    fn is_player_controlled(&self) -> bool {
        self.player
    }

    fn set_player_controlled(&mut self, controlled: bool) {
        self.player = controlled;
    }

    fn rotate(&mut self, turn: Turn) {
        if !self.kind.map_or(true, rotates) {
            return;
        }
        let Some(pivot) = self.cells.first().map(|c| c.pos()) else {
            return;
        };

        // y grows downwards, so clockwise maps right to down.
        for cell in self.cells.iter_mut().skip(1) {
            let d = cell.pos() - pivot;
            let turned = match turn {
                Turn::Clockwise => Point::new(-d.y, d.x),
                Turn::CounterClockwise => Point::new(d.y, -d.x),
            };
            *cell = Cell::at(pivot + turned, cell.tag);
        }
    }
}

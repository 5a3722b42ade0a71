//! Render-facing copy of the controller state
//!
//! Filled by [`Controller::snapshot_into`](crate::Controller::snapshot_into),
//! which reuses the cell buffer between frames.

use crate::controller::Phase;
use crate::types::{Cell, ObjectId, PieceKind};

#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub width: i32,
    pub height: i32,
    /// Drawable cells, walls first, then pieces in handle order
    pub cells: Vec<Cell>,
    pub current: Option<ObjectId>,
    /// Cells of the falling piece, also present in `cells`
    pub current_cells: Vec<Cell>,
    pub next: Option<PieceKind>,
    /// Number of objects on the field, walls included
    pub objects: usize,
    pub phase: Phase,
    pub game_over: bool,
    pub quit: bool,
}

impl Snapshot {
    pub fn clear(&mut self) {
        self.width = 0;
        self.height = 0;
        self.cells.clear();
        self.current = None;
        self.current_cells.clear();
        self.next = None;
        self.objects = 0;
        self.phase = Phase::Spawning;
        self.game_over = false;
        self.quit = false;
    }

    pub fn playable(&self) -> bool {
        !self.game_over && !self.quit
    }
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            width: 0,
            height: 0,
            cells: Vec::new(),
            current: None,
            current_cells: Vec::new(),
            next: None,
            objects: 0,
            phase: Phase::Spawning,
            game_over: false,
            quit: false,
        }
    }
}

//! Object arena - every wall and piece registered with the engine
//!
//! Objects are addressed by [`ObjectId`] handles. Ids are issued in increasing
//! order and never reused, so iteration order is also creation order.

use std::collections::BTreeMap;

use crate::capability::{Collidable, Positionable};
use crate::piece::Piece;
use crate::types::{Cell, ObjectId, Point};

/// Static obstacle made of wall cells
#[derive(Debug, Clone, PartialEq)]
pub struct Wall {
    cells: Vec<Cell>,
}

impl Wall {
    pub fn new(cells: Vec<Cell>) -> Self {
        Self { cells }
    }
}

impl Positionable for Wall {
    fn cells(&self) -> &[Cell] {
        &self.cells
    }

    fn origin(&self) -> Point {
        self.cells.first().map(|c| c.pos()).unwrap_or(Point::ZERO)
    }
}

impl Collidable for Wall {
    fn is_collidable(&self) -> bool {
        true
    }
}

/// Anything that can own field cells
#[derive(Debug, Clone, PartialEq)]
pub enum Object {
    Wall(Wall),
    Piece(Piece),
}

impl Object {
    pub fn is_wall(&self) -> bool {
        matches!(self, Object::Wall(_))
    }

    pub fn as_piece(&self) -> Option<&Piece> {
        match self {
            Object::Piece(piece) => Some(piece),
            Object::Wall(_) => None,
        }
    }

    pub fn as_piece_mut(&mut self) -> Option<&mut Piece> {
        match self {
            Object::Piece(piece) => Some(piece),
            Object::Wall(_) => None,
        }
    }

    pub fn cells(&self) -> &[Cell] {
        self.collidable().cells()
    }

    pub fn collidable(&self) -> &dyn Collidable {
        match self {
            Object::Wall(wall) => wall,
            Object::Piece(piece) => piece,
        }
    }

    pub fn collidable_mut(&mut self) -> &mut dyn Collidable {
        match self {
            Object::Wall(wall) => wall,
            Object::Piece(piece) => piece,
        }
    }

    /// Remove the cell at `at` from a piece, returning whether one was there.
    ///
    /// Wall cells are immutable; for a wall this always returns `false`.
    pub fn remove_cell(&mut self, at: Point) -> bool {
        match self {
            Object::Wall(_) => false,
            Object::Piece(piece) => piece.remove_cell(at),
        }
    }
}

/// Id-addressed store of engine objects
#[derive(Debug, Clone, Default)]
pub struct Objects {
    next_id: u32,
    entries: BTreeMap<ObjectId, Object>,
}

impl Objects {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an object and hand out a fresh id
    pub fn insert(&mut self, object: Object) -> ObjectId {
        let id = ObjectId(self.next_id);
        self.next_id += 1;
        self.entries.insert(id, object);
        id
    }

    pub fn get(&self, id: ObjectId) -> Option<&Object> {
        self.entries.get(&id)
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut Object> {
        self.entries.get_mut(&id)
    }

    pub fn piece(&self, id: ObjectId) -> Option<&Piece> {
        self.get(id).and_then(Object::as_piece)
    }

    pub fn piece_mut(&mut self, id: ObjectId) -> Option<&mut Piece> {
        self.get_mut(id).and_then(Object::as_piece_mut)
    }

    pub fn remove(&mut self, id: ObjectId) -> Option<Object> {
        self.entries.remove(&id)
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.entries.contains_key(&id)
    }

    /// Ids in creation order
    pub fn ids(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.entries.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ObjectId, &Object)> + '_ {
        self.entries.iter().map(|(&id, obj)| (id, obj))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every piece that has lost all of its cells
    pub fn reap_destroyed(&mut self) -> Vec<ObjectId> {
        let dead: Vec<ObjectId> = self
            .entries
            .iter()
            .filter(|(_, obj)| obj.as_piece().is_some_and(Piece::is_destroyed))
            .map(|(&id, _)| id)
            .collect();
        for id in &dead {
            self.entries.remove(id);
        }
        dead
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PieceKind, VisualTag};

    fn wall() -> Object {
        Object::Wall(Wall::new(vec![Cell::new(0, 0, VisualTag::Wall)]))
    }

    #[test]
    fn test_ids_are_monotonic_and_never_reused() {
        let mut objects = Objects::new();
        let a = objects.insert(wall());
        let b = objects.insert(Object::Piece(Piece::spawn(PieceKind::T, Point::ZERO)));
        assert!(a < b);
        objects.remove(b);
        let c = objects.insert(wall());
        assert!(c > b);
        assert_eq!(objects.ids().collect::<Vec<_>>(), vec![a, c]);
    }

    #[test]
    fn test_piece_lookup_skips_walls() {
        let mut objects = Objects::new();
        let w = objects.insert(wall());
        let p = objects.insert(Object::Piece(Piece::spawn(PieceKind::O, Point::ZERO)));
        assert!(objects.piece(w).is_none());
        assert!(objects.get(w).is_some_and(Object::is_wall));
        assert_eq!(objects.piece(p).and_then(Piece::kind), Some(PieceKind::O));
    }

    #[test]
    fn test_walls_are_always_collidable() {
        let obj = wall();
        assert!(obj.collidable().is_collidable());
    }

    #[test]
    fn test_wall_cells_cannot_be_removed() {
        let mut obj = wall();
        assert!(!obj.remove_cell(Point::new(0, 0)));
        assert_eq!(obj.cells(), &[Cell::new(0, 0, VisualTag::Wall)]);
    }

    #[test]
    fn test_reap_destroyed_removes_empty_pieces_only() {
        let mut objects = Objects::new();
        let w = objects.insert(Object::Wall(Wall::new(Vec::new())));
        let cell = Cell::new(1, 1, VisualTag::Piece(PieceKind::I));
        let p = objects.insert(Object::Piece(Piece::from_cells(&[cell]).unwrap()));
        assert!(objects.get_mut(p).unwrap().remove_cell(Point::new(1, 1)));

        assert_eq!(objects.reap_destroyed(), vec![p]);
        assert!(objects.contains(w));
        assert!(!objects.contains(p));
        assert_eq!(objects.len(), 1);
    }
}

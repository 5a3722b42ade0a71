//! Collision oracle
//!
//! Two objects collide when both are collidable, they are not the same
//! object, and at least one pair of their cells shares a coordinate.

use crate::capability::Collidable;
use crate::types::ObjectId;

/// Size of one grid cell in renderer units.
///
/// Both factors are positive. Cells are compared on integer coordinates, so
/// any such scale gives the same answer as [`CellScale::UNIT`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellScale {
    x: i32,
    y: i32,
}

impl CellScale {
    pub const UNIT: CellScale = CellScale { x: 1, y: 1 };

    /// `None` unless both factors are at least 1
    pub const fn new(x: i32, y: i32) -> Option<Self> {
        if x < 1 || y < 1 {
            return None;
        }
        Some(Self { x, y })
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }
}

impl Default for CellScale {
    fn default() -> Self {
        Self::UNIT
    }
}

/// Check whether `a` and `b` currently overlap
pub fn collides(a_id: ObjectId, a: &dyn Collidable, b_id: ObjectId, b: &dyn Collidable) -> bool {
    collides_scaled(a_id, a, b_id, b, CellScale::UNIT)
}

/// [`collides`] with cells compared as `scale`-sized boxes
pub fn collides_scaled(
    a_id: ObjectId,
    a: &dyn Collidable,
    b_id: ObjectId,
    b: &dyn Collidable,
    scale: CellScale,
) -> bool {
    if a_id == b_id || !a.is_collidable() || !b.is_collidable() {
        return false;
    }

    a.cells().iter().any(|ca| {
        b.cells()
            .iter()
            .any(|cb| ca.x * scale.x == cb.x * scale.x && ca.y * scale.y == cb.y * scale.y)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::Positionable;
    use crate::objects::Wall;
    use crate::piece::Piece;
    use crate::types::{Cell, PieceKind, Point, VisualTag};

    fn piece(points: &[(i32, i32)]) -> Piece {
        let cells: Vec<Cell> = points
            .iter()
            .map(|&(x, y)| Cell::new(x, y, VisualTag::Piece(PieceKind::Z)))
            .collect();
        Piece::from_cells(&cells).unwrap()
    }

    #[test]
    fn test_overlap_is_symmetric() {
        let a = piece(&[(0, 0), (1, 0)]);
        let b = piece(&[(1, 0), (1, 1)]);
        assert!(collides(ObjectId(1), &a, ObjectId(2), &b));
        assert!(collides(ObjectId(2), &b, ObjectId(1), &a));
    }

    #[test]
    fn test_disjoint_objects_do_not_collide() {
        let a = piece(&[(0, 0), (1, 0)]);
        let b = piece(&[(0, 1), (1, 1)]);
        assert!(!collides(ObjectId(1), &a, ObjectId(2), &b));
    }

    #[test]
    fn test_object_never_collides_with_itself() {
        let a = piece(&[(0, 0)]);
        assert!(!collides(ObjectId(4), &a, ObjectId(4), &a));
    }

    #[test]
    fn test_non_collidable_side_never_collides() {
        let a = Piece::spawn(PieceKind::O, Point::ZERO);
        let wall = Wall::new(a.cells().to_vec());
        assert!(!a.is_collidable());
        assert!(!collides(ObjectId(1), &a, ObjectId(2), &wall));
        assert!(!collides(ObjectId(2), &wall, ObjectId(1), &a));
    }

    #[test]
    fn test_scale_does_not_change_answer() {
        let a = piece(&[(2, 3)]);
        let b = piece(&[(2, 3)]);
        let c = piece(&[(3, 3)]);
        let scale = CellScale::new(2, 1).unwrap();
        assert!(collides_scaled(ObjectId(1), &a, ObjectId(2), &b, scale));
        assert!(!collides_scaled(ObjectId(1), &a, ObjectId(3), &c, scale));
    }

    #[test]
    fn test_scale_must_be_positive() {
        assert_eq!(CellScale::new(0, 1), None);
        assert_eq!(CellScale::new(1, -2), None);
        assert_eq!(CellScale::new(1, 1), Some(CellScale::UNIT));
        assert_eq!(CellScale::default().x(), 1);
    }
}

//! Field module - the grid-ownership index
//!
//! The field maps every grid slot to the object occupying it and keeps the
//! reverse list of slots per object. It owns placement only: the objects
//! themselves live in [`Objects`], which callers pass in whenever a field
//! operation has to reach into an object (removing cells, splitting pieces).
//!
//! Slots are stored in a flat row-major vector (`y * width + x`).

use std::collections::BTreeMap;

use log::{debug, warn};

use crate::capability::Positionable;
use crate::error::EngineError;
use crate::objects::{Object, Objects};
use crate::types::{Cell, ObjectId, Point, Rect};

/// Contents of one occupied slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    pub owner: ObjectId,
    pub cell: Cell,
}

/// A cell taken out of the field by [`Field::remove_at`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemovedCell {
    pub owner: ObjectId,
    pub cell: Cell,
    /// The owner has no cells left
    pub emptied: bool,
}

/// Grid-to-owner index
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    width: i32,
    height: i32,
    slots: Vec<Option<Slot>>,
    owned: BTreeMap<ObjectId, Vec<Point>>,
}

impl Field {
    /// Create an empty field
    pub fn new(width: i32, height: i32) -> Result<Self, EngineError> {
        let len = match width.checked_mul(height) {
            Some(len) if width >= 1 && height >= 1 => len as usize,
            _ => return Err(EngineError::InvalidDimensions { width, height }),
        };
        Ok(Self {
            width,
            height,
            slots: vec![None; len],
            owned: BTreeMap::new(),
        })
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_size(self.width, self.height)
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= 0 && p.x < self.width && p.y >= 0 && p.y < self.height
    }

    #[inline(always)]
    fn index(&self, p: Point) -> Option<usize> {
        if !self.contains(p) {
            return None;
        }
        Some((p.y * self.width + p.x) as usize)
    }

    /// Slot at (x, y); out-of-range coordinates read as empty
    pub fn get(&self, x: i32, y: i32) -> Option<&Slot> {
        self.index(Point::new(x, y))
            .and_then(|idx| self.slots[idx].as_ref())
    }

    pub fn owner_at(&self, p: Point) -> Option<ObjectId> {
        self.get(p.x, p.y).map(|slot| slot.owner)
    }

    /// Replace the slots owned by `id` with `cells`.
    ///
    /// Cells outside the grid are skipped. A slot held by another owner is
    /// taken over and dropped from that owner's list.
    pub fn update(&mut self, id: ObjectId, cells: &[Cell]) {
        self.clear(id);

        let mut points = Vec::with_capacity(cells.len());
        for &cell in cells {
            let Some(idx) = self.index(cell.pos()) else {
                debug!("{} cell {} is off the field, not indexed", id, cell.pos());
                continue;
            };
            if let Some(prev) = self.slots[idx] {
                // Already written by this call: a repeated cell.
                if prev.owner == id {
                    continue;
                }
                warn!(
                    "{} takes slot {} from {}",
                    id,
                    cell.pos(),
                    prev.owner
                );
                self.forget_point(prev.owner, cell.pos());
            }
            self.slots[idx] = Some(Slot { owner: id, cell });
            points.push(cell.pos());
        }

        if !points.is_empty() {
            self.owned.insert(id, points);
        }
    }

    /// Drop every slot owned by `id`; untracked ids are a no-op
    pub fn clear(&mut self, id: ObjectId) {
        let Some(points) = self.owned.remove(&id) else {
            return;
        };
        for p in points {
            if let Some(idx) = self.index(p) {
                if self.slots[idx].is_some_and(|slot| slot.owner == id) {
                    self.slots[idx] = None;
                }
            }
        }
    }

    fn forget_point(&mut self, id: ObjectId, p: Point) {
        if let Some(points) = self.owned.get_mut(&id) {
            points.retain(|&q| q != p);
            if points.is_empty() {
                self.owned.remove(&id);
            }
        }
    }

    /// Slots currently held by `id`
    pub fn cells_of(&self, id: ObjectId) -> &[Point] {
        self.owned.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_tracked(&self, id: ObjectId) -> bool {
        self.owned.contains_key(&id)
    }

    /// Every distinct object owning at least one slot, in id order.
    ///
    /// Recomputed on each call, so it is safe to restart after mutation.
    pub fn children(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.owned.keys().copied()
    }

    /// Distinct owners of the slots under `points`, in first-seen order
    pub fn owners_at(&self, points: impl IntoIterator<Item = Point>) -> Vec<ObjectId> {
        let mut owners = Vec::new();
        for p in points {
            if let Some(owner) = self.owner_at(p) {
                if !owners.contains(&owner) {
                    owners.push(owner);
                }
            }
        }
        owners
    }

    /// All occupied slots with their coordinates, row by row
    pub fn occupied(&self) -> impl Iterator<Item = (Point, &Slot)> + '_ {
        let width = self.width;
        self.slots.iter().enumerate().filter_map(move |(idx, slot)| {
            let idx = idx as i32;
            slot.as_ref()
                .map(|s| (Point::new(idx % width, idx / width), s))
        })
    }

    /// Remove the single cell at (x, y) from its owner.
    ///
    /// Wall cells are never removed. Empty or out-of-range slots are a no-op.
    pub fn remove_at(&mut self, x: i32, y: i32, objects: &mut Objects) -> Option<RemovedCell> {
        let p = Point::new(x, y);
        let idx = self.index(p)?;
        let slot = self.slots[idx]?;

        if objects.get(slot.owner).is_some_and(Object::is_wall) {
            return None;
        }

        self.slots[idx] = None;
        self.forget_point(slot.owner, p);

        let emptied = match objects.get_mut(slot.owner) {
            Some(obj) => {
                obj.remove_cell(p);
                obj.cells().is_empty()
            }
            None => true,
        };

        Some(RemovedCell {
            owner: slot.owner,
            cell: slot.cell,
            emptied,
        })
    }

    /// Remove every removable cell in row `y`
    pub fn remove_line(&mut self, y: i32, objects: &mut Objects) -> Vec<RemovedCell> {
        (0..self.width)
            .filter_map(|x| self.remove_at(x, y, objects))
            .collect()
    }

    /// Whether row `y` is fully occupied with at least one non-wall cell
    pub fn check_filled(&self, y: i32, objects: &Objects) -> bool {
        if y < 0 || y >= self.height {
            return false;
        }

        let mut has_piece = false;
        for x in 0..self.width {
            let Some(slot) = self.get(x, y) else {
                return false;
            };
            if !objects.get(slot.owner).is_some_and(Object::is_wall) {
                has_piece = true;
            }
        }
        has_piece
    }

    /// Split every tracked piece until no isolated cells remain.
    ///
    /// Each detached cell becomes a new piece registered with `objects` and
    /// indexed here. Returns the ids of the new pieces.
    pub fn restructure(&mut self, objects: &mut Objects) -> Vec<ObjectId> {
        let ids: Vec<ObjectId> = self.children().collect();
        let mut created = Vec::new();

        for id in ids {
            let Some(piece) = objects.piece_mut(id) else {
                continue;
            };

            let mut fragments = Vec::new();
            while let Some(fragment) = piece.split() {
                fragments.push(fragment);
            }
            if fragments.is_empty() {
                continue;
            }

            let remaining = piece.cells().to_vec();
            self.update(id, &remaining);

            for fragment in fragments {
                let cells = fragment.cells().to_vec();
                let new_id = objects.insert(Object::Piece(fragment));
                self.update(new_id, &cells);
                debug!("split {} off {} at {}", new_id, id, cells[0].pos());
                created.push(new_id);
            }
        }

        created
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objects::Wall;
    use crate::piece::Piece;
    use crate::types::{PieceKind, VisualTag};

    const TAG: VisualTag = VisualTag::Piece(PieceKind::J);

    fn cells(points: &[(i32, i32)], tag: VisualTag) -> Vec<Cell> {
        points.iter().map(|&(x, y)| Cell::new(x, y, tag)).collect()
    }

    fn add_piece(field: &mut Field, objects: &mut Objects, points: &[(i32, i32)]) -> ObjectId {
        let cells = cells(points, TAG);
        let id = objects.insert(Object::Piece(Piece::from_cells(&cells).unwrap()));
        field.update(id, &cells);
        id
    }

    fn add_wall(field: &mut Field, objects: &mut Objects, points: &[(i32, i32)]) -> ObjectId {
        let cells = cells(points, VisualTag::Wall);
        let id = objects.insert(Object::Wall(Wall::new(cells.clone())));
        field.update(id, &cells);
        id
    }

    #[test]
    fn test_new_rejects_empty_dimensions() {
        assert!(Field::new(0, 5).is_err());
        assert!(Field::new(5, -1).is_err());
        assert!(Field::new(i32::MAX, 2).is_err());
        let field = Field::new(10, 20).unwrap();
        assert_eq!(field.bounds().width(), 10);
        assert_eq!(field.bounds().height(), 20);
    }

    #[test]
    fn test_out_of_range_reads_are_empty() {
        let field = Field::new(4, 4).unwrap();
        assert!(field.get(-1, 0).is_none());
        assert!(field.get(0, 4).is_none());
        assert!(field.get(99, 99).is_none());
    }

    #[test]
    fn test_update_replaces_stale_slots() {
        let mut field = Field::new(4, 4).unwrap();
        let id = ObjectId(7);
        field.update(id, &cells(&[(0, 0), (1, 0)], TAG));
        field.update(id, &cells(&[(0, 1), (1, 1)], TAG));

        assert!(field.get(0, 0).is_none());
        assert!(field.get(1, 0).is_none());
        assert_eq!(field.owner_at(Point::new(0, 1)), Some(id));
        assert_eq!(field.cells_of(id), &[Point::new(0, 1), Point::new(1, 1)]);
    }

    #[test]
    fn test_update_skips_cells_off_the_grid() {
        let mut field = Field::new(3, 3).unwrap();
        field.update(ObjectId(1), &cells(&[(-1, 0), (0, 0), (3, 3)], TAG));
        assert_eq!(field.cells_of(ObjectId(1)), &[Point::new(0, 0)]);
    }

    #[test]
    fn test_update_takes_over_foreign_slot() {
        let mut field = Field::new(3, 3).unwrap();
        field.update(ObjectId(1), &cells(&[(0, 0), (1, 0)], TAG));
        field.update(ObjectId(2), &cells(&[(1, 0)], TAG));

        assert_eq!(field.owner_at(Point::new(1, 0)), Some(ObjectId(2)));
        assert_eq!(field.cells_of(ObjectId(1)), &[Point::new(0, 0)]);
    }

    #[test]
    fn test_clear_leaves_other_owners_alone() {
        let mut field = Field::new(3, 3).unwrap();
        field.update(ObjectId(1), &cells(&[(0, 0)], TAG));
        field.update(ObjectId(2), &cells(&[(1, 0)], TAG));
        field.clear(ObjectId(1));
        field.clear(ObjectId(1));
        field.clear(ObjectId(42));

        assert!(field.get(0, 0).is_none());
        assert_eq!(field.owner_at(Point::new(1, 0)), Some(ObjectId(2)));
        assert_eq!(field.children().collect::<Vec<_>>(), vec![ObjectId(2)]);
    }

    #[test]
    fn test_children_are_distinct_and_restartable() {
        let mut field = Field::new(4, 4).unwrap();
        field.update(ObjectId(3), &cells(&[(0, 0), (1, 0), (2, 0)], TAG));
        field.update(ObjectId(1), &cells(&[(0, 3)], TAG));

        let first: Vec<_> = field.children().collect();
        let second: Vec<_> = field.children().collect();
        assert_eq!(first, vec![ObjectId(1), ObjectId(3)]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_remove_at_takes_one_cell_from_owner() {
        let mut field = Field::new(4, 4).unwrap();
        let mut objects = Objects::new();
        let id = add_piece(&mut field, &mut objects, &[(0, 0), (1, 0)]);

        let removed = field.remove_at(1, 0, &mut objects).unwrap();
        assert_eq!(removed.owner, id);
        assert!(!removed.emptied);
        assert_eq!(objects.piece(id).unwrap().len(), 1);
        assert!(field.get(1, 0).is_none());

        let removed = field.remove_at(0, 0, &mut objects).unwrap();
        assert!(removed.emptied);
        assert!(!field.is_tracked(id));
    }

    #[test]
    fn test_remove_at_is_noop_for_empty_and_walls() {
        let mut field = Field::new(4, 4).unwrap();
        let mut objects = Objects::new();
        let wall = add_wall(&mut field, &mut objects, &[(0, 3)]);

        assert!(field.remove_at(2, 2, &mut objects).is_none());
        assert!(field.remove_at(-5, 2, &mut objects).is_none());
        assert!(field.remove_at(0, 3, &mut objects).is_none());
        assert_eq!(field.owner_at(Point::new(0, 3)), Some(wall));
    }

    #[test]
    fn test_check_filled_needs_a_piece_cell() {
        let mut field = Field::new(3, 3).unwrap();
        let mut objects = Objects::new();
        add_wall(&mut field, &mut objects, &[(0, 2), (1, 2), (2, 2)]);
        add_wall(&mut field, &mut objects, &[(0, 1), (2, 1)]);

        assert!(!field.check_filled(2, &objects));
        assert!(!field.check_filled(1, &objects));
        add_piece(&mut field, &mut objects, &[(1, 1)]);
        assert!(field.check_filled(1, &objects));
        assert!(!field.check_filled(7, &objects));
    }

    #[test]
    fn test_remove_line_empties_the_row() {
        let mut field = Field::new(4, 2).unwrap();
        let mut objects = Objects::new();
        let a = add_piece(&mut field, &mut objects, &[(0, 1), (1, 1), (1, 0)]);
        let b = add_piece(&mut field, &mut objects, &[(2, 1), (3, 1)]);
        assert!(field.check_filled(1, &objects));

        let removed = field.remove_line(1, &mut objects);
        assert_eq!(removed.len(), 4);
        assert!((0..4).all(|x| field.get(x, 1).is_none()));
        assert!(removed.iter().any(|r| r.owner == b && r.emptied));
        assert_eq!(field.cells_of(a), &[Point::new(1, 0)]);
        assert_eq!(objects.reap_destroyed(), vec![b]);
    }

    #[test]
    fn test_restructure_splits_disconnected_piece() {
        let mut field = Field::new(6, 6).unwrap();
        let mut objects = Objects::new();
        let id = add_piece(&mut field, &mut objects, &[(0, 0), (1, 0), (5, 5)]);

        let created = field.restructure(&mut objects);
        assert_eq!(created.len(), 1);
        let new_id = created[0];

        assert_eq!(field.cells_of(id), &[Point::new(0, 0), Point::new(1, 0)]);
        assert_eq!(field.cells_of(new_id), &[Point::new(5, 5)]);
        assert_eq!(field.owner_at(Point::new(5, 5)), Some(new_id));
        assert_eq!(objects.piece(new_id).unwrap().len(), 1);
    }

    #[test]
    fn test_restructure_leaves_connected_pieces() {
        let mut field = Field::new(6, 6).unwrap();
        let mut objects = Objects::new();
        add_piece(&mut field, &mut objects, &[(0, 0), (1, 0), (1, 1)]);
        add_wall(&mut field, &mut objects, &[(0, 5), (5, 5)]);

        assert!(field.restructure(&mut objects).is_empty());
        assert_eq!(objects.len(), 2);
    }

    #[test]
    fn test_occupied_matches_owned_lists() {
        let mut field = Field::new(5, 5).unwrap();
        let mut objects = Objects::new();
        add_piece(&mut field, &mut objects, &[(0, 0), (1, 0)]);
        add_wall(&mut field, &mut objects, &[(4, 4)]);

        for (p, slot) in field.occupied() {
            assert!(field.cells_of(slot.owner).contains(&p));
            assert_eq!(slot.cell.pos(), p);
        }
        assert_eq!(field.occupied().count(), 3);
    }
}

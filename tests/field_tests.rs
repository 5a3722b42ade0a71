//! Field ownership index through the public API

use fieldtris::core::{Field, Object, Objects, Piece, Positionable, Wall};
use fieldtris::types::{Cell, ObjectId, PieceKind, Point, VisualTag};

const TAG: VisualTag = VisualTag::Piece(PieceKind::Z);

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
fn test_zero_sized_field_is_rejected() {
    assert!(Field::new(0, 5).is_err());
    assert!(Field::new(5, -1).is_err());
    let field = Field::new(1, 1).unwrap();
    assert_eq!((field.width(), field.height()), (1, 1));
}

#[test]
fn test_update_moves_ownership() {
    let mut field = Field::new(4, 4).unwrap();
    let id = ObjectId(3);
    field.update(id, &cells(&[(0, 0), (1, 0)], TAG));
    field.update(id, &cells(&[(0, 1), (1, 1)], TAG));

    assert!(field.get(0, 0).is_none());
    assert!(field.get(1, 0).is_none());
    assert_eq!(field.owner_at(Point::new(0, 1)), Some(id));
    assert_eq!(field.cells_of(id), &[Point::new(0, 1), Point::new(1, 1)]);
    assert_eq!(field.occupied().count(), 2);
}

#[test]
fn test_clear_drops_object_from_children() {
    let mut field = Field::new(4, 4).unwrap();
    field.update(ObjectId(1), &cells(&[(0, 0)], TAG));
    field.update(ObjectId(2), &cells(&[(3, 3)], TAG));
    field.clear(ObjectId(1));
    field.clear(ObjectId(9));

    assert_eq!(field.children().collect::<Vec<_>>(), vec![ObjectId(2)]);
    assert!(!field.is_tracked(ObjectId(1)));
}

#[test]
fn test_full_row_clear_leaves_row_empty() {
    let mut field = Field::new(4, 3).unwrap();
    let mut objects = Objects::new();
    let a = add_piece(&mut field, &mut objects, &[(0, 2), (1, 2)]);
    let b = add_piece(&mut field, &mut objects, &[(2, 2), (3, 2), (3, 1)]);

    assert!(field.check_filled(2, &objects));
    assert!(!field.check_filled(1, &objects));

    let removed = field.remove_line(2, &mut objects);
    assert_eq!(removed.len(), 4);
    assert!((0..4).all(|x| field.get(x, 2).is_none()));

    assert!(objects.piece(a).unwrap().is_destroyed());
    assert_eq!(objects.piece(b).unwrap().cells(), &cells(&[(3, 1)], TAG)[..]);
    assert_eq!(objects.reap_destroyed(), vec![a]);
}

#[test]
fn test_wall_rows_are_never_filled_or_removed() {
    let mut field = Field::new(3, 2).unwrap();
    let mut objects = Objects::new();
    let wall = add_wall(&mut field, &mut objects, &[(0, 1), (1, 1), (2, 1), (0, 0)]);
    add_piece(&mut field, &mut objects, &[(1, 0), (2, 0)]);

    assert!(!field.check_filled(1, &objects));
    assert!(field.check_filled(0, &objects));

    let removed = field.remove_line(0, &mut objects);
    assert_eq!(removed.len(), 2);
    assert_eq!(field.owner_at(Point::new(0, 0)), Some(wall));
    assert!(field.remove_at(0, 1, &mut objects).is_none());
}

#[test]
fn test_restructure_registers_fragments() {
    let mut field = Field::new(5, 5).unwrap();
    let mut objects = Objects::new();
    let id = add_piece(&mut field, &mut objects, &[(0, 0), (0, 1), (0, 2), (0, 3)]);

    field.remove_at(0, 1, &mut objects).unwrap();
    let created = field.restructure(&mut objects);

    assert_eq!(created.len(), 1);
    let fragment = created[0];
    assert_eq!(field.cells_of(fragment), &[Point::new(0, 0)]);
    assert_eq!(field.cells_of(id), &[Point::new(0, 2), Point::new(0, 3)]);
    assert_eq!(objects.piece(fragment).unwrap().kind(), Some(PieceKind::Z));
}

#[test]
fn test_restructure_splits_every_isolated_cell() {
    let mut field = Field::new(7, 1).unwrap();
    let mut objects = Objects::new();
    let id = add_piece(&mut field, &mut objects, &[(0, 0), (2, 0), (4, 0), (6, 0)]);

    let created = field.restructure(&mut objects);
    assert_eq!(created.len(), 3);
    assert_eq!(objects.piece(id).unwrap().len(), 1);
    assert_eq!(field.children().count(), 4);
}

#[test]
fn test_owners_at_is_distinct_in_first_seen_order() {
    let mut field = Field::new(4, 1).unwrap();
    field.update(ObjectId(5), &cells(&[(2, 0), (3, 0)], TAG));
    field.update(ObjectId(1), &cells(&[(0, 0)], TAG));

    let owners = field.owners_at([
        Point::new(3, 0),
        Point::new(2, 0),
        Point::new(1, 0),
        Point::new(0, 0),
        Point::new(-4, 0),
    ]);
    assert_eq!(owners, vec![ObjectId(5), ObjectId(1)]);
}

//! Pieces module - tetromino shape catalog
//!
//! Each kind is an immutable table of four offsets from the spawn origin
//! (x grows to the right, y grows downwards). The first offset is the
//! rotation pivot, so every table lists its most central cell first.

use arrayvec::ArrayVec;

use crate::types::{Cell, PieceKind, Point, VisualTag, MAX_PIECE_CELLS};

/// Shape of a piece - 4 offsets from the piece origin, pivot first
pub type PieceShape = [Point; MAX_PIECE_CELLS];

const fn p(x: i32, y: i32) -> Point {
    Point::new(x, y)
}

/// I piece
/// ```text
/// ■ ■ ■ ■
/// ```
const I_SHAPE: PieceShape = [p(1, 0), p(0, 0), p(2, 0), p(3, 0)];

/// O piece
/// ```text
/// ■ ■
/// ■ ■
/// ```
const O_SHAPE: PieceShape = [p(0, 0), p(1, 0), p(0, 1), p(1, 1)];

/// S piece
/// ```text
///   ■ ■
/// ■ ■
/// ```
const S_SHAPE: PieceShape = [p(1, 0), p(2, 0), p(0, 1), p(1, 1)];

/// Z piece
/// ```text
/// ■ ■
///   ■ ■
/// ```
const Z_SHAPE: PieceShape = [p(1, 0), p(0, 0), p(1, 1), p(2, 1)];

/// L piece
/// ```text
///     ■
/// ■ ■ ■
/// ```
const L_SHAPE: PieceShape = [p(1, 1), p(0, 1), p(2, 1), p(2, 0)];

/// J piece
/// ```text
/// ■
/// ■ ■ ■
/// ```
const J_SHAPE: PieceShape = [p(1, 1), p(0, 1), p(2, 1), p(0, 0)];

/// T piece
/// ```text
///   ■
/// ■ ■ ■
/// ```
const T_SHAPE: PieceShape = [p(1, 1), p(0, 1), p(2, 1), p(1, 0)];

/// Get the offsets for a piece kind
pub fn get_shape(kind: PieceKind) -> &'static PieceShape {
    match kind {
        PieceKind::I => &I_SHAPE,
        PieceKind::O => &O_SHAPE,
        PieceKind::S => &S_SHAPE,
        PieceKind::Z => &Z_SHAPE,
        PieceKind::L => &L_SHAPE,
        PieceKind::J => &J_SHAPE,
        PieceKind::T => &T_SHAPE,
    }
}

/// Visual tag attached to every cell of a kind
pub fn tag_for(kind: PieceKind) -> VisualTag {
    VisualTag::Piece(kind)
}

/// Whether rotating the kind changes its footprint.
///
/// The square looks the same in every orientation, so it is never turned.
pub fn rotates(kind: PieceKind) -> bool {
    kind != PieceKind::O
}

/// Absolute cells of a freshly spawned piece, pivot first
pub fn spawn_cells(kind: PieceKind, origin: Point) -> ArrayVec<Cell, MAX_PIECE_CELLS> {
    let tag = tag_for(kind);
    get_shape(kind)
        .iter()
        .map(|&offset| Cell::at(origin + offset, tag))
        .collect()
}

//! Capability traits composed by the objects living on the field.
//!
//! A [`Piece`](crate::piece::Piece) implements all four; the static
//! [`Wall`](crate::objects::Wall) is only positionable and collidable.

use crate::types::{Cell, ObjectId, Point};

/// Something that occupies grid cells.
pub trait Positionable {
    /// Current cells, in order.
    fn cells(&self) -> &[Cell];

    /// Reference point the object was created at, moved along with it.
    fn origin(&self) -> Point;
}

/// Record of a blocked step, handed to both participants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contact {
    /// The other participant, `None` for the board boundary.
    pub other: Option<ObjectId>,
    /// The unit step that was attempted.
    pub delta: Point,
}

/// Something that can block, and be blocked by, other objects.
pub trait Collidable: Positionable {
    fn is_collidable(&self) -> bool;

    /// Called after a step involving this object was rejected.
    fn on_collided(&mut self, _contact: Contact) {}
}

/// Something pulled down on every gravity tick.
pub trait GravityAffected: Positionable {
    fn gravity_enabled(&self) -> bool;
    fn set_gravity_enabled(&mut self, enabled: bool);
}

/// Rotation direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    Clockwise,
    CounterClockwise,
}

impl Turn {
    pub fn inverse(self) -> Turn {
        match self {
            Turn::Clockwise => Turn::CounterClockwise,
            Turn::CounterClockwise => Turn::Clockwise,
        }
    }
}

/// Something steered by player input.
pub trait PlayerControllable: Positionable {
    fn is_player_controlled(&self) -> bool;
    fn set_player_controlled(&mut self, controlled: bool);

    /// Rotate a quarter turn around the pivot cell, without validation.
    fn rotate(&mut self, turn: Turn);
}

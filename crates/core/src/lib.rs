//! Core simulation engine - pure, deterministic, and testable
//!
//! This crate holds the spatial simulation: the grid-ownership index, the
//! collision oracle, pieces with rotate/rollback and split, and the controller
//! state machine that ties them together. It has no dependency on the
//! terminal or the input device; it consumes discrete move commands and
//! produces a drawable cell list plus game events.
//!
//! - **Deterministic**: the same piece source and inputs produce the same game
//! - **Consistent**: every field mutation keeps slots and owner lists in sync
//! - **Headless**: runs in tests and benches without a terminal
//!
//! # Module Structure
//!
//! - [`capability`]: `Positionable`, `Collidable`, `GravityAffected`, `PlayerControllable`
//! - [`collision`]: pairwise overlap test
//! - [`controller`]: spawn, gravity, moves, locking, line clears, game over
//! - [`field`]: grid slot → owner index with row removal and restructuring
//! - [`map`]: plain-text level parser
//! - [`objects`]: id-addressed arena of walls and pieces
//! - [`piece`]: the mutable tetrimino
//! - [`pieces`]: immutable shape tables
//! - [`rng`]: piece sources
//! - [`snapshot`]: render-facing copy of the controller state
//!
//! # Example
//!
//! ```
//! use fieldtris_core::{Controller, ControllerConfig, EngineContext, MapSpec, RunState, ScriptedPieces};
//! use fieldtris_types::{GameAction, GameEvent, PieceKind};
//!
//! let map = MapSpec::empty(10, 20);
//! let ctx = EngineContext::new(ScriptedPieces::repeat(PieceKind::I));
//! let mut game = Controller::new(&map, ControllerConfig::default(), ctx).unwrap();
//! game.start();
//!
//! game.apply_action(GameAction::MoveLeft);
//! while game.gravity_tick() == RunState::Running {
//!     if game.drain_events().iter().any(|e| matches!(e, GameEvent::Locked(_))) {
//!         break;
//!     }
//! }
//! assert!(game.current_piece().is_some());
//! ```
//!
//! # Timing
//!
//! The caller drives the engine with [`Controller::tick`] and the elapsed
//! milliseconds. Gravity moves every gravity-enabled piece one cell down per
//! interval (500ms by default), lowest pieces first.

pub mod capability;
pub mod collision;
pub mod controller;
pub mod error;
pub mod field;
pub mod map;
pub mod objects;
pub mod piece;
pub mod pieces;
pub mod rng;
pub mod snapshot;

pub use fieldtris_types as types;

// Re-export commonly used types for convenience
pub use capability::{Collidable, Contact, GravityAffected, PlayerControllable, Positionable, Turn};
pub use collision::{collides, collides_scaled, CellScale};
pub use controller::{
    Controller, ControllerConfig, EngineContext, EventObserver, LogObserver, MoveOutcome, Phase,
    RunState,
};
pub use error::{EngineError, MapError};
pub use field::{Field, RemovedCell, Slot};
pub use map::MapSpec;
pub use objects::{Object, Objects, Wall};
pub use piece::Piece;
pub use pieces::{get_shape, rotates, spawn_cells};
pub use rng::{PieceSource, ScriptedPieces, UniformPieces};
pub use snapshot::Snapshot;

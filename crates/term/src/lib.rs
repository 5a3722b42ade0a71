//! Terminal renderer for the falling-block engine.
//!
//! Renders a [`core::Snapshot`] into a simple framebuffer that is flushed to
//! the terminal with crossterm, instead of going through a widget toolkit.
//!
//! Goals:
//! - Keep `core` headless and testable
//! - Draw arbitrary board sizes, including maps with walls
//! - Allow precise control over aspect ratio (e.g. 2 chars wide per cell)

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use fieldtris_core as core;
pub use fieldtris_types as types;

pub use fb::{FrameBuffer, Glyph, Rgb, Style};
pub use game_view::{AnchorY, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};

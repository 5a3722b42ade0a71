//! Fieldtris (workspace facade crate).
//!
//! Re-exports the member crates as `fieldtris::{core, input, term, types}` and
//! holds what only the binary needs: settings, command-line flags and log
//! setup.

pub mod cli;
pub mod logging;
pub mod settings;

pub use fieldtris_core as core;
pub use fieldtris_input as input;
pub use fieldtris_term as term;
pub use fieldtris_types as types;

//! Input mapping: keys and scripts become actions, and held actions become
//! the per-frame `ControlState` the kernel consumes.
//!
//! # Invariants
//! - The kernel never sees raw key names.
//! - When both rotations are held, counter-clockwise wins.

pub mod action;
pub mod bindings;
pub mod script;

pub use action::{Action, UnknownAction};
pub use bindings::{InputState, KeyBindings};
pub use script::{InputScript, ScriptError, ScriptFrame};

pub fn crate_info() -> &'static str {
    "lander-input v0.1.0"
}

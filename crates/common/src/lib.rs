//! Shared value types for the lander workspace.

mod types;

pub use types::{ControlState, EntityId, EntityKind, Outcome, Rotation, TextureHandle};

//! Game kernel: authoritative session state, entity physics, collision
//! resolution and fixed-timestep stepping.
//!
//! # Invariants
//! - Within one update, the vertical collision pass runs before the
//!   horizontal pass, and both run before integration.
//! - Collision resolution only moves the entity being updated.
//! - Once a descent is landed or crashed, the simulation is frozen.
//! - Identical config and control sequences produce identical state.

pub mod animation;
pub mod collision;
pub mod config;
pub mod entity;
pub mod level;
pub mod timestep;
pub mod world;

pub use animation::SpriteAnimation;
pub use collision::CONTACT_EPSILON;
pub use config::{ConfigError, LanderConfig};
pub use entity::{Contacts, Entity};
pub use level::{Level, Roles};
pub use timestep::FixedTimestep;
pub use world::{World, WorldEvent};

pub fn crate_info() -> &'static str {
    "lander-kernel v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("kernel"));
    }
}

use serde::{Deserialize, Serialize};

/// Identifier for an entity in the world.
///
/// Ids are handed out sequentially by the world, so ordering by id is the
/// order entities were created in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u64);

impl EntityId {
    /// The id that follows this one.
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Archetype of an entity. Collision outcomes depend on the kind of the
/// platform that was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    /// Safe pad underneath the spawn point.
    StartPlatform,
    /// Ground rock. Touching one crashes the craft.
    Platform,
    /// Target pad. Touching down on it from above wins.
    VictoryPlatform,
    Player,
    /// Full-screen win/lose overlay.
    Screen,
    /// Thruster flame attached below the player.
    Fire,
    Background,
}

impl EntityKind {
    /// Whether this kind is something the player can collide with.
    pub fn is_platform(self) -> bool {
        matches!(
            self,
            Self::StartPlatform | Self::Platform | Self::VictoryPlatform
        )
    }
}

/// Result of a descent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Outcome {
    /// Still in the air (or resting on the start pad).
    #[default]
    Flying,
    Crashed,
    Landed,
}

impl Outcome {
    /// Whether the game is over.
    pub fn is_decided(self) -> bool {
        !matches!(self, Self::Flying)
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Flying => "flying",
            Self::Crashed => "crashed",
            Self::Landed => "landed",
        };
        f.write_str(s)
    }
}

/// Requested rotation direction for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Rotation {
    #[default]
    None,
    /// Positive angular speed.
    CounterClockwise,
    /// Negative angular speed.
    Clockwise,
}

/// Control snapshot for a single frame.
///
/// The kernel consumes controls, never raw key events, so scripted runs,
/// replays and interactive front ends drive the same game logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ControlState {
    pub rotation: Rotation,
    pub thrust: bool,
}

impl ControlState {
    /// No input held.
    pub const IDLE: Self = Self {
        rotation: Rotation::None,
        thrust: false,
    };
}

/// Opaque handle to a texture owned by the rendering layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TextureHandle(pub u64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_ids_are_ordered() {
        let a = EntityId(0);
        let b = a.next();
        assert!(a < b);
        assert_eq!(b, EntityId(1));
    }

    #[test]
    fn platform_kinds() {
        assert!(EntityKind::Platform.is_platform());
        assert!(EntityKind::VictoryPlatform.is_platform());
        assert!(EntityKind::StartPlatform.is_platform());
        assert!(!EntityKind::Player.is_platform());
        assert!(!EntityKind::Fire.is_platform());
    }

    #[test]
    fn outcome_default_is_flying() {
        assert_eq!(Outcome::default(), Outcome::Flying);
        assert!(!Outcome::Flying.is_decided());
        assert!(Outcome::Crashed.is_decided());
        assert!(Outcome::Landed.is_decided());
    }

    #[test]
    fn idle_controls() {
        assert_eq!(ControlState::default(), ControlState::IDLE);
        assert!(!ControlState::IDLE.thrust);
    }
}

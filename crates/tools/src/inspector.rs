use glam::Vec2;
use lander_common::{EntityId, EntityKind, Outcome};
use lander_kernel::{Contacts, World};

/// Read-only queries against a running session, for debugging and
/// development output.
pub struct SessionInspector;

impl SessionInspector {
    pub fn summary(world: &World) -> SessionSummary {
        SessionSummary {
            tick: world.tick(),
            fuel: world.fuel(),
            outcome: world.outcome(),
            entity_count: world.entity_count(),
            pending_events: world.events().len(),
        }
    }

    pub fn inspect_entity(world: &World, id: EntityId) -> Option<EntityInfo> {
        world.entity(id).map(|e| EntityInfo {
            id,
            kind: e.kind(),
            active: e.is_active(),
            position: e.position(),
            velocity: e.velocity(),
            size: e.size(),
            angle_degrees: e.angle().to_degrees(),
            contacts: e.contacts(),
        })
    }

    /// All entity ids in id order.
    pub fn list_entities(world: &World) -> Vec<EntityId> {
        world.entities().map(|(id, _)| id).collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionSummary {
    pub tick: u64,
    pub fuel: u32,
    pub outcome: Outcome,
    pub entity_count: usize,
    pub pending_events: usize,
}

impl std::fmt::Display for SessionSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Session: tick={} fuel={} outcome={} entities={} pending_events={}",
            self.tick, self.fuel, self.outcome, self.entity_count, self.pending_events
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EntityInfo {
    pub id: EntityId,
    pub kind: EntityKind,
    pub active: bool,
    pub position: Vec2,
    pub velocity: Vec2,
    pub size: Vec2,
    pub angle_degrees: f32,
    pub contacts: Contacts,
}

impl std::fmt::Display for EntityInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Entity {} {:?}{} pos=({:.2}, {:.2}) vel=({:.2}, {:.2}) size=({:.2}, {:.2})",
            self.id,
            self.kind,
            if self.active { "" } else { " (inactive)" },
            self.position.x,
            self.position.y,
            self.velocity.x,
            self.velocity.y,
            self.size.x,
            self.size.y,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_fresh_session() {
        let world = World::default();
        let summary = SessionInspector::summary(&world);
        assert_eq!(summary.tick, 0);
        assert_eq!(summary.fuel, 1000);
        assert_eq!(summary.outcome, Outcome::Flying);
        assert_eq!(summary.entity_count, 18);
        assert_eq!(summary.pending_events, 0);
    }

    #[test]
    fn summary_after_steps() {
        let mut world = World::default();
        world.step();
        world.step();
        let summary = SessionInspector::summary(&world);
        assert_eq!(summary.tick, 2);
        assert_eq!(summary.pending_events, 2);
    }

    #[test]
    fn inspect_player() {
        let world = World::default();
        let info = SessionInspector::inspect_entity(&world, world.roles().player).unwrap();
        assert_eq!(info.kind, EntityKind::Player);
        assert_eq!(info.position, Vec2::new(-4.0, 2.0));
        assert_eq!(info.size, Vec2::new(0.7, 0.5));
        assert!(info.active);
    }

    #[test]
    fn inspect_missing_entity() {
        let world = World::default();
        assert!(SessionInspector::inspect_entity(&world, EntityId(999)).is_none());
    }

    #[test]
    fn list_entities_in_order() {
        let world = World::default();
        let ids = SessionInspector::list_entities(&world);
        assert_eq!(ids.len(), 18);
        assert_eq!(ids[0], EntityId(0));
        assert_eq!(ids[17], EntityId(17));
    }

    #[test]
    fn display_formats() {
        let world = World::default();
        let s = SessionInspector::summary(&world).to_string();
        assert!(s.contains("tick=0"));
        assert!(s.contains("outcome=flying"));

        let flame = SessionInspector::inspect_entity(&world, world.roles().flame).unwrap();
        assert!(flame.to_string().contains("(inactive)"));
    }
}

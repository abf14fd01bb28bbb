use glam::{Vec2, Vec3};
use lander_common::{EntityId, EntityKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::animation::SpriteAnimation;
use crate::config::{BodyConfig, LanderConfig};
use crate::entity::Entity;

/// Ids of the entities that play a fixed part in the level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roles {
    pub background: EntityId,
    pub win_screen: EntityId,
    pub lose_screen: EntityId,
    pub player: EntityId,
    pub flame: EntityId,
    pub victory_platform: EntityId,
    pub start_platform: EntityId,
    pub rocks: Vec<EntityId>,
}

/// A freshly built level, ready to be handed to the world.
#[derive(Debug, Clone)]
pub struct Level {
    /// The player is kept apart from the rest so it can be updated against
    /// borrowed collidables.
    pub player: Entity,
    pub entities: BTreeMap<EntityId, Entity>,
    pub roles: Roles,
    /// Collision order: victory platform, start platform, then rocks left to right.
    pub collidables: Vec<EntityId>,
}

struct IdAllocator(EntityId);

impl IdAllocator {
    fn next(&mut self) -> EntityId {
        let id = self.0;
        self.0 = id.next();
        id
    }
}

impl Level {
    /// Lay out the level described by `config`.
    pub fn build(config: &LanderConfig) -> Self {
        let level = &config.level;
        let mut ids = IdAllocator(EntityId(0));
        let mut entities = BTreeMap::new();

        let background = ids.next();
        let mut bg = Entity::new(EntityKind::Background, true);
        let s = level.background_scale;
        bg.set_scale(Vec3::new(s, s, 1.0), 1.0, 1.0);
        settle(&mut bg);
        entities.insert(background, bg);

        let win_screen = ids.next();
        entities.insert(win_screen, screen(level.screen_scale));
        let lose_screen = ids.next();
        entities.insert(lose_screen, screen(level.screen_scale));

        let player_id = ids.next();
        let mut player = Entity::new(EntityKind::Player, true);
        player.set_position(level.player.position);
        player.set_size(level.player.size.x, level.player.size.y);
        player.set_acceleration(Vec2::new(0.0, config.physics.gravity));
        player.set_speed(1.0);
        settle(&mut player);

        let flame = ids.next();
        let mut fire = Entity::new(EntityKind::Fire, false);
        fire.set_animation(SpriteAnimation::new(vec![0, 1], 2, 1));
        let f = level.flame_scale;
        fire.set_scale(Vec3::splat(f), f, f);
        fire.follow(0.0, &player);
        entities.insert(flame, fire);

        let victory_platform = ids.next();
        entities.insert(
            victory_platform,
            platform(EntityKind::VictoryPlatform, &level.victory_platform),
        );

        let start_platform = ids.next();
        entities.insert(
            start_platform,
            platform(EntityKind::StartPlatform, &level.start_platform),
        );

        let mut rocks = Vec::with_capacity(level.rocks.count as usize);
        for position in level.rocks.positions() {
            let id = ids.next();
            let body = BodyConfig {
                position,
                size: level.rocks.size,
            };
            entities.insert(id, platform(EntityKind::Platform, &body));
            rocks.push(id);
        }

        let mut collidables = vec![victory_platform, start_platform];
        collidables.extend(rocks.iter().copied());

        tracing::debug!(
            entities = entities.len() + 1,
            collidables = collidables.len(),
            "level built"
        );

        Self {
            player,
            entities,
            roles: Roles {
                background,
                win_screen,
                lose_screen,
                player: player_id,
                flame,
                victory_platform,
                start_platform,
                rocks,
            },
            collidables,
        }
    }
}

fn screen(scale: f32) -> Entity {
    let mut e = Entity::new(EntityKind::Screen, false);
    e.set_scale(Vec3::new(scale, scale, 1.0), scale, scale);
    settle(&mut e);
    e
}

fn platform(kind: EntityKind, body: &BodyConfig) -> Entity {
    let mut e = Entity::new(kind, true);
    e.set_position(body.position);
    e.set_size(body.size.x, body.size.y);
    settle(&mut e);
    e
}

/// Zero-length update so a static entity's model matrix reflects its placement.
fn settle(e: &mut Entity) {
    e.update(0.0, &[]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Mat4;

    #[test]
    fn default_level_layout() {
        let level = Level::build(&LanderConfig::default());
        assert_eq!(level.roles.rocks.len(), 11);
        assert_eq!(level.collidables.len(), 13);
        assert_eq!(level.collidables[0], level.roles.victory_platform);
        assert_eq!(level.collidables[1], level.roles.start_platform);
        // every entity but the player lives in the map
        assert_eq!(level.entities.len(), 17);
        assert!(!level.entities.contains_key(&level.roles.player));
    }

    #[test]
    fn overlays_start_hidden() {
        let level = Level::build(&LanderConfig::default());
        assert!(!level.entities[&level.roles.win_screen].is_active());
        assert!(!level.entities[&level.roles.lose_screen].is_active());
        assert!(!level.entities[&level.roles.flame].is_active());
        assert!(level.entities[&level.roles.background].is_active());
    }

    #[test]
    fn player_spawns_under_gravity() {
        let level = Level::build(&LanderConfig::default());
        assert_eq!(level.player.position(), Vec2::new(-4.0, 2.0));
        assert_eq!(level.player.size(), Vec2::new(0.7, 0.5));
        assert_eq!(level.player.acceleration(), Vec2::new(0.0, -1.5));
    }

    #[test]
    fn statics_have_placed_model_matrices() {
        let level = Level::build(&LanderConfig::default());
        let pad = &level.entities[&level.roles.victory_platform];
        assert_eq!(pad.size(), Vec2::splat(0.8));
        assert_ne!(pad.model_matrix(), Mat4::IDENTITY);
        let origin = pad.model_matrix().transform_point3(Vec3::ZERO);
        assert_eq!(origin, Vec3::new(3.0, 1.5, 0.0));
    }

    #[test]
    fn ids_are_sequential() {
        let level = Level::build(&LanderConfig::default());
        let ids: Vec<u64> = level.entities.keys().map(|id| id.0).collect();
        assert_eq!(ids[0], 0);
        assert_eq!(level.roles.player, EntityId(3));
        assert_eq!(*level.roles.rocks.last().unwrap(), EntityId(17));
    }
}

//! Axis-aligned box collision detection and per-axis resolution.
//!
//! Resolution is split into a vertical and a horizontal pass. The vertical
//! pass decides landings: touching down on a victory platform wins, touching
//! down on a rock or hitting anything from below crashes. Any side contact
//! crashes regardless of what was hit.

use glam::Vec2;
use lander_common::{EntityKind, Outcome};

use crate::entity::Entity;

/// Penetration depth below which two boxes count as resting contact rather
/// than overlap. Keeps an entity that was just pushed out from registering a
/// second collision from rounding error alone.
pub const CONTACT_EPSILON: f32 = 1e-5;

/// Signed separation between two boxes on each axis. Negative on both axes
/// means the boxes overlap.
pub fn box_gap(a_pos: Vec2, a_size: Vec2, b_pos: Vec2, b_size: Vec2) -> Vec2 {
    (a_pos - b_pos).abs() - (a_size + b_size) / 2.0
}

impl Entity {
    /// Whether this entity's box overlaps `other`'s. Inactive entities never
    /// collide.
    pub fn check_collision(&self, other: &Entity) -> bool {
        if !self.is_active() || !other.is_active() {
            return false;
        }
        let gap = box_gap(self.position, self.size(), other.position, other.size());
        gap.x < -CONTACT_EPSILON && gap.y < -CONTACT_EPSILON
    }

    /// Vertical resolution pass.
    ///
    /// Pushes the entity out along y against its direction of travel and
    /// records the outcome of the contact.
    pub fn check_collision_y(&mut self, collidables: &[&Entity]) {
        for other in collidables {
            if !self.check_collision(other) {
                continue;
            }

            let y_distance = (self.position.y - other.position.y).abs();
            let y_overlap = (y_distance - self.height / 2.0 - other.height / 2.0).abs();

            if self.velocity.y > 0.0 {
                self.position.y -= y_overlap;
                self.velocity.y = 0.0;
                self.contacts.top = true;
                self.outcome = Outcome::Crashed;
                tracing::debug!(kind = ?other.kind(), overlap = y_overlap, "hit from below");
            } else if self.velocity.y < 0.0 {
                self.position.y += y_overlap;
                self.velocity = Vec2::ZERO;
                self.contacts.bottom = true;
                match other.kind() {
                    EntityKind::VictoryPlatform => self.outcome = Outcome::Landed,
                    EntityKind::Platform => self.outcome = Outcome::Crashed,
                    _ => {}
                }
                tracing::debug!(kind = ?other.kind(), overlap = y_overlap, "touchdown");
            }
        }
    }

    /// Horizontal resolution pass. Any remaining overlap is a side impact.
    pub fn check_collision_x(&mut self, collidables: &[&Entity]) {
        if !self.is_active() {
            return;
        }
        for other in collidables {
            if !self.check_collision(other) {
                continue;
            }

            let x_distance = (self.position.x - other.position.x).abs();
            let x_overlap = (x_distance - self.width / 2.0 - other.width / 2.0).abs();

            if self.velocity.x > 0.0 {
                self.position.x -= x_overlap;
                self.velocity.x = 0.0;
                self.contacts.right = true;
            } else if self.velocity.x < 0.0 {
                self.position.x += x_overlap;
                self.velocity.x = 0.0;
                self.contacts.left = true;
            }
            self.outcome = Outcome::Crashed;
            tracing::debug!(kind = ?other.kind(), overlap = x_overlap, "side impact");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lander_common::EntityKind;

    fn platform(kind: EntityKind, x: f32, y: f32, w: f32, h: f32) -> Entity {
        let mut e = Entity::new(kind, true);
        e.set_position(Vec2::new(x, y));
        e.set_size(w, h);
        e
    }

    fn player(x: f32, y: f32, velocity: Vec2) -> Entity {
        let mut e = Entity::new(EntityKind::Player, true);
        e.set_position(Vec2::new(x, y));
        e.set_size(0.7, 0.5);
        e.set_velocity(velocity);
        e
    }

    #[test]
    fn overlapping_boxes_collide() {
        let a = player(0.0, 0.0, Vec2::ZERO);
        let b = platform(EntityKind::Platform, 0.5, 0.5, 1.0, 1.0);
        assert!(a.check_collision(&b));
        assert!(b.check_collision(&a));
    }

    #[test]
    fn separated_boxes_do_not_collide() {
        let a = player(0.0, 0.0, Vec2::ZERO);
        let b = platform(EntityKind::Platform, 2.0, 0.0, 1.0, 1.0);
        assert!(!a.check_collision(&b));
    }

    #[test]
    fn touching_boxes_do_not_collide() {
        let a = platform(EntityKind::Platform, 0.0, 0.0, 1.0, 1.0);
        let b = platform(EntityKind::Platform, 1.0, 0.0, 1.0, 1.0);
        assert!(!a.check_collision(&b));
    }

    #[test]
    fn inactive_entities_never_collide() {
        let a = player(0.0, 0.0, Vec2::ZERO);
        let mut b = platform(EntityKind::Platform, 0.0, 0.0, 1.0, 1.0);
        b.set_active(false);
        assert!(!a.check_collision(&b));
    }

    #[test]
    fn landing_on_victory_platform_wins() {
        let pad = platform(EntityKind::VictoryPlatform, 0.0, 0.0, 0.8, 0.8);
        let mut p = player(0.1, 0.6, Vec2::new(0.3, -1.0));
        p.check_collision_y(&[&pad]);

        assert_eq!(p.outcome(), Outcome::Landed);
        assert!(p.contacts().bottom);
        assert_eq!(p.velocity(), Vec2::ZERO);
        // pushed up to rest on the pad's top edge
        assert!((p.position().y - 0.65).abs() < 1e-6);
        assert!(!p.check_collision(&pad));
    }

    #[test]
    fn landing_on_rock_crashes() {
        let rock = platform(EntityKind::Platform, 0.0, 0.0, 1.0, 1.0);
        let mut p = player(0.0, 0.7, Vec2::new(0.0, -2.0));
        p.check_collision_y(&[&rock]);
        assert_eq!(p.outcome(), Outcome::Crashed);
        assert!(p.contacts().bottom);
    }

    #[test]
    fn landing_on_start_platform_is_safe() {
        let pad = platform(EntityKind::StartPlatform, 0.0, 0.0, 1.0, 1.0);
        let mut p = player(0.0, 0.7, Vec2::new(0.0, -1.0));
        p.check_collision_y(&[&pad]);
        assert_eq!(p.outcome(), Outcome::Flying);
        assert!(p.contacts().bottom);
        assert!((p.position().y - 0.75).abs() < 1e-6);
    }

    #[test]
    fn hitting_from_below_crashes() {
        let pad = platform(EntityKind::VictoryPlatform, 0.0, 1.0, 0.8, 0.8);
        let mut p = player(0.0, 0.4, Vec2::new(0.0, 1.0));
        p.check_collision_y(&[&pad]);
        assert_eq!(p.outcome(), Outcome::Crashed);
        assert!(p.contacts().top);
        assert_eq!(p.velocity().y, 0.0);
        assert!((p.position().y - 0.35).abs() < 1e-6);
    }

    #[test]
    fn zero_vertical_velocity_skips_vertical_pass() {
        let pad = platform(EntityKind::Platform, 0.0, 0.0, 1.0, 1.0);
        let mut p = player(0.0, 0.6, Vec2::ZERO);
        let before = p.position();
        p.check_collision_y(&[&pad]);
        assert_eq!(p.position(), before);
        assert_eq!(p.outcome(), Outcome::Flying);
    }

    #[test]
    fn side_impact_moving_right() {
        let pad = platform(EntityKind::VictoryPlatform, 3.0, 1.5, 0.8, 0.8);
        let mut p = player(2.5, 1.5, Vec2::new(1.0, 0.0));
        p.check_collision_x(&[&pad]);
        assert!(p.contacts().right);
        assert_eq!(p.outcome(), Outcome::Crashed);
        assert_eq!(p.velocity().x, 0.0);
        assert!((p.position().x - 2.25).abs() < 1e-6);
    }

    #[test]
    fn side_impact_moving_left() {
        let pad = platform(EntityKind::StartPlatform, 0.0, 0.0, 1.0, 1.0);
        let mut p = player(0.8, 0.0, Vec2::new(-1.0, 0.0));
        p.check_collision_x(&[&pad]);
        assert!(p.contacts().left);
        assert_eq!(p.outcome(), Outcome::Crashed);
        assert!((p.position().x - 0.85).abs() < 1e-6);
    }

    #[test]
    fn side_overlap_without_velocity_still_crashes() {
        let pad = platform(EntityKind::StartPlatform, 0.0, 0.0, 1.0, 1.0);
        let mut p = player(0.8, 0.0, Vec2::ZERO);
        p.check_collision_x(&[&pad]);
        assert_eq!(p.outcome(), Outcome::Crashed);
        assert!(!p.contacts().any());
    }

    #[test]
    fn vertical_resolution_clears_horizontal_pass() {
        let pad = platform(EntityKind::VictoryPlatform, 0.0, 0.0, 0.8, 0.8);
        let mut p = player(0.2, 0.6, Vec2::new(0.5, -1.0));
        p.update(0.0, &[&pad]);
        assert_eq!(p.outcome(), Outcome::Landed);
        assert!(!p.contacts().right);
    }

    #[test]
    fn last_collidable_decides_outcome() {
        let pad = platform(EntityKind::VictoryPlatform, 0.0, 0.0, 0.8, 0.8);
        let rock = platform(EntityKind::Platform, 0.5, 0.0, 0.8, 0.8);
        let mut p = player(0.25, 0.6, Vec2::new(0.0, -1.0));
        // the pad pushes the player clear, so the rock no longer overlaps
        p.check_collision_y(&[&pad, &rock]);
        assert_eq!(p.outcome(), Outcome::Landed);
    }

    #[test]
    fn inactive_entity_skips_horizontal_pass() {
        let pad = platform(EntityKind::Platform, 0.0, 0.0, 1.0, 1.0);
        let mut p = player(0.8, 0.0, Vec2::new(-1.0, 0.0));
        p.set_active(false);
        p.check_collision_x(&[&pad]);
        assert_eq!(p.outcome(), Outcome::Flying);
    }

    #[test]
    fn box_gap_is_signed() {
        let gap = box_gap(Vec2::ZERO, Vec2::ONE, Vec2::new(3.0, 0.5), Vec2::ONE);
        assert_eq!(gap, Vec2::new(2.0, -0.5));
    }
}

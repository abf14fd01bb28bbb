use glam::{Mat4, Vec2, Vec3};
use lander_common::{EntityKind, Outcome};
use serde::{Deserialize, Serialize};

use crate::animation::SpriteAnimation;

/// Offset of an attached sprite from its parent, in the parent's rotated frame.
pub const FOLLOW_OFFSET: Vec3 = Vec3::new(0.0, -0.5, 0.0);

/// Which sides of an entity touched something during the last update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Contacts {
    pub top: bool,
    pub bottom: bool,
    pub left: bool,
    pub right: bool,
}

impl Contacts {
    pub fn any(&self) -> bool {
        self.top || self.bottom || self.left || self.right
    }
}

/// A game object: kinematic state, an axis-aligned collision box and the
/// model transform handed to the renderer.
///
/// Only the entity being updated ever moves during collision resolution;
/// collidables are read-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    kind: EntityKind,
    active: bool,

    pub(crate) position: Vec2,
    pub(crate) velocity: Vec2,
    acceleration: Vec2,
    movement: Vec2,
    speed: f32,
    scale: Vec3,
    angle: f32,
    angle_speed: f32,

    pub(crate) width: f32,
    pub(crate) height: f32,
    pub(crate) contacts: Contacts,
    pub(crate) outcome: Outcome,

    animation: Option<SpriteAnimation>,
    #[serde(skip, default = "identity")]
    model: Mat4,
}

fn identity() -> Mat4 {
    Mat4::IDENTITY
}

impl Default for Entity {
    fn default() -> Self {
        Self::new(EntityKind::Background, true)
    }
}

impl Entity {
    /// Create an entity at the origin with unit scale and a 1x1 box.
    pub fn new(kind: EntityKind, active: bool) -> Self {
        Self {
            kind,
            active,
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            acceleration: Vec2::ZERO,
            movement: Vec2::ZERO,
            speed: 0.0,
            scale: Vec3::ONE,
            angle: 0.0,
            angle_speed: 0.0,
            width: 1.0,
            height: 1.0,
            contacts: Contacts::default(),
            outcome: Outcome::Flying,
            animation: None,
            model: Mat4::IDENTITY,
        }
    }

    /// Advance this entity by `dt` seconds.
    ///
    /// Collisions are resolved first (vertical pass, then horizontal pass)
    /// against the position reached in the previous step, then the entity is
    /// integrated with semi-implicit Euler and its model matrix rebuilt.
    pub fn update(&mut self, dt: f32, collidables: &[&Entity]) {
        self.contacts = Contacts::default();

        self.check_collision_y(collidables);
        self.check_collision_x(collidables);

        if self.movement != Vec2::ZERO || self.kind == EntityKind::Fire {
            if let Some(animation) = &mut self.animation {
                animation.advance(dt);
            }
        }

        self.angle += self.angle_speed * dt;

        self.velocity += self.acceleration * dt;
        self.position += self.velocity * dt;

        self.model = Mat4::from_translation(self.position.extend(0.0))
            * Mat4::from_rotation_z(self.angle)
            * Mat4::from_scale(self.scale);
    }

    /// Attach this entity below `parent`, inheriting its position and angle.
    pub fn follow(&mut self, dt: f32, parent: &Entity) {
        if let Some(animation) = &mut self.animation {
            animation.advance(dt);
        }

        self.model = Mat4::from_translation(parent.position.extend(0.0))
            * Mat4::from_rotation_z(parent.angle)
            * Mat4::from_translation(FOLLOW_OFFSET)
            * Mat4::from_scale(self.scale);
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    pub fn set_kind(&mut self, kind: EntityKind, active: bool) {
        self.kind = kind;
        self.active = active;
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    pub fn acceleration(&self) -> Vec2 {
        self.acceleration
    }

    pub fn set_acceleration(&mut self, acceleration: Vec2) {
        self.acceleration = acceleration;
    }

    pub fn movement(&self) -> Vec2 {
        self.movement
    }

    /// Set the movement intent, normalized if longer than one.
    pub fn set_movement(&mut self, movement: Vec2) {
        self.movement = if movement.length() > 1.0 {
            movement.normalize()
        } else {
            movement
        };
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
    }

    /// Rotation in radians, counter-clockwise.
    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn set_angle(&mut self, angle: f32) {
        self.angle = angle;
    }

    /// Angular speed in radians per second.
    pub fn angle_speed(&self) -> f32 {
        self.angle_speed
    }

    pub fn set_angle_speed(&mut self, angle_speed: f32) {
        self.angle_speed = angle_speed;
    }

    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    /// Set the render scale together with the collision box.
    pub fn set_scale(&mut self, scale: Vec3, height: f32, width: f32) {
        self.scale = scale;
        self.height = height;
        self.width = width;
    }

    /// Set the collision box without touching the render scale.
    pub fn set_size(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    /// Collision box as (width, height).
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn contacts(&self) -> Contacts {
        self.contacts
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn animation(&self) -> Option<&SpriteAnimation> {
        self.animation.as_ref()
    }

    pub fn set_animation(&mut self, animation: SpriteAnimation) {
        self.animation = Some(animation);
    }

    /// Model matrix computed by the last `update` or `follow`.
    pub fn model_matrix(&self) -> Mat4 {
        self.model
    }
}

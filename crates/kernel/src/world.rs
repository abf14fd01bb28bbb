use glam::Vec2;
use lander_common::{ControlState, EntityId, Outcome, Rotation};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::config::LanderConfig;
use crate::entity::Entity;
use crate::level::{Level, Roles};
use crate::timestep::FixedTimestep;

/// An event record produced by the simulation.
///
/// `Stepped` carries the controls in effect for that step, so the log alone
/// is enough to replay a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WorldEvent {
    /// Simulation advanced one fixed step under the given controls.
    Stepped { tick: u64, controls: ControlState },
    /// The tank ran dry during this step.
    FuelDepleted { tick: u64 },
    /// The descent ended.
    OutcomeDecided { tick: u64, outcome: Outcome },
}

/// The authoritative game session.
///
/// All state changes go through `apply_controls`, `update` and `step`.
/// Renderers and tools only read from it.
#[derive(Debug, Clone)]
pub struct World {
    config: LanderConfig,
    player: Entity,
    /// Every entity except the player, in id order.
    entities: BTreeMap<EntityId, Entity>,
    roles: Roles,
    collidables: Vec<EntityId>,
    timestep: FixedTimestep,
    controls: ControlState,
    thrusting: bool,
    fuel: u32,
    outcome: Outcome,
    tick: u64,
    event_log: Vec<WorldEvent>,
}

impl Default for World {
    fn default() -> Self {
        Self::new(LanderConfig::default())
    }
}

impl World {
    /// Build the level described by `config` at tick 0 with a full tank.
    pub fn new(config: LanderConfig) -> Self {
        let Level {
            player,
            entities,
            roles,
            collidables,
        } = Level::build(&config);
        let timestep = FixedTimestep::with_max_frame_time(
            config.physics.fixed_timestep,
            config.physics.max_frame_time,
        );
        let fuel = config.fuel.initial;
        Self {
            config,
            player,
            entities,
            roles,
            collidables,
            timestep,
            controls: ControlState::IDLE,
            thrusting: false,
            fuel,
            outcome: Outcome::Flying,
            tick: 0,
            event_log: Vec::new(),
        }
    }

    pub fn config(&self) -> &LanderConfig {
        &self.config
    }

    /// Number of fixed steps taken so far.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn fuel(&self) -> u32 {
        self.fuel
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Whether thrust is being applied this frame.
    pub fn is_thrusting(&self) -> bool {
        self.thrusting
    }

    /// Controls most recently applied.
    pub fn controls(&self) -> ControlState {
        self.controls
    }

    pub fn roles(&self) -> &Roles {
        &self.roles
    }

    pub fn player(&self) -> &Entity {
        &self.player
    }

    /// Look up any entity, the player included.
    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        if id == self.roles.player {
            Some(&self.player)
        } else {
            self.entities.get(&id)
        }
    }

    pub fn flame(&self) -> Option<&Entity> {
        self.entities.get(&self.roles.flame)
    }

    /// All entities in id order.
    pub fn entities(&self) -> impl Iterator<Item = (EntityId, &Entity)> + '_ {
        let player = self.roles.player;
        self.entities
            .range(..player)
            .map(|(id, e)| (*id, e))
            .chain(std::iter::once((player, &self.player)))
            .chain(self.entities.range(player..).map(|(id, e)| (*id, e)))
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len() + 1
    }

    /// Ids the player collides with, in resolution order.
    pub fn collidables(&self) -> &[EntityId] {
        &self.collidables
    }

    /// Drain and return the event log.
    pub fn drain_events(&mut self) -> Vec<WorldEvent> {
        std::mem::take(&mut self.event_log)
    }

    /// Read-only access to the event log.
    pub fn events(&self) -> &[WorldEvent] {
        &self.event_log
    }

    /// Apply this frame's controls to the player.
    ///
    /// Every frame starts from gravity only with no rotation. Rotation sets
    /// the angular speed; thrust, if there is fuel left, replaces gravity
    /// with an acceleration along the craft's nose and lights the flame.
    /// Ignored once the descent is decided.
    pub fn apply_controls(&mut self, controls: ControlState) {
        if self.outcome.is_decided() {
            return;
        }
        let physics = &self.config.physics;
        self.controls = controls;

        self.player.set_movement(Vec2::ZERO);
        self.player
            .set_acceleration(Vec2::new(0.0, physics.gravity));
        self.player.set_angle_speed(match controls.rotation {
            Rotation::None => 0.0,
            Rotation::CounterClockwise => physics.rotation_speed_degrees.to_radians(),
            Rotation::Clockwise => -physics.rotation_speed_degrees.to_radians(),
        });

        self.thrusting = controls.thrust && self.fuel > 0;
        if self.thrusting {
            self.aim_thrust();
        }
        self.set_flame(self.thrusting);
    }

    /// Point the thrust acceleration along the craft's current nose.
    fn aim_thrust(&mut self) {
        let angle = self.player.angle();
        self.player
            .set_acceleration(Vec2::new(-angle.sin(), angle.cos()) * self.config.physics.thrust);
    }

    /// Feed one frame's elapsed time and run the fixed steps it covers.
    ///
    /// Once the descent is decided the simulation freezes and only the
    /// matching overlay is shown. Returns the number of steps run.
    pub fn update(&mut self, elapsed: f32) -> usize {
        let _span = tracing::info_span!("world_update", tick = self.tick).entered();

        if self.outcome.is_decided() {
            self.show_outcome();
            return 0;
        }

        let steps = self.timestep.advance(elapsed);
        let mut ran = 0;
        for _ in 0..steps {
            self.step();
            ran += 1;
            if self.outcome.is_decided() {
                break;
            }
        }

        tracing::trace!(steps = ran, fuel = self.fuel, "frame update complete");
        ran
    }

    /// Advance the simulation by exactly one fixed step.
    ///
    /// Does nothing once the outcome is decided.
    pub fn step(&mut self) {
        if self.outcome.is_decided() {
            return;
        }
        let dt = self.timestep.step();
        self.tick += 1;
        self.event_log.push(WorldEvent::Stepped {
            tick: self.tick,
            controls: ControlState {
                rotation: self.controls.rotation,
                thrust: self.thrusting,
            },
        });

        // the nose may have turned since the controls were applied
        if self.thrusting {
            self.aim_thrust();
        }

        let collidables: Vec<&Entity> = self
            .collidables
            .iter()
            .filter_map(|id| self.entities.get(id))
            .collect();
        self.player.update(dt, &collidables);

        if let Some(flame) = self.entities.get_mut(&self.roles.flame) {
            flame.follow(dt, &self.player);
        }

        if self.thrusting {
            self.burn_fuel();
        }

        let outcome = self.player.outcome();
        if outcome != self.outcome {
            self.outcome = outcome;
            self.event_log.push(WorldEvent::OutcomeDecided {
                tick: self.tick,
                outcome,
            });
            tracing::info!(
                tick = self.tick,
                %outcome,
                x = self.player.position().x,
                y = self.player.position().y,
                fuel = self.fuel,
                "descent decided"
            );
            self.show_outcome();
        }
    }

    fn burn_fuel(&mut self) {
        self.fuel = self.fuel.saturating_sub(self.config.fuel.per_step);
        if self.fuel == 0 {
            self.event_log
                .push(WorldEvent::FuelDepleted { tick: self.tick });
            tracing::info!(tick = self.tick, "fuel depleted");
            // Out of fuel mid-frame: fall back to gravity for the remaining steps.
            self.thrusting = false;
            self.player
                .set_acceleration(Vec2::new(0.0, self.config.physics.gravity));
            self.set_flame(false);
        }
    }

    fn set_flame(&mut self, active: bool) {
        if let Some(flame) = self.entities.get_mut(&self.roles.flame) {
            flame.set_active(active);
        }
    }

    /// Activate the overlay matching the current outcome.
    fn show_outcome(&mut self) {
        let screen = match self.outcome {
            Outcome::Landed => self.roles.win_screen,
            Outcome::Crashed => self.roles.lose_screen,
            Outcome::Flying => return,
        };
        self.set_flame(false);
        if let Some(e) = self.entities.get_mut(&screen) {
            e.set_active(true);
        }
    }

    /// Rebuild a session by re-running the controls recorded in `events`.
    pub fn replay(config: LanderConfig, events: &[WorldEvent]) -> Self {
        let mut world = Self::new(config);
        for event in events {
            if let WorldEvent::Stepped { controls, .. } = event {
                world.apply_controls(*controls);
                world.step();
            }
        }
        world
    }

    /// Deterministic hash of the session state for comparison.
    pub fn state_hash(&self) -> u64 {
        let mut h: u64 = 0xcbf2_9ce4_8422_2325; // FNV offset basis
        let mix = |h: &mut u64, bytes: &[u8]| {
            for &b in bytes {
                *h ^= b as u64;
                *h = h.wrapping_mul(0x0100_0000_01b3);
            }
        };
        mix(&mut h, &self.tick.to_le_bytes());
        mix(&mut h, &self.fuel.to_le_bytes());
        mix(&mut h, &[self.outcome as u8]);
        for (id, e) in self.entities() {
            mix(&mut h, &id.0.to_le_bytes());
            mix(&mut h, &[e.is_active() as u8]);
            mix(&mut h, &e.position().x.to_le_bytes());
            mix(&mut h, &e.position().y.to_le_bytes());
            mix(&mut h, &e.velocity().x.to_le_bytes());
            mix(&mut h, &e.velocity().y.to_le_bytes());
            mix(&mut h, &e.angle().to_le_bytes());
        }
        h
    }
}

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::api::types::{EntityId, GameEvent};
use crate::components::tilemap::CollisionMap;
use crate::core::constants::{DEFAULT_CONTACT_DAMAGE, TICK_RATE_HZ};
use crate::core::scene::Scene;
use crate::core::time::DEFAULT_MAX_STEPS;
use crate::input::queue::InputQueue;
use crate::systems::combat::CombatSystem;
use crate::systems::movement::{MovementSystem, VerticalContact};

/// Configuration for the engine, provided by the game.
/// Every field falls back to its default when missing from JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Fixed ticks per second (default: 15).
    pub tick_rate_hz: f32,
    /// Maximum ticks run per frame; extra time is dropped (default: 10).
    pub max_steps_per_frame: u32,
    /// Damage an overlapping hostile deals to the player (default: 10).
    pub contact_damage: u32,
    pub player_max_hp: u32,
    /// Invulnerability after the player is hurt, in ms (default: 1000).
    pub invulnerability_ms: f32,
    /// Minimum time between two attacks, in ms (default: 200).
    pub attack_window_ms: f32,
    /// Time between patrol steps, in ms (default: 200).
    pub patrol_interval_ms: f32,
    /// Maximum number of snapshot instances (default: 256).
    pub max_snapshot_instances: usize,
    /// Maximum number of game events per frame (default: 32).
    pub max_events: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            tick_rate_hz: TICK_RATE_HZ,
            max_steps_per_frame: DEFAULT_MAX_STEPS,
            contact_damage: DEFAULT_CONTACT_DAMAGE,
            player_max_hp: 100,
            invulnerability_ms: 1000.0,
            attack_window_ms: 200.0,
            patrol_interval_ms: 200.0,
            max_snapshot_instances: 256,
            max_events: 32,
        }
    }
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("tick rate must be positive and finite, got {0}")]
    InvalidTickRate(f32),

    #[error("max_steps_per_frame must be at least 1")]
    ZeroStepCap,
}

impl GameConfig {
    /// Parse and validate a config from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.tick_rate_hz.is_finite() || self.tick_rate_hz <= 0.0 {
            return Err(ConfigError::InvalidTickRate(self.tick_rate_hz));
        }
        if self.max_steps_per_frame == 0 {
            return Err(ConfigError::ZeroStepCap);
        }
        Ok(())
    }

    /// Duration of one fixed tick in milliseconds.
    pub fn fixed_step_ms(&self) -> f32 {
        1000.0 / self.tick_rate_hz
    }
}

/// The core contract every game must fulfill.
///
/// Per fixed tick the runner calls `update`, then moves every active actor,
/// then calls `resolve_combat`, then steps timers. Combat therefore always
/// sees post-movement positions.
pub trait Game {
    /// Return engine configuration. Called once before init.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Setup initial state: load the map, spawn actors.
    fn init(&mut self, ctx: &mut EngineContext);

    /// Resolve input and AI into movement requests.
    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue);

    /// Resolve attacks and contact damage after movement has run.
    fn resolve_combat(&mut self, _ctx: &mut EngineContext) {}
}

/// Mutable access to engine state, passed to every `Game` hook.
pub struct EngineContext {
    pub scene: Scene,
    pub map: CollisionMap,
    pub movement: MovementSystem,
    pub combat: CombatSystem,
    pub events: Vec<GameEvent>,
    max_events: usize,
    step_ms: f32,
    next_id: u32,
}

impl EngineContext {
    pub fn new() -> Self {
        Self::from_config(&GameConfig::default())
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            scene: Scene::new(),
            map: CollisionMap::new(0, 0),
            movement: MovementSystem::new(),
            combat: CombatSystem::new().with_contact_damage(config.contact_damage),
            events: Vec::with_capacity(config.max_events),
            max_events: config.max_events,
            step_ms: config.fixed_step_ms(),
            next_id: 1,
        }
    }

    /// Generate the next unique entity ID.
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Duration of one fixed tick in milliseconds.
    pub fn step_ms(&self) -> f32 {
        self.step_ms
    }

    /// Emit a game event to be forwarded to the host.
    /// Events past the per-frame cap are dropped.
    pub fn emit_event(&mut self, event: GameEvent) {
        if self.events.len() >= self.max_events {
            log::debug!("event cap reached, dropping {:?}", event);
            return;
        }
        self.events.push(event);
    }

    /// Clear per-frame transient data.
    pub fn clear_frame_data(&mut self) {
        self.events.clear();
    }

    /// Advance every patrolling actor. Games call this from `update` so
    /// hostiles issue their step requests alongside the player's.
    pub fn step_patrols(&mut self) {
        let (movement, map, dt) = (&self.movement, &self.map, self.step_ms);
        for actor in self.scene.iter_mut().filter(|a| a.active) {
            if let Some(patrol) = actor.patrol.as_mut() {
                patrol.tick(&mut actor.body, dt, movement, map);
                actor.flip_x = patrol.direction < 0;
            }
        }
    }

    /// Run one tick of vertical movement for every active actor.
    /// Called by the runner after `Game::update`.
    pub fn step_movement(&mut self) {
        let mut landed = Vec::new();
        for actor in self.scene.iter_mut().filter(|a| a.active) {
            let was_grounded = actor.body.is_grounded;
            let contact = self.movement.update(&mut actor.body, self.step_ms, &self.map);
            if let VerticalContact::Floor { row } = contact {
                if !was_grounded {
                    landed.push(GameEvent::Landed { id: actor.id, row });
                }
            }
        }
        for event in landed {
            self.emit_event(event);
        }
    }

    /// Step health and attack timers. Called by the runner last in each tick.
    pub fn tick_timers(&mut self) {
        let dt = self.step_ms;
        for actor in self.scene.iter_mut() {
            actor.tick_timers(dt);
        }
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new()
    }
}

use glam::Vec2;

use crate::api::types::EntityId;
use crate::components::equipment::Equipment;
use crate::components::health::Health;
use crate::components::timer::Cooldown;
use crate::core::constants::{CELL_SIZE, DEFAULT_ATTACK_DAMAGE};
use crate::core::physics::PhysicsBody;
use crate::systems::combat::{CombatPlayer, Combatant};
use crate::systems::patrol::Patrol;

/// Which side of combat an actor is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActorKind {
    Player,
    Hostile,
}

/// Fat actor record: physics, combat and interpolation state side by side.
/// Presentation objects hold one of these rather than extending it.
#[derive(Debug, Clone)]
pub struct Actor {
    /// Unique identifier.
    pub id: EntityId,
    /// String tag for finding actors by name.
    pub tag: String,
    pub kind: ActorKind,
    /// Inactive actors are skipped by movement, combat and snapshots.
    pub active: bool,
    pub body: PhysicsBody,
    /// Column at the start of the current tick.
    pub prev_grid_x: i32,
    /// Vertical position at the start of the current tick.
    pub prev_logical_y: f32,
    /// Facing negative x.
    pub flip_x: bool,
    pub health: Health,
    pub equipment: Option<Equipment>,
    pub patrol: Option<Patrol>,
    /// Running while a swing is in progress.
    pub attack_window: Cooldown,
}

impl Actor {
    /// Create a new actor with the given ID at the origin.
    pub fn new(id: EntityId, kind: ActorKind) -> Self {
        Self {
            id,
            tag: String::new(),
            kind,
            active: true,
            body: PhysicsBody::default(),
            prev_grid_x: 0,
            prev_logical_y: 0.0,
            flip_x: false,
            health: Health::new(1),
            equipment: None,
            patrol: None,
            attack_window: Cooldown::new(),
        }
    }

    // -- Builder pattern --

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    /// Place the actor. Previous state is reset so the first interpolated
    /// frame does not slide in from the origin.
    pub fn with_body(mut self, body: PhysicsBody) -> Self {
        self.body = body;
        self.capture_state();
        self
    }

    pub fn with_health(mut self, health: Health) -> Self {
        self.health = health;
        self
    }

    pub fn with_equipment(mut self, equipment: Equipment) -> Self {
        self.equipment = Some(equipment);
        self
    }

    pub fn with_patrol(mut self, patrol: Patrol) -> Self {
        self.patrol = Some(patrol);
        self
    }

    pub fn facing_left(mut self, flip_x: bool) -> Self {
        self.flip_x = flip_x;
        self
    }

    // -- Tick bookkeeping --

    /// Copy the current logical position into the previous one. Called once
    /// at the start of every fixed tick.
    pub fn capture_state(&mut self) {
        self.prev_grid_x = self.body.grid_x;
        self.prev_logical_y = self.body.logical_y;
    }

    /// Blend previous and current logical positions for display.
    pub fn visual_position(&self, alpha: f32) -> Vec2 {
        let prev = Vec2::new(self.prev_grid_x as f32 * CELL_SIZE, self.prev_logical_y);
        let current = Vec2::new(self.body.world_x(), self.body.logical_y);
        prev.lerp(current, alpha.clamp(0.0, 1.0))
    }

    /// Step every timer owned by the actor.
    pub fn tick_timers(&mut self, dt_ms: f32) {
        self.health.tick(dt_ms);
        self.attack_window.tick(dt_ms);
    }

    /// Turn toward a horizontal direction. Zero keeps the current facing.
    pub fn face(&mut self, direction: i32) {
        if direction != 0 {
            self.flip_x = direction < 0;
        }
    }

    pub fn is_attacking(&self) -> bool {
        self.attack_window.is_running()
    }

    /// Open a swing window. Refused while the previous one is still running.
    pub fn begin_attack(&mut self, window_ms: f32) -> bool {
        if self.is_attacking() {
            return false;
        }
        self.attack_window.start(window_ms);
        true
    }

    pub fn is_hostile(&self) -> bool {
        self.kind == ActorKind::Hostile
    }
}

impl Combatant for Actor {
    fn grid_x(&self) -> i32 {
        self.body.grid_x
    }

    fn logical_y(&self) -> f32 {
        self.body.logical_y
    }

    fn is_active(&self) -> bool {
        self.active
    }

    /// Hostiles drop out of the simulation when their health runs out.
    /// The player stays active; respawning is the game's decision.
    fn take_damage(&mut self, amount: u32) {
        let taken = self.health.take_damage(amount);
        log::debug!(
            "{:?} {:?} took {} (hp {}/{})",
            self.kind,
            self.id,
            taken,
            self.health.hp,
            self.health.max_hp
        );
        if self.is_hostile() && self.health.is_dead() {
            self.active = false;
        }
    }
}

impl CombatPlayer for Actor {
    fn flip_x(&self) -> bool {
        self.flip_x
    }

    fn is_invulnerable(&self) -> bool {
        self.health.is_invulnerable()
    }

    fn attack_damage(&self) -> u32 {
        self.equipment
            .map_or(DEFAULT_ATTACK_DAMAGE, |e| e.attack_damage())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slime(hp: u32) -> Actor {
        Actor::new(EntityId(2), ActorKind::Hostile)
            .with_body(PhysicsBody::new(3, 16.0))
            .with_health(Health::new(hp))
    }

    #[test]
    fn builder_places_previous_state() {
        let a = Actor::new(EntityId(1), ActorKind::Player).with_body(PhysicsBody::new(4, 24.0));
        assert_eq!(a.prev_grid_x, 4);
        assert_eq!(a.prev_logical_y, 24.0);
        assert_eq!(a.visual_position(0.5), Vec2::new(32.0, 24.0));
    }

    #[test]
    fn visual_position_blends_ticks() {
        let mut a = Actor::new(EntityId(1), ActorKind::Player).with_body(PhysicsBody::new(2, 16.0));
        a.capture_state();
        a.body.grid_x = 3;
        a.body.logical_y = 20.0;

        assert_eq!(a.visual_position(0.0), Vec2::new(16.0, 16.0));
        assert_eq!(a.visual_position(1.0), Vec2::new(24.0, 20.0));
        let mid = a.visual_position(0.5);
        assert!((mid.x - 20.0).abs() < 0.001);
        assert!((mid.y - 18.0).abs() < 0.001);
    }

    #[test]
    fn hostile_deactivates_when_killed() {
        let mut s = slime(2);
        s.take_damage(1);
        assert!(s.active);
        s.take_damage(1);
        assert!(!s.active);
    }

    #[test]
    fn player_stays_active_at_zero_hp() {
        let mut p = Actor::new(EntityId(1), ActorKind::Player).with_health(Health::new(10));
        p.take_damage(10);
        assert!(p.health.is_dead());
        assert!(p.active);
    }

    #[test]
    fn attack_damage_follows_equipment() {
        let p = Actor::new(EntityId(1), ActorKind::Player);
        assert_eq!(p.attack_damage(), DEFAULT_ATTACK_DAMAGE);
        let p = p.with_equipment(Equipment::with_sword(3));
        assert_eq!(p.attack_damage(), 8);
    }

    #[test]
    fn attack_window_blocks_new_swings() {
        let mut p = Actor::new(EntityId(1), ActorKind::Player);
        assert!(p.begin_attack(200.0));
        assert!(!p.begin_attack(200.0));
        p.tick_timers(100.0);
        assert!(p.is_attacking());
        p.tick_timers(100.0);
        assert!(p.begin_attack(200.0));
    }

    #[test]
    fn facing_tracks_last_direction() {
        let mut p = Actor::new(EntityId(1), ActorKind::Player);
        p.face(-1);
        assert!(p.flip_x());
        p.face(0);
        assert!(p.flip_x());
        p.face(1);
        assert!(!p.flip_x());
    }
}

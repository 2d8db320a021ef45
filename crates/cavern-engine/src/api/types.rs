use bytemuck::{Pod, Zeroable};

/// Unique identifier for an actor in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u32);

/// Something the simulation wants the presentation side to know about.
/// Emitted during fixed ticks, collected per frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// A hostile took an attack but survived.
    EnemyHit { id: EntityId, damage: u32, hp_left: u32 },
    /// A hostile's health ran out.
    EnemyDefeated { id: EntityId, grid_x: i32, logical_y: f32 },
    /// Contact damage reached the player.
    PlayerHurt { damage: u32, hp_left: u32 },
    PlayerDefeated,
    /// A falling actor came to rest on `row`.
    Landed { id: EntityId, row: i32 },
}

impl GameEvent {
    pub const KIND_ENEMY_HIT: f32 = 1.0;
    pub const KIND_ENEMY_DEFEATED: f32 = 2.0;
    pub const KIND_PLAYER_HURT: f32 = 3.0;
    pub const KIND_PLAYER_DEFEATED: f32 = 4.0;
    pub const KIND_LANDED: f32 = 5.0;

    /// Flatten into the wire record.
    pub fn to_wire(&self) -> WireEvent {
        match *self {
            GameEvent::EnemyHit { id, damage, hp_left } => {
                WireEvent::new(Self::KIND_ENEMY_HIT, id.0 as f32, damage as f32, hp_left as f32)
            }
            GameEvent::EnemyDefeated { id, grid_x, logical_y } => {
                WireEvent::new(Self::KIND_ENEMY_DEFEATED, id.0 as f32, grid_x as f32, logical_y)
            }
            GameEvent::PlayerHurt { damage, hp_left } => {
                WireEvent::new(Self::KIND_PLAYER_HURT, damage as f32, hp_left as f32, 0.0)
            }
            GameEvent::PlayerDefeated => WireEvent::new(Self::KIND_PLAYER_DEFEATED, 0.0, 0.0, 0.0),
            GameEvent::Landed { id, row } => {
                WireEvent::new(Self::KIND_LANDED, id.0 as f32, row as f32, 0.0)
            }
        }
    }
}

/// A game event as the presentation side reads it.
/// Generic container: `kind` identifies the event, `a/b/c` carry payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct WireEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl WireEvent {
    pub const FLOATS: usize = 4;

    pub fn new(kind: f32, a: f32, b: f32, c: f32) -> Self {
        Self { kind, a, b, c }
    }
}

pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod bridge;
pub mod input;
pub mod assets;

// Re-export key types at crate root for convenience
pub use api::game::{Game, GameConfig, ConfigError, EngineContext};
pub use api::runner::GameRunner;
pub use api::types::{EntityId, GameEvent, WireEvent};
pub use components::actor::{Actor, ActorKind};
pub use components::equipment::{Equipment, SwordDef, SWORDS};
pub use components::health::Health;
pub use components::tilemap::CollisionMap;
pub use components::timer::Cooldown;
pub use crate::core::constants::*;
pub use crate::core::physics::{PhysicsBody, Tile, TileQuery, grid_x_from_world};
pub use crate::core::scene::Scene;
pub use crate::core::time::FixedTimestep;
pub use input::queue::{InputEvent, InputQueue};
pub use assets::level::{Level, LevelDescriptor, LevelError};
pub use bridge::protocol::ProtocolLayout;
pub use bridge::snapshot::{SnapshotBuffer, SnapshotInstance};
pub use systems::combat::{AttackKind, CellBox, CombatPlayer, CombatSystem, Combatant};
pub use systems::movement::{MovementSystem, VerticalContact};
pub use systems::patrol::Patrol;
pub use systems::snapshot::build_snapshot;

//! Contract constants shared by every system.
//!
//! Distances are in world units (pixels), time in milliseconds unless a name
//! says otherwise. These are fixed by the game's design and never read from
//! configuration.

/// Edge length of one grid cell. All horizontal positions and collision
/// alignment are whole multiples of this.
pub const CELL_SIZE: f32 = 8.0;

/// Downward acceleration in units per second squared.
pub const GRAVITY: f32 = 800.0;

/// Apex height of a jump from rest, in units.
pub const JUMP_HEIGHT: f32 = 24.0;

/// Default logic rate of the fixed-step driver.
pub const TICK_RATE_HZ: f32 = 15.0;

/// Duration of one fixed tick at [`TICK_RATE_HZ`].
pub const FIXED_STEP_MS: f32 = 1000.0 / TICK_RATE_HZ;

/// Damage dealt to the player per overlapping hostile per contact check.
pub const DEFAULT_CONTACT_DAMAGE: u32 = 10;

/// Attack damage when no equipment lookup is available.
pub const DEFAULT_ATTACK_DAMAGE: u32 = 1;

/// Offset kept below an entity's bottom edge when sampling the row it
/// occupies, so an entity resting exactly on a boundary does not sample the
/// row beneath it.
pub const EDGE_EPSILON: f32 = 0.01;

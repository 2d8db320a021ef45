use crate::core::constants::{CELL_SIZE, EDGE_EPSILON};

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// Simulation state of anything that moves through the grid.
///
/// Owned by whichever actor embeds it. Only the movement system mutates it,
/// and only inside a fixed tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PhysicsBody {
    /// Horizontal cell index. Changes in whole-cell steps only.
    pub grid_x: i32,
    /// Vertical position of the top edge in world units (y grows downward).
    pub logical_y: f32,
    /// Vertical velocity in units per second. Positive is downward.
    pub velocity_y: f32,
    /// Set by a downward collision snap, cleared by free vertical motion or
    /// a failed ledge check.
    pub is_grounded: bool,
}

impl PhysicsBody {
    pub fn new(grid_x: i32, logical_y: f32) -> Self {
        Self {
            grid_x,
            logical_y,
            velocity_y: 0.0,
            is_grounded: false,
        }
    }

    /// Place the body at a world-space pixel position using the column
    /// rounding policy of [`grid_x_from_world`].
    pub fn at_world(x: f32, y: f32) -> Self {
        Self::new(grid_x_from_world(x), y)
    }

    pub fn with_velocity(mut self, velocity_y: f32) -> Self {
        self.velocity_y = velocity_y;
        self
    }

    pub fn grounded(mut self, is_grounded: bool) -> Self {
        self.is_grounded = is_grounded;
        self
    }

    /// Left edge in world units.
    pub fn world_x(&self) -> f32 {
        self.grid_x as f32 * CELL_SIZE
    }
}

/// A single map cell as seen by collision queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Tile {
    pub collides: bool,
}

impl Tile {
    pub const SOLID: Tile = Tile { collides: true };
    pub const PASSABLE: Tile = Tile { collides: false };
}

/// Answers what occupies a cell.
///
/// Implementations must be pure and accept any coordinate, including
/// negative and out-of-bounds ones. `None` means the same as a
/// non-colliding tile.
pub trait TileQuery {
    fn tile_at(&self, cell_x: i32, cell_y: i32) -> Option<Tile>;

    /// Whether the cell blocks movement.
    fn collides_at(&self, cell_x: i32, cell_y: i32) -> bool {
        self.tile_at(cell_x, cell_y).is_some_and(|t| t.collides)
    }
}

impl<F> TileQuery for F
where
    F: Fn(i32, i32) -> Option<Tile>,
{
    fn tile_at(&self, cell_x: i32, cell_y: i32) -> Option<Tile> {
        self(cell_x, cell_y)
    }
}

// ---------------------------------------------------------------------------
// Grid helpers
// ---------------------------------------------------------------------------

/// Column containing a world-space x. Fractional positions floor toward
/// negative infinity, so `-0.5` lands in column `-1`.
pub fn grid_x_from_world(x: f32) -> i32 {
    (x / CELL_SIZE).floor() as i32
}

/// Row containing the top edge of a body whose top is at `y`.
pub fn top_row(y: f32) -> i32 {
    (y / CELL_SIZE).floor() as i32
}

/// Row containing the bottom edge of a body whose top is at `y`.
pub fn bottom_row(y: f32) -> i32 {
    ((y + CELL_SIZE - EDGE_EPSILON) / CELL_SIZE).floor() as i32
}

/// Row containing the vertical center of a body whose top is at `y`.
pub fn center_row(y: f32) -> i32 {
    ((y + CELL_SIZE / 2.0) / CELL_SIZE).floor() as i32
}

//! Fixed-tick movement: gravity, swept vertical collision, discrete
//! horizontal steps and jumps.
//!
//! Vertical motion is continuous (semi-implicit Euler on `logical_y`),
//! horizontal motion is one whole cell per request. Every collision query
//! goes through a [`TileQuery`], so the same code drives the player and any
//! hostile walker.

use crate::core::constants::{CELL_SIZE, GRAVITY, JUMP_HEIGHT};
use crate::core::physics::{bottom_row, top_row, PhysicsBody, TileQuery};

/// What the vertical phase of a tick ran into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalContact {
    /// Moved freely (or did not move).
    None,
    /// Landed on top of the colliding tile in `row`.
    Floor { row: i32 },
    /// Bumped the underside of the colliding tile in `row`.
    Ceiling { row: i32 },
}

/// Upward speed that reaches [`JUMP_HEIGHT`] under [`GRAVITY`]:
/// `sqrt(2 * g * h)`.
pub fn jump_speed() -> f32 {
    (2.0 * GRAVITY * JUMP_HEIGHT).sqrt()
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MovementSystem;

impl MovementSystem {
    pub fn new() -> Self {
        Self
    }

    /// Advance one body by one fixed tick of `delta_ms` milliseconds.
    ///
    /// A zero, negative or NaN delta changes nothing. Time never runs
    /// backwards here, so negative deltas do not un-apply gravity.
    pub fn update<T>(&self, body: &mut PhysicsBody, delta_ms: f32, tiles: &T) -> VerticalContact
    where
        T: TileQuery + ?Sized,
    {
        if !delta_ms.is_finite() || delta_ms <= 0.0 {
            return VerticalContact::None;
        }
        let dt = delta_ms / 1000.0;

        body.velocity_y += GRAVITY * dt;
        let next_y = body.logical_y + body.velocity_y * dt;

        let contact = if body.velocity_y > 0.0 {
            Self::fall(body, next_y, tiles)
        } else if body.velocity_y < 0.0 {
            Self::rise(body, next_y, tiles)
        } else {
            body.logical_y = next_y;
            VerticalContact::None
        };

        // Walked off a ledge: still flagged as grounded but nothing underneath.
        if body.is_grounded && body.velocity_y == 0.0 {
            let below = bottom_row(body.logical_y) + 1;
            if !tiles.collides_at(body.grid_x, below) {
                log::trace!("lost support at ({}, {})", body.grid_x, below);
                body.is_grounded = false;
            }
        }

        contact
    }

    /// Sweep every row between the current and the prospective bottom edge so
    /// a fast fall cannot skip over a one-cell floor.
    fn fall<T>(body: &mut PhysicsBody, next_y: f32, tiles: &T) -> VerticalContact
    where
        T: TileQuery + ?Sized,
    {
        let from = bottom_row(body.logical_y);
        let to = bottom_row(next_y);
        for row in from..=to {
            if tiles.collides_at(body.grid_x, row) {
                body.logical_y = row as f32 * CELL_SIZE - CELL_SIZE;
                body.velocity_y = 0.0;
                body.is_grounded = true;
                log::trace!("landed on ({}, {})", body.grid_x, row);
                return VerticalContact::Floor { row };
            }
        }
        body.logical_y = next_y;
        body.is_grounded = false;
        VerticalContact::None
    }

    fn rise<T>(body: &mut PhysicsBody, next_y: f32, tiles: &T) -> VerticalContact
    where
        T: TileQuery + ?Sized,
    {
        let from = top_row(body.logical_y);
        let to = top_row(next_y);
        for row in (to..=from).rev() {
            if tiles.collides_at(body.grid_x, row) {
                body.logical_y = (row + 1) as f32 * CELL_SIZE;
                body.velocity_y = 0.0;
                log::trace!("hit ceiling at ({}, {})", body.grid_x, row);
                return VerticalContact::Ceiling { row };
            }
        }
        body.logical_y = next_y;
        body.is_grounded = false;
        VerticalContact::None
    }

    /// Try a single one-cell step left (`direction < 0`) or right
    /// (`direction > 0`). The destination column is sampled at the rows of
    /// both the top and the bottom edge; if either blocks, nothing changes.
    ///
    /// Returns whether the body moved. A zero direction never moves.
    pub fn move_horizontal<T>(&self, body: &mut PhysicsBody, direction: i32, tiles: &T) -> bool
    where
        T: TileQuery + ?Sized,
    {
        if direction == 0 {
            return false;
        }
        let Some(next_x) = body.grid_x.checked_add(direction.signum()) else {
            return false;
        };
        let top = top_row(body.logical_y);
        let bottom = bottom_row(body.logical_y);

        if tiles.collides_at(next_x, top) || tiles.collides_at(next_x, bottom) {
            return false;
        }
        body.grid_x = next_x;
        true
    }

    /// Launch upward if standing on something. Airborne calls are ignored.
    /// Returns whether the jump happened.
    pub fn jump(&self, body: &mut PhysicsBody) -> bool {
        if !body.is_grounded {
            return false;
        }
        body.velocity_y = -jump_speed();
        body.is_grounded = false;
        true
    }
}

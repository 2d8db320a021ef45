use crate::core::physics::{PhysicsBody, TileQuery};
use crate::systems::movement::MovementSystem;

/// Back-and-forth walker. Issues the same one-cell step requests the player
/// does, on a fixed interval, and turns around when a step is rejected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Patrol {
    /// -1 walks left, 1 walks right.
    pub direction: i32,
    pub interval_ms: f32,
    elapsed_ms: f32,
}

impl Patrol {
    pub fn new(direction: i32, interval_ms: f32) -> Self {
        Self {
            direction: if direction < 0 { -1 } else { 1 },
            interval_ms,
            elapsed_ms: 0.0,
        }
    }

    /// Advance by one tick. Returns `Some(moved)` on ticks where a step was
    /// attempted, `None` while waiting for the interval.
    pub fn tick<T>(
        &mut self,
        body: &mut PhysicsBody,
        dt_ms: f32,
        movement: &MovementSystem,
        tiles: &T,
    ) -> Option<bool>
    where
        T: TileQuery + ?Sized,
    {
        self.elapsed_ms += dt_ms.max(0.0);
        if self.elapsed_ms < self.interval_ms {
            return None;
        }
        self.elapsed_ms = 0.0;

        let moved = movement.move_horizontal(body, self.direction, tiles);
        if !moved {
            self.direction = -self.direction;
        }
        Some(moved)
    }
}

impl Default for Patrol {
    fn default() -> Self {
        Self::new(-1, 200.0)
    }
}

/// Millisecond countdown stepped by the fixed tick.
///
/// Used for windows that outlive a single tick, such as invulnerability
/// after a hit or the attack swing.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Cooldown {
    remaining_ms: f32,
}

impl Cooldown {
    pub fn new() -> Self {
        Self { remaining_ms: 0.0 }
    }

    /// Restart the countdown. Non-positive durations leave it idle.
    pub fn start(&mut self, duration_ms: f32) {
        self.remaining_ms = duration_ms.max(0.0);
    }

    /// Advance by one tick. Returns true on the tick the countdown expires.
    pub fn tick(&mut self, dt_ms: f32) -> bool {
        if self.remaining_ms <= 0.0 {
            return false;
        }
        self.remaining_ms -= dt_ms.max(0.0);
        if self.remaining_ms <= 0.0 {
            self.remaining_ms = 0.0;
            return true;
        }
        false
    }

    pub fn is_running(&self) -> bool {
        self.remaining_ms > 0.0
    }

    pub fn remaining_ms(&self) -> f32 {
        self.remaining_ms
    }

    pub fn cancel(&mut self) {
        self.remaining_ms = 0.0;
    }
}

use crate::components::timer::Cooldown;

/// Hit points plus the post-hit invulnerability window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Health {
    pub hp: u32,
    pub max_hp: u32,
    /// Length of the window started by each accepted hit. Zero disables it.
    pub invulnerability_ms: f32,
    invulnerability: Cooldown,
}

impl Health {
    pub fn new(max_hp: u32) -> Self {
        Self {
            hp: max_hp,
            max_hp,
            invulnerability_ms: 0.0,
            invulnerability: Cooldown::new(),
        }
    }

    pub fn with_invulnerability(mut self, ms: f32) -> Self {
        self.invulnerability_ms = ms;
        self
    }

    /// Apply damage unless a previous hit's window is still running.
    /// Returns the damage actually taken.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        if self.is_invulnerable() {
            return 0;
        }
        let taken = amount.min(self.hp);
        self.hp -= taken;
        if self.invulnerability_ms > 0.0 {
            self.invulnerability.start(self.invulnerability_ms);
        }
        taken
    }

    pub fn heal(&mut self, amount: u32) {
        self.hp = self.hp.saturating_add(amount).min(self.max_hp);
    }

    /// Full health, window cleared.
    pub fn restore(&mut self) {
        self.hp = self.max_hp;
        self.invulnerability.cancel();
    }

    pub fn is_dead(&self) -> bool {
        self.hp == 0
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invulnerability.is_running()
    }

    pub fn fraction(&self) -> f32 {
        if self.max_hp == 0 {
            return 0.0;
        }
        self.hp as f32 / self.max_hp as f32
    }

    /// Advance the invulnerability window by one tick.
    pub fn tick(&mut self, dt_ms: f32) {
        self.invulnerability.tick(dt_ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn damage_reduces_hp() {
        let mut h = Health::new(10);
        assert_eq!(h.take_damage(3), 3);
        assert_eq!(h.hp, 7);
        assert!(!h.is_invulnerable());
    }

    #[test]
    fn damage_saturates_at_zero() {
        let mut h = Health::new(5);
        assert_eq!(h.take_damage(32), 5);
        assert!(h.is_dead());
    }

    #[test]
    fn window_blocks_follow_up_hits() {
        let mut h = Health::new(100).with_invulnerability(1000.0);
        h.take_damage(10);
        assert!(h.is_invulnerable());
        assert_eq!(h.take_damage(10), 0);
        assert_eq!(h.hp, 90);

        for _ in 0..16 {
            h.tick(1000.0 / 15.0);
        }
        assert!(!h.is_invulnerable());
        h.take_damage(10);
        assert_eq!(h.hp, 80);
    }

    #[test]
    fn heal_caps_at_max() {
        let mut h = Health::new(100);
        h.take_damage(30);
        h.heal(50);
        assert_eq!(h.hp, 100);
    }

    #[test]
    fn restore_clears_window() {
        let mut h = Health::new(100).with_invulnerability(1000.0);
        h.take_damage(100);
        h.restore();
        assert_eq!(h.hp, 100);
        assert!(!h.is_invulnerable());
        assert!((h.fraction() - 1.0).abs() < 0.001);
    }
}

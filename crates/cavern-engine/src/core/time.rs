use crate::core::constants::FIXED_STEP_MS;

/// Default cap on ticks per frame. Time beyond it is dropped rather than
/// simulated, so one long frame cannot stall the next one.
pub const DEFAULT_MAX_STEPS: u32 = 10;

/// Fixed timestep accumulator.
/// Turns variable frame durations into a whole number of fixed ticks so the
/// simulation produces the same result at any render frame rate.
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    /// Duration of one tick in milliseconds.
    step_ms: f32,
    /// Time received but not yet simulated.
    accumulator: f32,
    /// Maximum ticks handed out per frame.
    max_steps: u32,
    /// Total ticks handed out since construction.
    tick_count: u64,
}

impl FixedTimestep {
    pub fn new(step_ms: f32) -> Self {
        Self {
            step_ms,
            accumulator: 0.0,
            max_steps: DEFAULT_MAX_STEPS,
            tick_count: 0,
        }
    }

    /// Accumulator ticking at `hz` steps per second.
    pub fn from_rate(hz: f32) -> Self {
        Self::new(1000.0 / hz)
    }

    pub fn with_max_steps(mut self, max_steps: u32) -> Self {
        self.max_steps = max_steps.max(1);
        self
    }

    /// Add frame time to the accumulator. Returns the number of fixed steps to run.
    pub fn accumulate(&mut self, frame_ms: f32) -> u32 {
        if frame_ms.is_finite() && frame_ms > 0.0 {
            self.accumulator += frame_ms;
        }
        let cap = self.step_ms * self.max_steps as f32;
        if self.accumulator > cap {
            log::debug!(
                "frame of {:.1}ms exceeds {} ticks, dropping {:.1}ms",
                frame_ms,
                self.max_steps,
                self.accumulator - cap
            );
            self.accumulator = cap;
        }
        let steps = (self.accumulator / self.step_ms) as u32;
        self.accumulator -= steps as f32 * self.step_ms;
        self.tick_count += u64::from(steps);
        steps
    }

    /// Interpolation alpha for rendering between ticks (0.0 to 1.0).
    pub fn alpha(&self) -> f32 {
        (self.accumulator / self.step_ms).clamp(0.0, 1.0)
    }

    /// The fixed step in milliseconds.
    pub fn step_ms(&self) -> f32 {
        self.step_ms
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }
}

impl Default for FixedTimestep {
    fn default() -> Self {
        Self::new(FIXED_STEP_MS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_step_exact() {
        let mut ts = FixedTimestep::new(50.0);
        let steps = ts.accumulate(50.0);
        assert_eq!(steps, 1);
    }

    #[test]
    fn accumulates_partial() {
        let mut ts = FixedTimestep::new(50.0);
        let steps = ts.accumulate(30.0); // less than a tick
        assert_eq!(steps, 0);
        let steps = ts.accumulate(30.0); // over one tick total
        assert_eq!(steps, 1);
        assert!((ts.alpha() - 0.2).abs() < 0.001);
    }

    #[test]
    fn default_rate_is_fifteen_hz() {
        let ts = FixedTimestep::default();
        assert!((ts.step_ms() - 66.666_67).abs() < 0.001);
        let ts = FixedTimestep::from_rate(15.0);
        assert!((ts.step_ms() - FIXED_STEP_MS).abs() < 0.001);
    }

    #[test]
    fn caps_at_ten_steps() {
        let mut ts = FixedTimestep::new(50.0);
        let steps = ts.accumulate(5000.0); // 100 ticks worth, but capped at 10
        assert_eq!(steps, 10);
        assert_eq!(ts.accumulate(0.0), 0);
    }

    #[test]
    fn custom_step_cap() {
        let mut ts = FixedTimestep::new(50.0).with_max_steps(3);
        assert_eq!(ts.accumulate(1000.0), 3);
    }

    #[test]
    fn ignores_negative_and_nan_frames() {
        let mut ts = FixedTimestep::new(50.0);
        assert_eq!(ts.accumulate(-100.0), 0);
        assert_eq!(ts.accumulate(f32::NAN), 0);
        assert_eq!(ts.alpha(), 0.0);
    }

    #[test]
    fn alpha_is_between_zero_and_one() {
        let mut ts = FixedTimestep::default();
        ts.accumulate(100.0);
        let a = ts.alpha();
        assert!((0.0..=1.0).contains(&a), "alpha was {}", a);
    }

    #[test]
    fn tick_count_is_frame_rate_independent() {
        let mut fast = FixedTimestep::new(50.0);
        let mut slow = FixedTimestep::new(50.0);
        for _ in 0..100 {
            fast.accumulate(10.0);
        }
        for _ in 0..20 {
            slow.accumulate(50.0);
        }
        assert_eq!(fast.tick_count(), slow.tick_count());
        assert_eq!(fast.tick_count(), 20);
    }
}

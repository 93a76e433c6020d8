//! Frame clock with fixed-timestep accumulator

use std::time::Instant;

/// Tracks frame time and feeds the physics step a fixed 60Hz cadence.
///
/// Time can come from the wall clock (`tick`) or be driven manually
/// (`advance`) for headless and test runs.
pub struct FrameClock {
    /// Total elapsed time in seconds
    pub total_time: f64,
    /// Time since last frame in seconds
    pub delta_time: f64,
    /// Fixed physics timestep (1/60 second)
    pub fixed_timestep: f64,
    accumulator: f64,
    last_instant: Instant,
    first_tick: bool,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self {
            total_time: 0.0,
            delta_time: 0.0,
            fixed_timestep: 1.0 / 60.0,
            accumulator: 0.0,
            last_instant: Instant::now(),
            first_tick: true,
        }
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance from the wall clock. Call once per frame.
    pub fn tick(&mut self) {
        let now = Instant::now();

        if self.first_tick {
            self.first_tick = false;
            self.last_instant = now;
            self.delta_time = 0.0;
            return;
        }

        let elapsed = now.duration_since(self.last_instant).as_secs_f64();
        self.last_instant = now;
        self.advance(elapsed);
    }

    /// Advance by an explicit delta (headless/test driving)
    pub fn advance(&mut self, elapsed: f64) {
        // Clamp to avoid spiral of death (max 250ms frame time)
        self.delta_time = elapsed.min(0.25);
        self.total_time += self.delta_time;
        self.accumulator += self.delta_time;
    }

    /// Returns true while there is accumulated time for a fixed step
    pub fn should_fixed_update(&self) -> bool {
        self.accumulator >= self.fixed_timestep
    }

    /// Consume one fixed timestep from the accumulator
    pub fn consume_fixed_step(&mut self) {
        self.accumulator -= self.fixed_timestep;
    }
}

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::{Duration, Instant};

use crate::config::Config;

/// Stop watch behind the phase cycle.
///
/// Holds the randomly drawn length of the running cycle and the instant it
/// started. Time is passed in by the caller, so the same cycle can be driven
/// by the wall clock or stepped by hand.
pub struct PhaseCycle {
    rng: StdRng,
    min_cycle: Duration,
    max_cycle: Duration,
    cycle_duration: Duration,
    last_update: Instant,
}

impl PhaseCycle {
    pub fn new(config: &Config, start: Instant) -> PhaseCycle {
        let rng = match config.seed() {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut cycle = PhaseCycle {
            rng,
            min_cycle: config.min_cycle(),
            max_cycle: config.max_cycle(),
            cycle_duration: Duration::ZERO,
            last_update: start,
        };
        cycle.cycle_duration = cycle.draw();
        cycle
    }

    fn draw(&mut self) -> Duration {
        self.rng.gen_range(self.min_cycle..=self.max_cycle)
    }

    pub fn cycle_duration(&self) -> Duration {
        self.cycle_duration
    }

    pub fn deadline(&self) -> Instant {
        self.last_update + self.cycle_duration
    }

    pub fn remaining(&self, now: Instant) -> Duration {
        self.deadline().saturating_duration_since(now)
    }

    /// Completes the running cycle if it has expired at `now`.
    ///
    /// On expiry a new duration is drawn, the stop watch restarts at `now`
    /// and the length of the finished cycle is returned.
    pub fn poll(&mut self, now: Instant) -> Option<Duration> {
        let elapsed = now.saturating_duration_since(self.last_update);
        if elapsed < self.cycle_duration {
            return None;
        }
        self.cycle_duration = self.draw();
        self.last_update = now;
        Some(elapsed)
    }
}

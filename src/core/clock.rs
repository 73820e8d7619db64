use std::time::{Duration, Instant};

/// Wall clock for the animation loop
///
/// `delta` measures the time since the previous `delta` (or since creation
/// for the first call), `elapsed` the time since creation.
#[derive(Debug, Clone)]
pub struct Clock {
    start: Instant,
    last_tick: Instant,
}

impl Clock {
    /// Create new clock starting now
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    /// Create a clock whose first tick is measured from `start`
    pub fn starting_at(start: Instant) -> Self {
        Self {
            start,
            last_tick: start,
        }
    }

    /// Seconds since the previous call, advancing the clock
    pub fn delta(&mut self) -> f32 {
        self.delta_at(Instant::now())
    }

    /// Seconds between the previous tick and `now`, advancing the clock to `now`
    ///
    /// An `now` earlier than the previous tick yields 0.
    pub fn delta_at(&mut self, now: Instant) -> f32 {
        let delta = now.saturating_duration_since(self.last_tick).as_secs_f32();
        self.last_tick = self.last_tick.max(now);
        delta
    }

    /// Time since the clock was created
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

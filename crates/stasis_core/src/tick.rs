//! # Fixed-Timestep Tick Loop
//!
//! Paces a host simulation in real time. The simulation itself only ever sees
//! tick numbers; this is the one place wall-clock time enters.
//!
//! ```rust,ignore
//! let mut pacer = TickLoop::new(20);
//! loop {
//!     while pacer.should_tick() {
//!         let started = pacer.begin_tick();
//!         simulation.step();
//!         pacer.end_tick(started);
//!     }
//!     pacer.wait_for_next_tick();
//! }
//! ```

use std::time::{Duration, Instant};

use crate::Tick;

/// Default host tick rate (ticks per second).
pub const DEFAULT_TICK_RATE: u32 = 20;

/// Most ticks replayed in one burst after a stall.
const MAX_CATCH_UP_TICKS: u32 = 10;

/// Fixed-timestep tick loop controller.
pub struct TickLoop {
    tick_duration: Duration,
    last_poll: Instant,
    accumulator: Duration,
    tick_count: Tick,
    stats: TickStats,
}

/// Tick timing statistics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickStats {
    /// Shortest tick observed (microseconds).
    pub min_tick_us: u64,
    /// Longest tick observed (microseconds).
    pub max_tick_us: u64,
    /// Rolling average tick duration (microseconds).
    pub avg_tick_us: u64,
    /// Ticks that took longer than their budget.
    pub late_ticks: u64,
    /// Ticks dropped because the loop fell too far behind.
    pub skipped_ticks: u64,
    /// Ticks measured.
    pub total_ticks: u64,
}

impl TickStats {
    fn fresh(budget: Duration) -> Self {
        Self {
            min_tick_us: u64::MAX,
            avg_tick_us: duration_us(budget),
            ..Self::default()
        }
    }
}

fn duration_us(duration: Duration) -> u64 {
    u64::try_from(duration.as_micros()).unwrap_or(u64::MAX)
}

impl TickLoop {
    /// Creates a loop running `tick_rate` ticks per second (0 is treated as 1).
    #[must_use]
    pub fn new(tick_rate: u32) -> Self {
        let tick_duration = Duration::from_micros(1_000_000 / u64::from(tick_rate.max(1)));

        Self {
            tick_duration,
            last_poll: Instant::now(),
            accumulator: Duration::ZERO,
            tick_count: 0,
            stats: TickStats::fresh(tick_duration),
        }
    }

    /// Returns true if a tick is due. Call in a loop until it returns false.
    #[must_use]
    pub fn should_tick(&mut self) -> bool {
        let now = Instant::now();
        self.accumulator += now.duration_since(self.last_poll);
        self.last_poll = now;

        let backlog = self.tick_duration * MAX_CATCH_UP_TICKS;
        if self.accumulator > backlog {
            let dropped = (self.accumulator - backlog).as_micros() / self.tick_duration.as_micros();
            let dropped = u64::try_from(dropped).unwrap_or(u64::MAX);
            self.stats.skipped_ticks += dropped;
            self.accumulator = backlog;
            tracing::warn!(dropped, "tick loop fell behind, dropping ticks");
        }

        self.accumulator >= self.tick_duration
    }

    /// Marks the start of a tick and returns its start time.
    #[must_use]
    pub fn begin_tick(&mut self) -> Instant {
        self.accumulator = self.accumulator.saturating_sub(self.tick_duration);
        self.tick_count += 1;
        Instant::now()
    }

    /// Marks the end of a tick started at `start`.
    pub fn end_tick(&mut self, start: Instant) {
        let elapsed = start.elapsed();
        let elapsed_us = duration_us(elapsed);

        self.stats.total_ticks += 1;
        self.stats.min_tick_us = self.stats.min_tick_us.min(elapsed_us);
        self.stats.max_tick_us = self.stats.max_tick_us.max(elapsed_us);
        self.stats.avg_tick_us = (self.stats.avg_tick_us * 15 + elapsed_us) / 16;

        if elapsed > self.tick_duration {
            self.stats.late_ticks += 1;
        }
    }

    /// Sleeps until the next tick is due.
    pub fn wait_for_next_tick(&self) {
        let elapsed = self.last_poll.elapsed() + self.accumulator;
        if elapsed < self.tick_duration {
            std::thread::sleep(self.tick_duration - elapsed);
        }
    }

    /// Ticks begun so far.
    #[must_use]
    pub const fn tick_count(&self) -> Tick {
        self.tick_count
    }

    /// Timing statistics.
    #[must_use]
    pub const fn stats(&self) -> &TickStats {
        &self.stats
    }

    /// Budget of one tick.
    #[must_use]
    pub const fn tick_duration(&self) -> Duration {
        self.tick_duration
    }
}

impl Default for TickLoop {
    fn default() -> Self {
        Self::new(DEFAULT_TICK_RATE)
    }
}

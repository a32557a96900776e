//! # Periodic Tasks
//!
//! [`TickerTask`] is the host's periodic-task primitive: something that wants
//! to run every `interval` ticks asks [`TickerTask::poll`] once per tick.
//! Nothing sleeps or blocks; the host's tick loop is the only clock.
//!
//! [`EffectClock`] measures effect durations in ticks that only advance
//! while the owning module is not paused.

use crate::Tick;

/// Scheduling state of a [`TickerTask`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TaskState {
    /// Never started, or stopped.
    #[default]
    Idle,
    /// Due runs are reported by `poll`.
    Running,
    /// Suspended; the schedule resumes where it left off.
    Paused,
}

/// Tick-driven periodic task.
#[derive(Clone, Debug)]
pub struct TickerTask {
    /// Ticks between `start` and the first run.
    delay: Tick,
    /// Ticks between runs (at least 1).
    interval: Tick,
    state: TaskState,
    /// Tick of the next due run.
    next_run: Tick,
    /// Tick the task was paused at.
    paused_at: Tick,
    /// Runs reported so far in this activation.
    runs: u64,
}

impl TickerTask {
    /// Creates an idle task. An `interval` of 0 is treated as 1.
    #[must_use]
    pub fn new(delay: Tick, interval: Tick) -> Self {
        Self {
            delay,
            interval: interval.max(1),
            state: TaskState::Idle,
            next_run: 0,
            paused_at: 0,
            runs: 0,
        }
    }

    /// Starts with a fresh schedule. Returns false if already started.
    pub fn start(&mut self, now: Tick) -> bool {
        if self.state != TaskState::Idle {
            return false;
        }
        self.state = TaskState::Running;
        self.next_run = now.saturating_add(self.delay);
        self.runs = 0;
        true
    }

    /// Suspends a running task. Returns false if it was not running.
    pub fn pause(&mut self, now: Tick) -> bool {
        if self.state != TaskState::Running {
            return false;
        }
        self.state = TaskState::Paused;
        self.paused_at = now;
        true
    }

    /// Continues a paused task, pushing the next run back by the time spent
    /// paused. Returns false if it was not paused.
    pub fn resume(&mut self, now: Tick) -> bool {
        if self.state != TaskState::Paused {
            return false;
        }
        self.state = TaskState::Running;
        self.next_run = self
            .next_run
            .saturating_add(now.saturating_sub(self.paused_at));
        true
    }

    /// Halts the task. Returns false if it was already idle.
    pub fn stop(&mut self) -> bool {
        if self.state == TaskState::Idle {
            return false;
        }
        self.state = TaskState::Idle;
        true
    }

    /// Returns true (and schedules the following run) if a run is due.
    ///
    /// Call once per tick. Missed runs are not replayed.
    pub fn poll(&mut self, now: Tick) -> bool {
        if self.state != TaskState::Running || now < self.next_run {
            return false;
        }
        self.next_run = now.saturating_add(self.interval);
        self.runs += 1;
        true
    }

    /// Current scheduling state.
    #[must_use]
    pub const fn state(&self) -> TaskState {
        self.state
    }

    /// Ticks between runs.
    #[must_use]
    pub const fn interval(&self) -> Tick {
        self.interval
    }

    /// Runs reported since the last `start`.
    #[must_use]
    pub const fn runs(&self) -> u64 {
        self.runs
    }
}

/// Tick clock that stands still while suspended.
///
/// `effective(now)` is `now` minus every tick spent suspended.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EffectClock {
    suspended_total: Tick,
    suspended_since: Option<Tick>,
}

impl EffectClock {
    /// Creates a running clock.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            suspended_total: 0,
            suspended_since: None,
        }
    }

    /// Stops the clock at `now`. No-op if already suspended.
    pub fn suspend(&mut self, now: Tick) {
        if self.suspended_since.is_none() {
            self.suspended_since = Some(now);
        }
    }

    /// Restarts the clock at `now`. No-op if running.
    pub fn resume(&mut self, now: Tick) {
        if let Some(since) = self.suspended_since.take() {
            self.suspended_total = self
                .suspended_total
                .saturating_add(now.saturating_sub(since));
        }
    }

    /// Clock reading at host tick `now`.
    #[must_use]
    pub fn effective(&self, now: Tick) -> Tick {
        let reference = self.suspended_since.map_or(now, |since| since.min(now));
        reference.saturating_sub(self.suspended_total)
    }
}

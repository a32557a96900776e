//! # Expiry Sweeper
//!
//! Once per sweep interval, one pass over every snapshot. Expired ones are
//! handed to the release callback and dropped in the same pass.

use std::collections::HashMap;

use stasis_core::{EntityId, SweeperCommand, TaskState, Tick, TickerTask};

use crate::snapshot::EntitySnapshot;

/// Sweep counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SweepStats {
    /// Passes performed.
    pub runs: u64,
    /// Entities released by expiry.
    pub released: u64,
}

/// Periodic expiry check.
#[derive(Debug)]
pub struct ExpirySweeper {
    task: TickerTask,
    stats: SweepStats,
}

impl ExpirySweeper {
    /// Creates an idle sweeper.
    #[must_use]
    pub fn new(delay: Tick, interval: Tick) -> Self {
        Self {
            task: TickerTask::new(delay, interval),
            stats: SweepStats::default(),
        }
    }

    /// Applies a lifecycle command to the underlying task.
    pub fn command(&mut self, command: SweeperCommand, now: Tick) -> bool {
        match command {
            SweeperCommand::Start => self.task.start(now),
            SweeperCommand::Resume => self.task.resume(now),
            SweeperCommand::Pause => self.task.pause(now),
            SweeperCommand::Stop => self.task.stop(),
        }
    }

    /// True (and reschedules) if a pass is due at host tick `now`.
    pub fn is_due(&mut self, now: Tick) -> bool {
        self.task.poll(now)
    }

    /// One pass: every snapshot expired at effect-clock tick `now` is passed
    /// to `release` and removed. Returns the number released.
    pub fn sweep<F>(
        &mut self,
        snapshots: &mut HashMap<EntityId, EntitySnapshot>,
        now: Tick,
        mut release: F,
    ) -> usize
    where
        F: FnMut(&EntitySnapshot),
    {
        let before = snapshots.len();
        snapshots.retain(|_, snapshot| {
            if snapshot.is_expired(now) {
                release(snapshot);
                false
            } else {
                true
            }
        });
        let released = before - snapshots.len();

        self.stats.runs += 1;
        self.stats.released += released as u64;
        released
    }

    /// Scheduling state of the underlying task.
    #[must_use]
    pub const fn state(&self) -> TaskState {
        self.task.state()
    }

    /// Counters since creation.
    #[must_use]
    pub const fn stats(&self) -> SweepStats {
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::Expiry;
    use stasis_core::MotionAttributes;

    fn snapshots(expiries: &[Expiry]) -> HashMap<EntityId, EntitySnapshot> {
        expiries
            .iter()
            .enumerate()
            .map(|(i, &expires)| {
                let id = EntityId::new(u32::try_from(i).unwrap(), 0);
                let snap =
                    EntitySnapshot::capture(id, MotionAttributes::DEFAULT, expires, false);
                (id, snap)
            })
            .collect()
    }

    #[test]
    fn test_sweep_releases_each_expired_once() {
        let mut sweeper = ExpirySweeper::new(0, 1);
        let mut map = snapshots(&[
            Expiry::At(5),
            Expiry::Never,
            Expiry::At(10),
            Expiry::At(3),
            Expiry::At(11),
        ]);

        let mut released = Vec::new();
        let count = sweeper.sweep(&mut map, 10, |s| released.push(s.owner()));

        released.sort();
        assert_eq!(count, 3);
        assert_eq!(
            released,
            vec![EntityId::new(0, 0), EntityId::new(2, 0), EntityId::new(3, 0)]
        );
        assert_eq!(map.len(), 2);
        assert!(map.contains_key(&EntityId::new(1, 0)));
        assert!(map.contains_key(&EntityId::new(4, 0)));
    }

    #[test]
    fn test_sweep_of_everything() {
        let mut sweeper = ExpirySweeper::new(0, 1);
        let mut map = snapshots(&[Expiry::At(0); 64]);

        let mut calls = 0;
        assert_eq!(sweeper.sweep(&mut map, 0, |_| calls += 1), 64);
        assert_eq!(calls, 64);
        assert!(map.is_empty());
        assert_eq!(sweeper.stats(), SweepStats { runs: 1, released: 64 });
    }

    #[test]
    fn test_due_follows_commands() {
        let mut sweeper = ExpirySweeper::new(0, 2);
        assert!(!sweeper.is_due(0));

        assert!(sweeper.command(SweeperCommand::Start, 0));
        assert!(sweeper.is_due(0));
        assert!(!sweeper.is_due(1));
        assert!(sweeper.is_due(2));

        assert!(sweeper.command(SweeperCommand::Pause, 3));
        assert!(!sweeper.is_due(4));
        assert_eq!(sweeper.state(), TaskState::Paused);

        assert!(sweeper.command(SweeperCommand::Resume, 13));
        assert!(sweeper.is_due(14));

        assert!(sweeper.command(SweeperCommand::Stop, 15));
        assert!(!sweeper.is_due(100));
    }
}

//! # Module Lifecycle
//!
//! Every effect module is in one of three states:
//!
//! - **ACTIVE**: event listener registered, periodic task running.
//! - **PAUSED**: event listener registered, periodic task suspended.
//! - **STOPPED**: event listener unregistered, periodic task halted.
//!
//! [`plan`] is the transition table. It performs nothing; the module
//! executes the returned [`Transition`].

use std::fmt;

/// Lifecycle state of a module.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ModuleState {
    /// Listening and ticking.
    Active,
    /// Listening, not ticking.
    Paused,
    /// Neither listening nor ticking.
    #[default]
    Stopped,
}

impl ModuleState {
    /// True if the module's event listener is registered in this state.
    #[inline]
    #[must_use]
    pub const fn listens(self) -> bool {
        !matches!(self, Self::Stopped)
    }
}

impl fmt::Display for ModuleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Active => "ACTIVE",
            Self::Paused => "PAUSED",
            Self::Stopped => "STOPPED",
        })
    }
}

/// What happens to the event listener on a transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListenerChange {
    /// Register with the host's event dispatch.
    Register,
    /// Leave as is.
    Keep,
    /// Remove from the host's event dispatch.
    Unregister,
}

/// Command for the periodic task.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SweeperCommand {
    /// Start with a fresh schedule.
    Start,
    /// Continue a paused schedule.
    Resume,
    /// Suspend, keeping the schedule.
    Pause,
    /// Halt.
    Stop,
}

/// Side effects of one state change, in execution order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition {
    /// State before.
    pub from: ModuleState,
    /// State after.
    pub to: ModuleState,
    /// Listener side effect.
    pub listener: ListenerChange,
    /// Periodic task side effects.
    pub sweeper: &'static [SweeperCommand],
}

/// Plans the transition `from -> to`. `None` if nothing changes.
#[must_use]
pub const fn plan(from: ModuleState, to: ModuleState) -> Option<Transition> {
    use ModuleState::{Active, Paused, Stopped};

    let (listener, sweeper): (ListenerChange, &'static [SweeperCommand]) = match (from, to) {
        (Active, Active) | (Paused, Paused) | (Stopped, Stopped) => return None,
        (Stopped, Active) => (ListenerChange::Register, &[SweeperCommand::Start]),
        (Paused, Active) => (ListenerChange::Keep, &[SweeperCommand::Resume]),
        (Active, Paused) => (ListenerChange::Keep, &[SweeperCommand::Pause]),
        (Stopped, Paused) => (
            ListenerChange::Register,
            &[SweeperCommand::Start, SweeperCommand::Pause],
        ),
        (Active | Paused, Stopped) => (ListenerChange::Unregister, &[SweeperCommand::Stop]),
    };

    Some(Transition {
        from,
        to,
        listener,
        sweeper,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [ModuleState; 3] = [ModuleState::Active, ModuleState::Paused, ModuleState::Stopped];

    #[test]
    fn test_same_state_plans_nothing() {
        for state in ALL {
            assert_eq!(plan(state, state), None);
        }
    }

    #[test]
    fn test_every_change_is_planned() {
        for from in ALL {
            for to in ALL {
                if from != to {
                    let t = plan(from, to).unwrap();
                    assert_eq!((t.from, t.to), (from, to));
                    assert!(!t.sweeper.is_empty());
                }
            }
        }
    }

    #[test]
    fn test_activation_from_stopped_starts_fresh() {
        let t = plan(ModuleState::Stopped, ModuleState::Active).unwrap();
        assert_eq!(t.listener, ListenerChange::Register);
        assert_eq!(t.sweeper, &[SweeperCommand::Start]);
    }

    #[test]
    fn test_activation_from_paused_resumes() {
        let t = plan(ModuleState::Paused, ModuleState::Active).unwrap();
        assert_eq!(t.listener, ListenerChange::Keep);
        assert_eq!(t.sweeper, &[SweeperCommand::Resume]);
    }

    #[test]
    fn test_pause_keeps_listener() {
        let t = plan(ModuleState::Active, ModuleState::Paused).unwrap();
        assert_eq!(t.listener, ListenerChange::Keep);
        assert_eq!(t.sweeper, &[SweeperCommand::Pause]);
    }

    #[test]
    fn test_stop_unregisters() {
        for from in [ModuleState::Active, ModuleState::Paused] {
            let t = plan(from, ModuleState::Stopped).unwrap();
            assert_eq!(t.listener, ListenerChange::Unregister);
            assert_eq!(t.sweeper, &[SweeperCommand::Stop]);
        }
    }

    #[test]
    fn test_listener_follows_target_state() {
        for from in ALL {
            for to in ALL {
                let Some(t) = plan(from, to) else { continue };
                let registered_after = match t.listener {
                    ListenerChange::Register => true,
                    ListenerChange::Unregister => false,
                    ListenerChange::Keep => from.listens(),
                };
                assert_eq!(registered_after, to.listens(), "{from} -> {to}");
            }
        }
    }
}

//! Countdown engine
//!
//! A pure reducer over `(Countdown, CountdownInput)`. The engine has no clock
//! of its own: ticks are delivered by the countdown task, and each tick carries
//! the `RunId` of the registration that produced it.
//!
//! ```text
//! Idle --Start--> Running --Pause/Reset/last Tick--> Idle
//! ```

/// Identifies one Idle -> Running transition and the tick registration tied to it
pub type RunId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Idle,
    Running { run: RunId },
}

/// Countdown value plus run status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    pub remaining_seconds: u64,
    pub status: RunStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownInput {
    Start { run: RunId },
    Pause,
    Reset { seconds: u64 },
    Tick { run: RunId },
}

/// Outcome of applying one input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub countdown: Countdown,
    /// Set only on the tick that reaches zero
    pub completed: bool,
    /// False when the input was rejected or ignored
    pub changed: bool,
}

impl Countdown {
    /// An idle countdown holding `seconds`
    pub fn idle(seconds: u64) -> Self {
        Self {
            remaining_seconds: seconds,
            status: RunStatus::Idle,
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self.status, RunStatus::Running { .. })
    }

    /// Run id of the live registration, if running
    pub fn run(&self) -> Option<RunId> {
        match self.status {
            RunStatus::Running { run } => Some(run),
            RunStatus::Idle => None,
        }
    }

    fn unchanged(self) -> Transition {
        Transition {
            countdown: self,
            completed: false,
            changed: false,
        }
    }

    fn to(self, countdown: Countdown) -> Transition {
        Transition {
            countdown,
            completed: false,
            changed: countdown != self,
        }
    }
}

/// Apply one input to a countdown
pub fn reduce(current: Countdown, input: CountdownInput) -> Transition {
    match (current.status, input) {
        // Starting at zero would complete without a single tick; refuse instead
        (RunStatus::Idle, CountdownInput::Start { run }) if current.remaining_seconds > 0 => {
            current.to(Countdown {
                remaining_seconds: current.remaining_seconds,
                status: RunStatus::Running { run },
            })
        }
        (_, CountdownInput::Start { .. }) => current.unchanged(),

        (RunStatus::Running { .. }, CountdownInput::Pause) => {
            current.to(Countdown::idle(current.remaining_seconds))
        }
        (RunStatus::Idle, CountdownInput::Pause) => current.unchanged(),

        (_, CountdownInput::Reset { seconds }) => current.to(Countdown::idle(seconds)),

        (RunStatus::Running { run: live }, CountdownInput::Tick { run }) if live == run => {
            let remaining_seconds = current.remaining_seconds.saturating_sub(1);
            if remaining_seconds == 0 {
                Transition {
                    countdown: Countdown::idle(0),
                    completed: true,
                    changed: true,
                }
            } else {
                current.to(Countdown {
                    remaining_seconds,
                    status: current.status,
                })
            }
        }
        (_, CountdownInput::Tick { .. }) => current.unchanged(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn running(seconds: u64, run: RunId) -> Countdown {
        Countdown {
            remaining_seconds: seconds,
            status: RunStatus::Running { run },
        }
    }

    #[test]
    fn start_moves_idle_to_running() {
        let t = reduce(Countdown::idle(10), CountdownInput::Start { run: 1 });
        assert!(t.changed);
        assert_eq!(t.countdown, running(10, 1));
    }

    #[test]
    fn start_at_zero_is_rejected() {
        let t = reduce(Countdown::idle(0), CountdownInput::Start { run: 1 });
        assert!(!t.changed);
        assert!(!t.completed);
        assert_eq!(t.countdown, Countdown::idle(0));
    }

    #[test]
    fn start_while_running_keeps_the_live_run() {
        let t = reduce(running(10, 1), CountdownInput::Start { run: 2 });
        assert!(!t.changed);
        assert_eq!(t.countdown.run(), Some(1));
    }

    #[test]
    fn pause_freezes_remaining() {
        let t = reduce(running(42, 3), CountdownInput::Pause);
        assert_eq!(t.countdown, Countdown::idle(42));
        assert!(!reduce(Countdown::idle(42), CountdownInput::Pause).changed);
    }

    #[test]
    fn reset_always_lands_idle() {
        let t = reduce(running(3, 1), CountdownInput::Reset { seconds: 300 });
        assert_eq!(t.countdown, Countdown::idle(300));
        let t = reduce(Countdown::idle(0), CountdownInput::Reset { seconds: 60 });
        assert_eq!(t.countdown, Countdown::idle(60));
    }

    #[test]
    fn ticks_from_another_run_are_ignored() {
        let t = reduce(running(5, 2), CountdownInput::Tick { run: 1 });
        assert!(!t.changed);
        assert_eq!(t.countdown.remaining_seconds, 5);
        let t = reduce(Countdown::idle(5), CountdownInput::Tick { run: 2 });
        assert!(!t.changed);
    }

    #[test]
    fn n_ticks_complete_exactly_once() {
        let mut countdown = reduce(Countdown::idle(3), CountdownInput::Start { run: 7 }).countdown;
        let mut completions = 0;
        for _ in 0..5 {
            let t = reduce(countdown, CountdownInput::Tick { run: 7 });
            if t.completed {
                completions += 1;
            }
            countdown = t.countdown;
        }
        assert_eq!(completions, 1);
        assert_eq!(countdown, Countdown::idle(0));
    }
}

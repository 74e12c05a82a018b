use crate::RunOutcome;

/// Work the run controller must perform after a state transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Drive the engine once with a fresh run context.
    StartAttempt { attempt: u32 },
    /// Sleep for the retry delay, then report `Msg::RetryDelayElapsed`.
    WaitBeforeRetry { next_attempt: u32 },
    /// The run reached a terminal phase.
    Finish { outcome: RunOutcome },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Caller asked for a run.
    Start,
    /// Engine returned normally from the current attempt.
    AttemptSucceeded,
    /// Engine raised an unrecoverable fault during the current attempt.
    AttemptFaulted { message: String },
    /// The fixed retry delay has passed.
    RetryDelayElapsed,
}

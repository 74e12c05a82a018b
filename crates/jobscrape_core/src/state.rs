#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Running,
    Retrying,
    Succeeded,
    Failed,
}

impl Phase {
    pub fn is_terminal(self) -> bool {
        matches!(self, Phase::Succeeded | Phase::Failed)
    }
}

/// Lifecycle of one run: `Idle -> Running -> {Succeeded, Retrying -> Running, Failed}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunState {
    phase: Phase,
    attempt: u32,
    max_attempts: u32,
    last_error: Option<String>,
}

impl RunState {
    /// `max_attempts` is clamped to at least one attempt.
    pub fn new(max_attempts: u32) -> Self {
        Self {
            phase: Phase::Idle,
            attempt: 0,
            max_attempts: max_attempts.max(1),
            last_error: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Current attempt number, starting at 1 once the run has started.
    pub fn attempt(&self) -> u32 {
        self.attempt
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub(crate) fn begin_attempt(&mut self) {
        self.attempt += 1;
        self.phase = Phase::Running;
    }

    pub(crate) fn record_fault(&mut self, message: String) {
        self.last_error = Some(message);
    }

    pub(crate) fn has_attempts_left(&self) -> bool {
        self.attempt < self.max_attempts
    }

    pub(crate) fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
    }
}

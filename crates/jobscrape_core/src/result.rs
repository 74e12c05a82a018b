use std::path::PathBuf;

use chrono::{DateTime, Local};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Success,
    Failed,
}

/// Summary handed back to the caller of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunResult {
    pub record_count: usize,
    pub started_at: DateTime<Local>,
    pub finished_at: DateTime<Local>,
    pub outcome: RunOutcome,
    /// Set only when records were durably written.
    pub output_path: Option<PathBuf>,
    pub attempts: u32,
    /// Fault that ended the final attempt. Always `None` on success.
    pub error: Option<String>,
}

impl RunResult {
    pub fn is_success(&self) -> bool {
        self.outcome == RunOutcome::Success
    }

    pub fn elapsed(&self) -> chrono::Duration {
        self.finished_at - self.started_at
    }
}

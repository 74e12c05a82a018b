use std::fmt;
use std::io;

use jobscrape_core::RawJobPosting;
use serde::{Deserialize, Serialize};

/// One notification from the scrape engine. Delivered in emission order,
/// never concurrently for the same run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ScrapeEvent {
    Data(RawJobPosting),
    Metrics(MetricsPayload),
    Error(PageError),
    End,
}

/// Progress counters the engine reports between pages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsPayload {
    pub processed: u64,
    pub failed: u64,
    pub missed: u64,
    pub skipped: u64,
}

impl fmt::Display for MetricsPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "processed={} failed={} missed={} skipped={}",
            self.processed, self.failed, self.missed, self.skipped
        )
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageErrorKind {
    /// Script evaluation failed inside the page.
    ScriptExecution,
    Timeout,
    #[default]
    Unknown,
}

/// A page-level failure the engine recovered from on its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageError {
    #[serde(default)]
    pub kind: PageErrorKind,
    pub message: String,
}

impl PageError {
    pub fn new(kind: PageErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for PageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

/// Failure that escapes the engine instead of arriving as an `Error` event.
#[derive(Debug, thiserror::Error)]
pub enum EngineFault {
    #[error("engine io error: {0}")]
    Io(#[from] io::Error),
    #[error("malformed event on line {line}: {message}")]
    Decode { line: usize, message: String },
    #[error("engine aborted: {0}")]
    Aborted(String),
}

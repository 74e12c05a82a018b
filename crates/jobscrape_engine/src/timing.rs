use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use chrono::{DateTime, Local};
use scrape_logging::scrape_info;

/// Wall-clock source, injectable so file names and run timestamps are testable.
pub type Clock = Arc<dyn Fn() -> DateTime<Local> + Send + Sync>;

/// Blocking pause used for cooldowns, retry delays and engine pacing.
pub type Sleeper = Arc<dyn Fn(Duration) + Send + Sync>;

pub fn system_clock() -> Clock {
    Arc::new(Local::now)
}

pub fn thread_sleeper() -> Sleeper {
    Arc::new(thread::sleep)
}

/// Logs the elapsed time of one attempt when dropped, whether the attempt
/// returned normally or bailed out early with `?`.
pub(crate) struct AttemptTimer {
    attempt: u32,
    started: Instant,
}

impl AttemptTimer {
    pub(crate) fn start(attempt: u32) -> Self {
        Self {
            attempt,
            started: Instant::now(),
        }
    }
}

impl Drop for AttemptTimer {
    fn drop(&mut self) {
        scrape_info!(
            "Attempt {} execution time: {:.2} seconds",
            self.attempt,
            self.started.elapsed().as_secs_f64()
        );
    }
}

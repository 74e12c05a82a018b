use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;
use std::time::Duration;

use jobscrape_core::Query;
use scrape_logging::{scrape_debug, scrape_info};

use crate::timing::{thread_sleeper, Sleeper};
use crate::{EngineFault, ScrapeEvent};

/// Receives engine events one at a time, in emission order.
pub trait EventSink {
    fn emit(&mut self, event: ScrapeEvent);
}

/// An opaque scraper. `run` blocks until the engine has delivered `End` or
/// failed in a way it could not report as an `Error` event.
pub trait ScrapeEngine: Send + Sync {
    fn run(&self, query: &Query, sink: &mut dyn EventSink) -> Result<(), EngineFault>;
}

/// Browser-level knobs every engine accepts. Engines may ignore the ones
/// that do not apply to them.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineOptions {
    pub headless: bool,
    pub max_workers: usize,
    /// Pause between consecutive page requests.
    pub slow_mo: Duration,
    pub page_load_timeout: Duration,
    pub chrome_executable_path: Option<PathBuf>,
    pub chrome_binary_location: Option<PathBuf>,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            headless: true,
            max_workers: 10,
            slow_mo: Duration::from_millis(1300),
            page_load_timeout: Duration::from_secs(5),
            chrome_executable_path: None,
            chrome_binary_location: None,
        }
    }
}

/// Engine that replays a recorded event stream from a JSON-lines file.
///
/// Each non-blank line holds one serialized `ScrapeEvent`. Postings beyond the
/// query's result limit are dropped, and `slow_mo` is slept between postings.
/// An unreadable file or malformed line aborts the run with an `EngineFault`.
pub struct ReplayEngine {
    source: PathBuf,
    options: EngineOptions,
    sleep: Sleeper,
}

impl ReplayEngine {
    pub fn new(source: impl Into<PathBuf>, options: EngineOptions) -> Self {
        Self::with_sleeper(source, options, thread_sleeper())
    }

    pub fn with_sleeper(source: impl Into<PathBuf>, options: EngineOptions, sleep: Sleeper) -> Self {
        Self {
            source: source.into(),
            options,
            sleep,
        }
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }
}

impl ScrapeEngine for ReplayEngine {
    fn run(&self, query: &Query, sink: &mut dyn EventSink) -> Result<(), EngineFault> {
        scrape_info!(
            "Replaying {:?} for query {:?} in {:?} (limit {}, headless={}, workers={})",
            self.source,
            query.text,
            query.locations,
            query.result_limit,
            self.options.headless,
            self.options.max_workers
        );

        let reader = BufReader::new(File::open(&self.source)?);
        let mut delivered: u32 = 0;

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            let event: ScrapeEvent =
                serde_json::from_str(trimmed).map_err(|err| EngineFault::Decode {
                    line: index + 1,
                    message: err.to_string(),
                })?;

            match event {
                ScrapeEvent::Data(_) => {
                    if delivered >= query.result_limit {
                        scrape_debug!("Result limit reached; skipping line {}", index + 1);
                        continue;
                    }
                    if delivered > 0 && !self.options.slow_mo.is_zero() {
                        (self.sleep)(self.options.slow_mo);
                    }
                    delivered += 1;
                    sink.emit(event);
                }
                ScrapeEvent::End => {
                    sink.emit(event);
                    return Ok(());
                }
                other => sink.emit(other),
            }
        }

        Ok(())
    }
}

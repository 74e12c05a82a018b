use std::collections::VecDeque;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use jobscrape_core::{update, Effect, Msg, Query, RunOutcome, RunResult, RunState};
use scrape_logging::{scrape_error, scrape_info, scrape_warn};

use crate::collector::EventCollector;
use crate::engine::ScrapeEngine;
use crate::persist::RecordStore;
use crate::throttle::{CooldownPolicy, Throttle};
use crate::timing::{system_clock, thread_sleeper, AttemptTimer, Clock, Sleeper};
use crate::EngineFault;

/// Fixed-delay retry around whole engine runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub fixed_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 2,
            fixed_delay: Duration::from_secs(10),
        }
    }
}

#[derive(Clone)]
pub struct RunSettings {
    pub retry: RetryPolicy,
    pub cooldowns: CooldownPolicy,
    pub clock: Clock,
    pub sleep: Sleeper,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            retry: RetryPolicy::default(),
            cooldowns: CooldownPolicy::default(),
            clock: system_clock(),
            sleep: thread_sleeper(),
        }
    }
}

struct AttemptSummary {
    record_count: usize,
    output_path: Option<PathBuf>,
}

/// Drives one engine against one query, retrying whole runs on engine faults.
pub struct RunController<E, S> {
    engine: E,
    store: S,
    settings: RunSettings,
}

impl<E: ScrapeEngine, S: RecordStore> RunController<E, S> {
    pub fn new(engine: E, store: S, settings: RunSettings) -> Self {
        Self {
            engine,
            store,
            settings,
        }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Run the query to completion. Blocks through cooldowns and retry delays.
    pub fn run_once(&self, query: &Query) -> RunResult {
        let started_at = (self.settings.clock)();
        let started = Instant::now();
        let mut summary = AttemptSummary {
            record_count: 0,
            output_path: None,
        };
        let mut outcome = RunOutcome::Failed;

        let (mut state, effects) = update(RunState::new(self.settings.retry.max_attempts), Msg::Start);
        let mut queue: VecDeque<Effect> = effects.into();

        while let Some(effect) = queue.pop_front() {
            let msg = match effect {
                Effect::StartAttempt { attempt } => {
                    match self.run_attempt(query, attempt, state.max_attempts()) {
                        Ok(done) => {
                            summary = done;
                            Msg::AttemptSucceeded
                        }
                        Err(fault) => {
                            scrape_error!("Error running scraper (attempt {}): {}", attempt, fault);
                            Msg::AttemptFaulted {
                                message: fault.to_string(),
                            }
                        }
                    }
                }
                Effect::WaitBeforeRetry { next_attempt } => {
                    let delay = self.settings.retry.fixed_delay;
                    scrape_warn!(
                        "Retrying in {:.1}s (attempt {}/{})",
                        delay.as_secs_f64(),
                        next_attempt,
                        state.max_attempts()
                    );
                    (self.settings.sleep)(delay);
                    Msg::RetryDelayElapsed
                }
                Effect::Finish { outcome: finished } => {
                    outcome = finished;
                    continue;
                }
            };
            let (next, effects) = update(state, msg);
            state = next;
            queue.extend(effects);
        }

        scrape_info!(
            "Total execution time: {:.2} seconds ({:?} after {} attempt(s))",
            started.elapsed().as_secs_f64(),
            outcome,
            state.attempt()
        );

        RunResult {
            record_count: summary.record_count,
            started_at,
            finished_at: (self.settings.clock)(),
            outcome,
            output_path: summary.output_path,
            attempts: state.attempt(),
            error: match outcome {
                RunOutcome::Success => None,
                RunOutcome::Failed => state.last_error().map(str::to_string),
            },
        }
    }

    fn run_attempt(
        &self,
        query: &Query,
        attempt: u32,
        max_attempts: u32,
    ) -> Result<AttemptSummary, EngineFault> {
        let _timer = AttemptTimer::start(attempt);
        let throttle = Throttle::new(self.settings.cooldowns, self.settings.sleep.clone());
        let mut collector = EventCollector::new(&self.store, throttle);

        scrape_info!("Starting scraper (attempt {}/{})...", attempt, max_attempts);
        if let Err(fault) = self.engine.run(query, &mut collector) {
            if !collector.is_ended() {
                return Err(fault);
            }
            // End was handled, so the run is complete and already persisted.
            scrape_warn!("Engine faulted after the end event (attempt {}): {}", attempt, fault);
        } else if !collector.is_ended() {
            scrape_warn!(
                "Engine returned without an end event; {} record(s) were not saved",
                collector.records().len()
            );
        }
        scrape_info!("Scraper finished successfully.");

        Ok(AttemptSummary {
            record_count: collector.records().len(),
            output_path: collector.output_path().map(PathBuf::from),
        })
    }
}

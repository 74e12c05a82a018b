use std::path::{Path, PathBuf};

use jobscrape_core::{JobRecord, RawJobPosting};
use scrape_logging::{scrape_error, scrape_info, scrape_warn};

use crate::engine::EventSink;
use crate::persist::RecordStore;
use crate::throttle::{CooldownReason, Throttle};
use crate::{MetricsPayload, PageError, PageErrorKind, ScrapeEvent};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollectorStats {
    pub data_events: usize,
    pub dropped: usize,
    pub metrics_events: usize,
    pub page_errors: usize,
}

/// Per-run context: accumulates records from one engine run and flushes them
/// to the store when the engine reports `End`.
///
/// A new collector is built for every attempt so nothing leaks between them.
pub struct EventCollector<'s> {
    store: &'s dyn RecordStore,
    throttle: Throttle,
    records: Vec<JobRecord>,
    stats: CollectorStats,
    ended: bool,
    output_path: Option<PathBuf>,
}

impl<'s> EventCollector<'s> {
    pub fn new(store: &'s dyn RecordStore, throttle: Throttle) -> Self {
        Self {
            store,
            throttle,
            records: Vec::new(),
            stats: CollectorStats::default(),
            ended: false,
            output_path: None,
        }
    }

    pub fn on_data(&mut self, posting: RawJobPosting) {
        self.stats.data_events += 1;
        if self.ended {
            scrape_warn!("Ignoring data event received after end of run");
            self.stats.dropped += 1;
            return;
        }
        match JobRecord::from_posting(posting) {
            Ok(record) => {
                scrape_info!(
                    "Processed job data: {:?} at {:?} ({} chars, {} skills)",
                    record.title(),
                    record.company(),
                    record.description_length(),
                    record.skills().len()
                );
                self.records.push(record);
            }
            Err(err) => {
                self.stats.dropped += 1;
                scrape_error!("Error processing data: {}", err);
            }
        }
    }

    pub fn on_metrics(&mut self, metrics: MetricsPayload) {
        self.stats.metrics_events += 1;
        scrape_info!("[ON_METRICS] {}", metrics);
        self.throttle.signal(CooldownReason::Metrics);
    }

    /// Page errors are contained here; classification only changes the log.
    pub fn on_error(&mut self, error: PageError) {
        self.stats.page_errors += 1;
        scrape_error!("[ON_ERROR] {}", error);
        match error.kind {
            PageErrorKind::ScriptExecution => {
                scrape_warn!("JavaScript error encountered. Check element selectors or page state.");
            }
            PageErrorKind::Timeout => {
                scrape_warn!("Timeout error encountered. The engine will continue with the next page.");
            }
            PageErrorKind::Unknown => {}
        }
        self.throttle.signal(CooldownReason::PageError);
    }

    pub fn on_end(&mut self) {
        if self.ended {
            scrape_warn!("Ignoring duplicate end event");
            return;
        }
        self.ended = true;
        scrape_info!(
            "Run ended: {} record(s) from {} data event(s), {} dropped, {} metrics, {} page error(s), {:.1}s cooling down",
            self.records.len(),
            self.stats.data_events,
            self.stats.dropped,
            self.stats.metrics_events,
            self.stats.page_errors,
            self.throttle.total_waited().as_secs_f64()
        );

        match self.store.save(&self.records) {
            Ok(path) => {
                scrape_info!("Data saved to {:?}", path);
                self.output_path = Some(path);
            }
            Err(err) => scrape_error!("Error saving data: {}", err),
        }
    }

    pub fn records(&self) -> &[JobRecord] {
        &self.records
    }

    pub fn stats(&self) -> CollectorStats {
        self.stats
    }

    pub fn is_ended(&self) -> bool {
        self.ended
    }

    pub fn output_path(&self) -> Option<&Path> {
        self.output_path.as_deref()
    }

    pub fn throttle(&self) -> &Throttle {
        &self.throttle
    }
}

impl EventSink for EventCollector<'_> {
    fn emit(&mut self, event: ScrapeEvent) {
        match event {
            ScrapeEvent::Data(posting) => self.on_data(posting),
            ScrapeEvent::Metrics(metrics) => self.on_metrics(metrics),
            ScrapeEvent::Error(error) => self.on_error(error),
            ScrapeEvent::End => self.on_end(),
        }
    }
}

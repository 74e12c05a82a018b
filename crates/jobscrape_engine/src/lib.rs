//! Jobscrape engine: event collection, throttling, persistence and run control.
mod collector;
mod controller;
mod export;
mod engine;
mod persist;
mod throttle;
mod timing;
mod types;

pub use collector::{CollectorStats, EventCollector};
pub use controller::{RetryPolicy, RunController, RunSettings};
pub use export::{encode_records, CSV_HEADER};
pub use engine::{EngineOptions, EventSink, ReplayEngine, ScrapeEngine};
pub use persist::{ensure_output_dir, AtomicFileWriter, CsvRecordStore, PersistError, RecordStore};
pub use throttle::{CooldownPolicy, CooldownReason, Throttle};
pub use timing::{system_clock, thread_sleeper, Clock, Sleeper};
pub use types::{EngineFault, MetricsPayload, PageError, PageErrorKind, ScrapeEvent};

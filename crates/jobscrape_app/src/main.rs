mod cli;
mod config;
mod logging;

use anyhow::{bail, Context};
use clap::Parser;
use jobscrape_core::RunOutcome;
use jobscrape_engine::{CsvRecordStore, ReplayEngine, RunController};
use scrape_logging::scrape_info;

use crate::cli::Cli;
use crate::config::ScrapeConfig;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::initialize(cli.log, cli.verbose);

    let mut config = match &cli.config {
        Some(path) => ScrapeConfig::load(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => ScrapeConfig::default(),
    };
    cli.apply_overrides(&mut config);

    let engine = ReplayEngine::new(&cli.events, config.engine_options()?);
    let settings = config.run_settings()?;
    let store = CsvRecordStore::with_clock(&config.output_dir, settings.clock.clone());
    let controller = RunController::new(engine, store, settings);

    let result = controller.run_once(&config.query);
    match result.outcome {
        RunOutcome::Success => {
            scrape_info!(
                "Collected {} record(s); output: {}",
                result.record_count,
                result
                    .output_path
                    .as_deref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "not saved".to_string())
            );
            Ok(())
        }
        RunOutcome::Failed => bail!(
            "scrape failed after {} attempt(s): {}",
            result.attempts,
            result.error.as_deref().unwrap_or("unknown error")
        ),
    }
}

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use jobscrape_core::Query;
use jobscrape_engine::{
    system_clock, thread_sleeper, CooldownPolicy, EngineOptions, RetryPolicy, RunSettings,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
    #[error("`{field}` must be a non-negative number of seconds, got {value}")]
    InvalidDuration { field: &'static str, value: f64 },
}

/// Settings file for one scrape run. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrapeConfig {
    pub output_dir: PathBuf,
    pub query: Query,
    pub engine: EngineSection,
    pub retry: RetrySection,
    pub cooldown: CooldownSection,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("output"),
            query: Query::default(),
            engine: EngineSection::default(),
            retry: RetrySection::default(),
            cooldown: CooldownSection::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSection {
    pub headless: bool,
    pub max_workers: usize,
    pub slow_mo_secs: f64,
    pub page_load_timeout_secs: f64,
    pub chrome_executable_path: Option<PathBuf>,
    pub chrome_binary_location: Option<PathBuf>,
}

impl Default for EngineSection {
    fn default() -> Self {
        let options = EngineOptions::default();
        Self {
            headless: options.headless,
            max_workers: options.max_workers,
            slow_mo_secs: options.slow_mo.as_secs_f64(),
            page_load_timeout_secs: options.page_load_timeout.as_secs_f64(),
            chrome_executable_path: None,
            chrome_binary_location: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrySection {
    pub max_attempts: u32,
    pub delay_secs: f64,
}

impl Default for RetrySection {
    fn default() -> Self {
        let policy = RetryPolicy::default();
        Self {
            max_attempts: policy.max_attempts,
            delay_secs: policy.fixed_delay.as_secs_f64(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CooldownSection {
    pub after_metrics_secs: f64,
    pub after_error_secs: f64,
}

impl Default for CooldownSection {
    fn default() -> Self {
        let policy = CooldownPolicy::default();
        Self {
            after_metrics_secs: policy.after_metrics.as_secs_f64(),
            after_error_secs: policy.after_error.as_secs_f64(),
        }
    }
}

impl ScrapeConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn parse(content: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str(content)
    }

    pub fn engine_options(&self) -> Result<EngineOptions, ConfigError> {
        Ok(EngineOptions {
            headless: self.engine.headless,
            max_workers: self.engine.max_workers,
            slow_mo: seconds("engine.slow_mo_secs", self.engine.slow_mo_secs)?,
            page_load_timeout: seconds(
                "engine.page_load_timeout_secs",
                self.engine.page_load_timeout_secs,
            )?,
            chrome_executable_path: self.engine.chrome_executable_path.clone(),
            chrome_binary_location: self.engine.chrome_binary_location.clone(),
        })
    }

    /// Run settings backed by the system clock and real sleeps.
    pub fn run_settings(&self) -> Result<RunSettings, ConfigError> {
        Ok(RunSettings {
            retry: RetryPolicy {
                max_attempts: self.retry.max_attempts,
                fixed_delay: seconds("retry.delay_secs", self.retry.delay_secs)?,
            },
            cooldowns: CooldownPolicy {
                after_metrics: seconds(
                    "cooldown.after_metrics_secs",
                    self.cooldown.after_metrics_secs,
                )?,
                after_error: seconds("cooldown.after_error_secs", self.cooldown.after_error_secs)?,
            },
            clock: system_clock(),
            sleep: thread_sleeper(),
        })
    }
}

fn seconds(field: &'static str, value: f64) -> Result<Duration, ConfigError> {
    Duration::try_from_secs_f64(value).map_err(|_| ConfigError::InvalidDuration { field, value })
}

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::ScrapeConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogTarget {
    Terminal,
    File,
    Both,
}

/// Replay a recorded job-board scrape and save the postings as CSV.
#[derive(Debug, Parser)]
#[command(name = "jobscrape", version)]
pub struct Cli {
    /// RON settings file; built-in defaults are used when omitted.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// JSON-lines file of scrape events to replay.
    #[arg(long)]
    pub events: PathBuf,

    /// Directory for `job_data_*.csv` output.
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Search text, overriding the configured query.
    #[arg(long)]
    pub query: Option<String>,

    #[arg(long, value_enum, default_value_t = LogTarget::Terminal)]
    pub log: LogTarget,

    /// Log at debug level.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn apply_overrides(&self, config: &mut ScrapeConfig) {
        if let Some(dir) = &self.output_dir {
            config.output_dir = dir.clone();
        }
        if let Some(text) = &self.query {
            config.query.text = text.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::{Cli, LogTarget};
    use crate::config::ScrapeConfig;

    #[test]
    fn events_path_is_required() {
        assert!(Cli::try_parse_from(["jobscrape"]).is_err());
    }

    #[test]
    fn overrides_replace_config_values() {
        let cli = Cli::try_parse_from([
            "jobscrape",
            "--events",
            "events.jsonl",
            "--output-dir",
            "runs",
            "--query",
            "rust",
            "--log",
            "both",
        ])
        .unwrap();
        assert_eq!(cli.log, LogTarget::Both);

        let mut config = ScrapeConfig::default();
        cli.apply_overrides(&mut config);
        assert_eq!(config.output_dir.to_str(), Some("runs"));
        assert_eq!(config.query.text, "rust");
        assert_eq!(config.query.locations, vec!["Ahmedabad".to_string()]);
    }

    #[test]
    fn defaults_log_to_terminal() {
        let cli = Cli::try_parse_from(["jobscrape", "--events", "e.jsonl"]).unwrap();
        assert_eq!(cli.log, LogTarget::Terminal);
        assert!(!cli.verbose);
        assert!(cli.config.is_none());
    }
}

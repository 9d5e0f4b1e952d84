use std::path::PathBuf;

use anyhow::{bail, Result};
use chrono::NaiveDate;
use clap::Parser;

use crate::config::FailOn;
use crate::roles::Role;

#[derive(Parser, Debug)]
#[command(
    name = "fleetdoc",
    about = "Check fleet driver documents for expiry and compliance",
    version
)]
pub struct Cli {
    /// JSON file of documents (bare array, {"data": [...]}, or {"drivers": [...], "documents": [...]})
    #[arg(required_unless_present = "online")]
    pub input: Option<PathBuf>,

    /// Fetch drivers and documents from the backend API instead of a file
    #[arg(long, conflicts_with = "input")]
    pub online: bool,

    /// Override the API base URL from config (only with --online)
    #[arg(long, value_name = "URL")]
    pub api_url: Option<String>,

    /// Config file [default: ./.fleetdoc/config.toml, fallback ~/.config/fleetdoc/config.toml]
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Evaluate as of this date (YYYY-MM-DD) instead of today
    #[arg(long, value_name = "DATE")]
    pub today: Option<NaiveDate>,

    /// Act as this team role [default: from config, else owner]
    #[arg(long, value_name = "ROLE")]
    pub role: Option<Role>,

    /// Only report this driver (repeatable)
    #[arg(long = "driver", value_name = "ID")]
    pub drivers: Vec<String>,

    /// List expired and soon-to-expire documents
    #[arg(long)]
    pub reminders: bool,

    /// Lowest driver verdict that fails the run [default: from config, else critical]
    #[arg(long, value_name = "LEVEL")]
    pub fail_on: Option<FailOn>,

    /// Report format
    #[arg(long, default_value = "terminal", value_name = "FORMAT")]
    pub report: ReportFormat,

    /// PDF output path; use without value to default to compliance-report.pdf
    #[arg(long, value_name = "FILE", num_args = 0..=1, default_missing_value = "compliance-report.pdf")]
    pub pdf: Option<PathBuf>,

    /// Show documents for every driver (not just critical/warning)
    #[arg(short, long)]
    pub verbose: bool,

    /// Only print summary line
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Cross-flag rules clap cannot express on its own.
    pub fn validate(&self) -> Result<()> {
        // clap's `requires` counts a bool flag as always present
        if self.api_url.is_some() && !self.online {
            bail!("--api-url only applies together with --online");
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ReportFormat {
    Terminal,
    Json,
    Pdf,
}

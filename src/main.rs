//! `fleetdoc`: derive driver document statuses and enforce fleet compliance.
//!
//! # Flow
//! 1. Parse CLI arguments ([`cli`]).
//! 2. Load config ([`config::load_config`]) and resolve the acting [`roles::Role`].
//! 3. Load documents from a JSON file or the backend API ([`source`]).
//! 4. Group documents per driver and classify them ([`rollup`], [`status`]).
//! 5. Render the requested report ([`report`]).
//! 6. Exit `0`, or `1` when any driver's verdict reaches the `fail_on` level.

mod cli;
mod config;
mod models;
mod roles;
mod rollup;
mod report;
mod source;
mod status;

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use cli::{Cli, ReportFormat};
use config::load_config;
use report::ReportData;
use roles::Capability;
use source::{DocumentSet, EnvToken};
use status::{classifier, reminders};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.validate()?;

    let default_level = if cli.verbose { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Config is looked up next to the input file, or in the working directory
    let base_dir = cli
        .input
        .as_deref()
        .and_then(Path::parent)
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    let config = load_config(&base_dir, cli.config.as_deref())?;

    let role = cli.role.unwrap_or(config.access.role);
    tracing::debug!(%role, "acting role");
    role.require(Capability::ViewDashboard)?;

    // --pdf implies PDF format
    let report_format = match &cli.pdf {
        Some(_) => ReportFormat::Pdf,
        None => cli.report,
    };
    if report_format != ReportFormat::Terminal {
        role.require(Capability::ExportReports)?;
    }
    if cli.reminders {
        role.require(Capability::ViewReminders)?;
    }

    let today = cli.today.unwrap_or_else(classifier::today);

    let (mut set, source_label) = if cli.online {
        let Some(base_url) = cli.api_url.clone().or_else(|| config.api.base_url.clone()) else {
            bail!("--online needs an API base URL: pass --api-url or set [api] base_url in config");
        };
        let client = source::api::build_client(config.api.timeout_secs)?;
        let tokens = EnvToken::new(&config.api.token_env);
        let set = source::api::fetch(&client, &base_url, &tokens, cli.quiet).await?;
        (set, base_url)
    } else {
        let Some(path) = cli.input.as_deref() else {
            bail!("no input file given");
        };
        (source::file::load(path)?, path.display().to_string())
    };

    if !cli.drivers.is_empty() {
        retain_drivers(&mut set, &cli.drivers);
    }

    if !cli.quiet {
        eprintln!(
            "  {} {} drivers, {} documents",
            "→".cyan(),
            set.drivers.len(),
            set.documents.len()
        );
    }

    let drivers = rollup::build_reports(
        &set.drivers,
        set.documents,
        &config.compliance.required_document_types,
        today,
    );
    let summary = rollup::summarize(&drivers);
    let reminder_list = cli.reminders.then(|| reminders::collect(&drivers));

    let data = ReportData {
        source: &source_label,
        as_of: today,
        summary: &summary,
        drivers: &drivers,
        reminders: reminder_list.as_deref(),
        show_documents: role.can(Capability::ViewDocuments),
    };

    let pdf_path = cli
        .pdf
        .clone()
        .unwrap_or_else(|| PathBuf::from("compliance-report.pdf"));

    match report_format {
        ReportFormat::Terminal => report::terminal::render(&data, cli.verbose, cli.quiet)?,
        ReportFormat::Json => report::json::render(&data)?,
        ReportFormat::Pdf => report::pdf::render(&data, &pdf_path)?,
    }

    // Exit code: 1 if any driver reaches the failure threshold
    let fail_on = cli.fail_on.unwrap_or(config.compliance.fail_on);
    if drivers.iter().any(|d| fail_on.is_failing(d.verdict)) {
        std::process::exit(1);
    }

    Ok(())
}

/// Keep only the requested drivers and their documents.
fn retain_drivers(set: &mut DocumentSet, ids: &[String]) {
    set.drivers.retain(|d| ids.contains(&d.id));
    set.documents.retain(|d| ids.contains(&d.driver_id));
}

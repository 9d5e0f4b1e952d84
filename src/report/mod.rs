//! Report renderers for compliance results.
//!
//! - [`terminal`] — colored, tabular output with summary box; respects `--verbose` / `--quiet`.
//! - [`json`] — machine-readable snapshot of summary, drivers and reminders.
//! - [`pdf`] — cover page with stat cards followed by a paginated driver table.

pub mod json;
pub mod pdf;
pub mod terminal;

use chrono::NaiveDate;

use crate::models::{DriverReport, FleetSummary, Reminder};

/// Everything a renderer needs for one run.
pub struct ReportData<'a> {
    pub source: &'a str,
    pub as_of: NaiveDate,
    pub summary: &'a FleetSummary,
    pub drivers: &'a [DriverReport],
    /// `None` when reminders were not requested.
    pub reminders: Option<&'a [Reminder]>,
    /// Whether per-document detail may be shown.
    pub show_documents: bool,
}

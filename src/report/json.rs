use anyhow::Result;
use chrono::NaiveDate;
use serde::Serialize;

use super::ReportData;
use crate::models::{
    ClassifiedDocument, ComplianceVerdict, DriverReport, FleetSummary, Reminder, StatusCounts,
};

#[derive(Serialize)]
struct JsonReport<'a> {
    as_of: NaiveDate,
    summary: &'a FleetSummary,
    drivers: Vec<JsonDriver<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reminders: Option<&'a [Reminder]>,
}

/// Driver entry; documents are omitted when the role may not see them.
#[derive(Serialize)]
struct JsonDriver<'a> {
    driver_id: &'a str,
    driver_name: &'a str,
    expected_total: usize,
    counts: &'a StatusCounts,
    verdict: ComplianceVerdict,
    #[serde(skip_serializing_if = "Option::is_none")]
    documents: Option<&'a [ClassifiedDocument]>,
}

impl<'a> JsonDriver<'a> {
    fn new(report: &'a DriverReport, show_documents: bool) -> Self {
        JsonDriver {
            driver_id: &report.driver_id,
            driver_name: &report.driver_name,
            expected_total: report.expected_total,
            counts: &report.counts,
            verdict: report.verdict,
            documents: show_documents.then_some(report.documents.as_slice()),
        }
    }
}

pub fn to_string(data: &ReportData<'_>) -> Result<String> {
    let report = JsonReport {
        as_of: data.as_of,
        summary: data.summary,
        drivers: data
            .drivers
            .iter()
            .map(|d| JsonDriver::new(d, data.show_documents))
            .collect(),
        reminders: data.reminders,
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

pub fn render(data: &ReportData<'_>) -> Result<()> {
    println!("{}", to_string(data)?);
    Ok(())
}

use std::collections::{BTreeSet, HashMap};

use chrono::NaiveDate;

use crate::models::{
    ClassifiedDocument, ComplianceVerdict, Document, Driver, DriverReport, FleetSummary,
    StatusCounts,
};
use crate::status::classifier::{classify, days_until_expiry, driver_compliance_status};

/// Display name for documents that carry no `driverId`.
pub const UNASSIGNED_DRIVER: &str = "(unassigned)";

/// Group documents by driver and derive each driver's verdict.
///
/// Roster drivers come first in roster order, including those with no
/// documents. Documents whose `driverId` is not on the roster get an ad-hoc
/// entry, in first-seen order, named after the id. Documents without any
/// `driverId` are collected under [`UNASSIGNED_DRIVER`].
pub fn build_reports(
    drivers: &[Driver],
    documents: Vec<Document>,
    required_types: &[String],
    today: NaiveDate,
) -> Vec<DriverReport> {
    let mut order: Vec<Driver> = drivers.to_vec();
    let mut index: HashMap<String, usize> = drivers
        .iter()
        .enumerate()
        .map(|(i, d)| (d.id.clone(), i))
        .collect();
    let mut grouped: Vec<Vec<Document>> = vec![Vec::new(); drivers.len()];

    for doc in documents {
        let slot = match index.get(&doc.driver_id) {
            Some(&i) => i,
            None => {
                tracing::debug!(driver_id = %doc.driver_id, "document for driver not on roster");
                order.push(Driver {
                    id: doc.driver_id.clone(),
                    name: String::new(),
                    total_documents: None,
                });
                grouped.push(Vec::new());
                index.insert(doc.driver_id.clone(), order.len() - 1);
                order.len() - 1
            }
        };
        grouped[slot].push(doc);
    }

    order
        .into_iter()
        .zip(grouped)
        .map(|(driver, docs)| build_report(driver, docs, required_types, today))
        .collect()
}

fn build_report(
    driver: Driver,
    docs: Vec<Document>,
    required_types: &[String],
    today: NaiveDate,
) -> DriverReport {
    let expected_total = expected_total(&driver, &docs, required_types);
    let verdict = driver_compliance_status(&docs, expected_total, today);

    let mut counts = StatusCounts::default();
    let documents: Vec<ClassifiedDocument> = docs
        .into_iter()
        .map(|doc| {
            let display_status = classify(&doc, today);
            counts.record(display_status);
            ClassifiedDocument {
                days_until_expiry: days_until_expiry(doc.expiry_date, today),
                id: doc.id,
                document_type: doc.document_type,
                status: doc.status,
                expiry_date: doc.expiry_date,
                display_status,
            }
        })
        .collect();

    let driver_name = if !driver.name.trim().is_empty() {
        driver.name
    } else if !driver.id.trim().is_empty() {
        driver.id.clone()
    } else {
        UNASSIGNED_DRIVER.to_string()
    };

    DriverReport {
        driver_id: driver.id,
        driver_name,
        expected_total,
        counts,
        verdict,
        documents,
    }
}

/// Expected document count for a driver.
///
/// Roster `totalDocuments` wins; otherwise the distinct types across required
/// and uploaded documents when required types are configured; otherwise the
/// number of uploaded documents.
fn expected_total(driver: &Driver, docs: &[Document], required_types: &[String]) -> usize {
    if let Some(total) = driver.total_documents {
        return total;
    }
    if required_types.is_empty() {
        return docs.len();
    }
    let types: BTreeSet<&str> = required_types
        .iter()
        .map(String::as_str)
        .chain(docs.iter().map(|d| d.document_type.as_str()))
        .collect();
    types.len()
}

/// Fleet-wide counts and drivers per verdict.
pub fn summarize(reports: &[DriverReport]) -> FleetSummary {
    let mut summary = FleetSummary {
        drivers: reports.len(),
        ..FleetSummary::default()
    };
    for report in reports {
        summary.counts.merge(&report.counts);
        match report.verdict {
            ComplianceVerdict::NoDocuments => summary.no_documents += 1,
            ComplianceVerdict::Critical => summary.critical += 1,
            ComplianceVerdict::Warning => summary.warning += 1,
            ComplianceVerdict::Compliant => summary.compliant += 1,
        }
    }
    summary
}

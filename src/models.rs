use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::status::dates;

/// A document record as served by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub driver_id: String,
    #[serde(default, alias = "type")]
    pub document_type: String,
    #[serde(default)]
    pub status: DocumentStatus,
    #[serde(default, deserialize_with = "dates::deserialize_expiry")]
    pub expiry_date: Option<NaiveDate>,
}

/// Backend document status. Only `PENDING` and `ACTIVE` drive classification;
/// every other value is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawStatus", into = "String")]
pub enum DocumentStatus {
    Pending,
    Active,
    Other(String),
}

impl Default for DocumentStatus {
    fn default() -> Self {
        DocumentStatus::Other(String::new())
    }
}

/// Wire form of `status`: any non-string (including `null`) is kept as empty.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawStatus {
    Text(String),
    Other(serde::de::IgnoredAny),
}

impl From<RawStatus> for DocumentStatus {
    fn from(raw: RawStatus) -> Self {
        match raw {
            RawStatus::Text(text) => text.as_str().into(),
            RawStatus::Other(_) => DocumentStatus::Other(String::new()),
        }
    }
}

impl From<&str> for DocumentStatus {
    fn from(raw: &str) -> Self {
        match raw {
            "PENDING" => DocumentStatus::Pending,
            "ACTIVE" => DocumentStatus::Active,
            other => DocumentStatus::Other(other.to_string()),
        }
    }
}

impl From<DocumentStatus> for String {
    fn from(status: DocumentStatus) -> Self {
        status.to_string()
    }
}

impl std::fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentStatus::Pending => write!(f, "PENDING"),
            DocumentStatus::Active => write!(f, "ACTIVE"),
            DocumentStatus::Other(raw) => write!(f, "{}", raw),
        }
    }
}

/// Per-document status shown to users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayStatus {
    Pending,
    Expired,
    Expiring,
    Verified,
}

impl std::fmt::Display for DisplayStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DisplayStatus::Pending => write!(f, "pending"),
            DisplayStatus::Expired => write!(f, "expired"),
            DisplayStatus::Expiring => write!(f, "expiring"),
            DisplayStatus::Verified => write!(f, "verified"),
        }
    }
}

/// Aggregate compliance verdict for one driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComplianceVerdict {
    #[serde(rename = "No Documents")]
    NoDocuments,
    Critical,
    Warning,
    Compliant,
}

impl std::fmt::Display for ComplianceVerdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ComplianceVerdict::NoDocuments => write!(f, "No Documents"),
            ComplianceVerdict::Critical => write!(f, "Critical"),
            ComplianceVerdict::Warning => write!(f, "Warning"),
            ComplianceVerdict::Compliant => write!(f, "Compliant"),
        }
    }
}

/// Document counts per [`DisplayStatus`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    pub pending: usize,
    pub expired: usize,
    pub expiring: usize,
    pub verified: usize,
    pub total: usize,
}

impl StatusCounts {
    pub fn record(&mut self, status: DisplayStatus) {
        match status {
            DisplayStatus::Pending => self.pending += 1,
            DisplayStatus::Expired => self.expired += 1,
            DisplayStatus::Expiring => self.expiring += 1,
            DisplayStatus::Verified => self.verified += 1,
        }
        self.total += 1;
    }

    pub fn merge(&mut self, other: &StatusCounts) {
        self.pending += other.pending;
        self.expired += other.expired;
        self.expiring += other.expiring;
        self.verified += other.verified;
        self.total += other.total;
    }
}

/// Roster entry for a driver.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Driver {
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Number of documents the driver is expected to hold, including
    /// document types never uploaded.
    #[serde(default)]
    pub total_documents: Option<usize>,
}

/// A document together with its derived status.
#[derive(Debug, Clone, Serialize)]
pub struct ClassifiedDocument {
    pub id: String,
    pub document_type: String,
    pub status: DocumentStatus,
    pub expiry_date: Option<NaiveDate>,
    pub days_until_expiry: Option<i64>,
    pub display_status: DisplayStatus,
}

#[derive(Debug, Clone, Serialize)]
pub struct DriverReport {
    pub driver_id: String,
    pub driver_name: String,
    pub expected_total: usize,
    pub counts: StatusCounts,
    pub verdict: ComplianceVerdict,
    pub documents: Vec<ClassifiedDocument>,
}

/// Fleet-wide totals across all drivers.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FleetSummary {
    pub counts: StatusCounts,
    pub drivers: usize,
    pub no_documents: usize,
    pub critical: usize,
    pub warning: usize,
    pub compliant: usize,
}

/// An expired or soon-to-expire document that needs renewal.
#[derive(Debug, Clone, Serialize)]
pub struct Reminder {
    pub driver_id: String,
    pub driver_name: String,
    pub document_id: String,
    pub document_type: String,
    pub expiry_date: NaiveDate,
    pub days_until_expiry: i64,
    pub display_status: DisplayStatus,
}

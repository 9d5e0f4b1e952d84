use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use serde::Deserialize;

use super::DocumentSet;
use crate::models::{Document, Driver};

const ACCEPTED_LAYOUTS: &str =
    r#"expected a document array, {"data": [...]}, or {"drivers": [...], "documents": [...]}"#;

/// Accepted file layouts: a bare document array, a saved API envelope, or a
/// full export. Unknown keys are rejected so a misspelled field cannot load
/// as an empty fleet.
#[derive(Deserialize)]
#[serde(untagged)]
enum FileContents {
    Documents(Vec<Document>),
    Envelope(Envelope),
    Export(Export),
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct Envelope {
    data: Vec<Document>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct Export {
    drivers: Option<Vec<Driver>>,
    documents: Option<Vec<Document>>,
}

/// Load documents (and optionally a driver roster) from a JSON file.
pub fn load(path: &Path) -> Result<DocumentSet> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    parse(&content).with_context(|| format!("Invalid document file {}", path.display()))
}

fn parse(content: &str) -> Result<DocumentSet> {
    let value: serde_json::Value = serde_json::from_str(content)?;
    let contents: FileContents = serde_json::from_value(value)
        .map_err(|_| anyhow!("unrecognised document file layout: {}", ACCEPTED_LAYOUTS))?;

    let set = match contents {
        FileContents::Documents(documents) | FileContents::Envelope(Envelope { data: documents }) => {
            DocumentSet {
                drivers: Vec::new(),
                documents,
            }
        }
        FileContents::Export(Export {
            drivers: None,
            documents: None,
        }) => bail!("document file has neither \"drivers\" nor \"documents\""),
        FileContents::Export(export) => DocumentSet {
            drivers: export.drivers.unwrap_or_default(),
            documents: export.documents.unwrap_or_default(),
        },
    };
    tracing::info!(
        drivers = set.drivers.len(),
        documents = set.documents.len(),
        "loaded document file"
    );
    Ok(set)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::models::DocumentStatus;

    #[test]
    fn test_bare_array() {
        let set = parse(
            r#"[
                {"id": "1", "driverId": "d1", "documentType": "CDL", "status": "ACTIVE", "expiryDate": "2024-06-25"},
                {"id": "2", "driverId": "d1", "type": "Medical", "status": "PENDING", "expiryDate": null}
            ]"#,
        )
        .unwrap();
        assert!(set.drivers.is_empty());
        assert_eq!(set.documents.len(), 2);
        assert_eq!(set.documents[0].status, DocumentStatus::Active);
        assert_eq!(set.documents[0].expiry_date, NaiveDate::from_ymd_opt(2024, 6, 25));
        assert_eq!(set.documents[1].document_type, "Medical");
        assert_eq!(set.documents[1].status, DocumentStatus::Pending);
        assert_eq!(set.documents[1].expiry_date, None);
    }

    #[test]
    fn test_export_with_roster() {
        let set = parse(
            r#"{
                "drivers": [{"id": "d1", "name": "Ann", "totalDocuments": 5}, {"id": "d2"}],
                "documents": [{"driverId": "d1", "status": "SUSPENDED", "expiryDate": "garbage"}]
            }"#,
        )
        .unwrap();
        assert_eq!(set.drivers.len(), 2);
        assert_eq!(set.drivers[0].total_documents, Some(5));
        assert_eq!(set.drivers[1].name, "");
        assert_eq!(
            set.documents[0].status,
            DocumentStatus::Other("SUSPENDED".to_string())
        );
        assert_eq!(set.documents[0].expiry_date, None);
    }

    #[test]
    fn test_missing_status_is_not_an_error() {
        let set = parse(r#"[{"driverId": "d1"}, {"driverId": "d2", "status": null}, {"driverId": "d3", "status": 7}]"#).unwrap();
        assert_eq!(set.documents[0].status, DocumentStatus::Other(String::new()));
        assert_eq!(set.documents[1].status, DocumentStatus::Other(String::new()));
        assert_eq!(set.documents[2].status, DocumentStatus::Other(String::new()));
    }

    #[test]
    fn test_data_envelope() {
        let set = parse(r#"{"data": [{"driverId": "d1", "status": "ACTIVE", "expiryDate": "2020-01-01"}]}"#)
            .unwrap();
        assert!(set.drivers.is_empty());
        assert_eq!(set.documents.len(), 1);
        assert_eq!(set.documents[0].driver_id, "d1");
    }

    #[test]
    fn test_roster_only_export() {
        let set = parse(r#"{"drivers": [{"id": "d1"}]}"#).unwrap();
        assert_eq!(set.drivers.len(), 1);
        assert!(set.documents.is_empty());
    }

    #[test]
    fn test_unrecognised_layout_is_rejected() {
        let misspelled =
            parse(r#"{"document": [{"driverId": "d1", "status": "ACTIVE", "expiryDate": "2020-01-01"}]}"#)
                .unwrap_err();
        assert!(misspelled.to_string().contains("unrecognised document file layout"));

        let extra = parse(r#"{"drivers": [], "documents": [], "document": []}"#).unwrap_err();
        assert!(extra.to_string().contains("unrecognised document file layout"));

        assert!(parse("{}").unwrap_err().to_string().contains("neither"));
        assert!(parse(r#""just a string""#).is_err());
    }

    #[test]
    fn test_load_reports_path_on_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("docs.json");
        std::fs::write(&path, "not json").unwrap();
        let err = load(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("docs.json"));

        assert!(load(&dir.path().join("missing.json")).is_err());
    }
}

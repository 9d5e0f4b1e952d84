use chrono::{Local, NaiveDate};

use crate::models::{ComplianceVerdict, DisplayStatus, Document, DocumentStatus, StatusCounts};

/// Inclusive number of days before expiry during which a document is `expiring`.
pub const EXPIRING_WINDOW_DAYS: i64 = 30;

/// The current local calendar date.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Signed whole days from `today` until `expiry`; `None` when there is no expiry.
///
/// Both sides are calendar dates, so time-of-day never shifts the result and a
/// document expiring at any moment tomorrow is one day out.
pub fn days_until_expiry(expiry: Option<NaiveDate>, today: NaiveDate) -> Option<i64> {
    expiry.map(|date| date.signed_duration_since(today).num_days())
}

/// Classify a single document into a [`DisplayStatus`] as of `today`.
///
/// - `PENDING` is always `pending`, whatever the expiry date.
/// - No expiry date: `verified` when `ACTIVE`, otherwise `pending`.
/// - Past expiry: `expired`.
/// - Within [`EXPIRING_WINDOW_DAYS`] (inclusive): `expiring`.
/// - Further out: `verified` when `ACTIVE`, otherwise `pending`.
pub fn classify(document: &Document, today: NaiveDate) -> DisplayStatus {
    if document.status == DocumentStatus::Pending {
        return DisplayStatus::Pending;
    }

    let settled = if document.status == DocumentStatus::Active {
        DisplayStatus::Verified
    } else {
        DisplayStatus::Pending
    };

    match days_until_expiry(document.expiry_date, today) {
        None => settled,
        Some(days) if days < 0 => DisplayStatus::Expired,
        Some(days) if days <= EXPIRING_WINDOW_DAYS => DisplayStatus::Expiring,
        Some(_) => settled,
    }
}

/// Count documents per [`DisplayStatus`].
pub fn classify_many<'a, I>(documents: I, today: NaiveDate) -> StatusCounts
where
    I: IntoIterator<Item = &'a Document>,
{
    let mut counts = StatusCounts::default();
    for document in documents {
        counts.record(classify(document, today));
    }
    counts
}

/// Reduce a driver's documents to a single [`ComplianceVerdict`].
///
/// `total_documents` is the caller's expected document count. It is only
/// consulted for the `No Documents` short-circuit and is not required to
/// agree with `documents.len()`.
pub fn driver_compliance_status(
    documents: &[Document],
    total_documents: usize,
    today: NaiveDate,
) -> ComplianceVerdict {
    if documents.is_empty() || total_documents == 0 {
        return ComplianceVerdict::NoDocuments;
    }
    verdict_from_counts(&classify_many(documents, today))
}

/// Verdict precedence over non-empty counts: Critical > Warning > Compliant.
pub fn verdict_from_counts(counts: &StatusCounts) -> ComplianceVerdict {
    if counts.expired > 0 {
        ComplianceVerdict::Critical
    } else if counts.expiring > 0 || counts.pending > 0 {
        ComplianceVerdict::Warning
    } else {
        ComplianceVerdict::Compliant
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn doc(status: &str, expiry: Option<NaiveDate>) -> Document {
        Document {
            id: String::new(),
            driver_id: "drv-1".to_string(),
            document_type: "CDL".to_string(),
            status: status.into(),
            expiry_date: expiry,
        }
    }

    fn today_fixture() -> NaiveDate {
        ymd(2024, 6, 1)
    }

    #[test]
    fn test_pending_ignores_expiry() {
        let t = today_fixture();
        for expiry in [None, Some(ymd(2020, 1, 1)), Some(ymd(2024, 6, 10)), Some(ymd(2030, 1, 1))] {
            assert_eq!(classify(&doc("PENDING", expiry), t), DisplayStatus::Pending);
        }
    }

    #[test]
    fn test_no_expiry() {
        let t = today_fixture();
        assert_eq!(classify(&doc("ACTIVE", None), t), DisplayStatus::Verified);
        assert_eq!(classify(&doc("EXPIRED", None), t), DisplayStatus::Pending);
        assert_eq!(classify(&doc("EXPIRING_SOON", None), t), DisplayStatus::Pending);
        assert_eq!(classify(&doc("", None), t), DisplayStatus::Pending);
    }

    #[test]
    fn test_window_boundaries() {
        let t = today_fixture();
        let at = |days: i64| Some(t + chrono::Duration::days(days));

        assert_eq!(classify(&doc("ACTIVE", at(-1)), t), DisplayStatus::Expired);
        assert_eq!(classify(&doc("ACTIVE", at(0)), t), DisplayStatus::Expiring);
        assert_eq!(classify(&doc("ACTIVE", at(30)), t), DisplayStatus::Expiring);
        assert_eq!(classify(&doc("ACTIVE", at(31)), t), DisplayStatus::Verified);
        assert_eq!(classify(&doc("REJECTED", at(31)), t), DisplayStatus::Pending);
        assert_eq!(classify(&doc("REJECTED", at(-1)), t), DisplayStatus::Expired);
        assert_eq!(classify(&doc("EXPIRED", at(12)), t), DisplayStatus::Expiring);
    }

    #[test]
    fn test_days_until_expiry() {
        let t = today_fixture();
        assert_eq!(days_until_expiry(None, t), None);
        assert_eq!(days_until_expiry(Some(ymd(2024, 5, 30)), t), Some(-2));
        assert_eq!(days_until_expiry(Some(ymd(2024, 6, 1)), t), Some(0));
        assert_eq!(days_until_expiry(Some(ymd(2024, 6, 2)), t), Some(1));
        assert_eq!(days_until_expiry(Some(ymd(2024, 6, 25)), t), Some(24));
    }

    #[test]
    fn test_classify_many_counts_sum_to_total() {
        let t = today_fixture();
        let docs = vec![
            doc("ACTIVE", Some(ymd(2024, 5, 30))),
            doc("ACTIVE", Some(ymd(2024, 6, 25))),
            doc("ACTIVE", Some(ymd(2025, 1, 1))),
            doc("PENDING", Some(ymd(2024, 7, 1))),
            doc("UNKNOWN", None),
            doc("ACTIVE", None),
        ];
        let counts = classify_many(&docs, t);
        assert_eq!(counts.total, docs.len());
        assert_eq!(
            counts.pending + counts.expired + counts.expiring + counts.verified,
            counts.total
        );
        assert_eq!(counts.pending, 2);
        assert_eq!(counts.verified, 2);
    }

    #[test]
    fn test_classify_many_empty() {
        assert_eq!(classify_many(std::iter::empty(), today_fixture()), StatusCounts::default());
    }

    #[test]
    fn test_reference_scenario() {
        let t = today_fixture();
        let a = doc("ACTIVE", Some(ymd(2024, 5, 30)));
        let b = doc("ACTIVE", Some(ymd(2024, 6, 25)));
        let c = doc("ACTIVE", Some(ymd(2025, 1, 1)));
        let d = doc("PENDING", Some(ymd(2024, 7, 1)));

        assert_eq!(classify(&a, t), DisplayStatus::Expired);
        assert_eq!(classify(&b, t), DisplayStatus::Expiring);
        assert_eq!(classify(&c, t), DisplayStatus::Verified);
        assert_eq!(classify(&d, t), DisplayStatus::Pending);

        let docs = vec![a, b, c, d];
        assert_eq!(
            classify_many(&docs, t),
            StatusCounts { pending: 1, expired: 1, expiring: 1, verified: 1, total: 4 }
        );
        assert_eq!(driver_compliance_status(&docs, 4, t), ComplianceVerdict::Critical);
    }

    #[test]
    fn test_no_documents_short_circuit() {
        let t = today_fixture();
        assert_eq!(driver_compliance_status(&[], 0, t), ComplianceVerdict::NoDocuments);
        assert_eq!(driver_compliance_status(&[], 5, t), ComplianceVerdict::NoDocuments);
        let expired = vec![doc("ACTIVE", Some(ymd(2020, 1, 1)))];
        assert_eq!(driver_compliance_status(&expired, 0, t), ComplianceVerdict::NoDocuments);
    }

    #[test]
    fn test_verdict_precedence() {
        let t = today_fixture();
        let verified = doc("ACTIVE", Some(ymd(2025, 1, 1)));
        let expired = doc("ACTIVE", Some(ymd(2024, 1, 1)));
        let expiring = doc("ACTIVE", Some(ymd(2024, 6, 5)));
        let pending = doc("PENDING", None);

        let mut docs = vec![verified.clone(); 10];
        assert_eq!(driver_compliance_status(&docs, 10, t), ComplianceVerdict::Compliant);

        docs.push(pending);
        assert_eq!(driver_compliance_status(&docs, 11, t), ComplianceVerdict::Warning);

        docs.push(expiring);
        assert_eq!(driver_compliance_status(&docs, 12, t), ComplianceVerdict::Warning);

        docs.push(expired);
        assert_eq!(driver_compliance_status(&docs, 13, t), ComplianceVerdict::Critical);
    }

    #[test]
    fn test_total_count_may_exceed_documents() {
        let t = today_fixture();
        let docs = vec![doc("ACTIVE", None)];
        assert_eq!(driver_compliance_status(&docs, 6, t), ComplianceVerdict::Compliant);
    }

    #[test]
    fn test_classify_is_deterministic() {
        let t = today_fixture();
        let d = doc("ACTIVE", Some(ymd(2024, 6, 20)));
        assert_eq!(classify(&d, t), classify(&d, t));
    }
}

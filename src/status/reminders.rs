use crate::models::{DisplayStatus, DriverReport, Reminder};

/// Collect every expired or expiring document across `reports`.
///
/// Ordered by days remaining (most overdue first), then driver name, then
/// document type.
pub fn collect(reports: &[DriverReport]) -> Vec<Reminder> {
    let mut reminders: Vec<Reminder> = reports
        .iter()
        .flat_map(|report| {
            report.documents.iter().filter_map(move |doc| {
                if !matches!(doc.display_status, DisplayStatus::Expired | DisplayStatus::Expiring) {
                    return None;
                }
                Some(Reminder {
                    driver_id: report.driver_id.clone(),
                    driver_name: report.driver_name.clone(),
                    document_id: doc.id.clone(),
                    document_type: doc.document_type.clone(),
                    expiry_date: doc.expiry_date?,
                    days_until_expiry: doc.days_until_expiry?,
                    display_status: doc.display_status,
                })
            })
        })
        .collect();

    reminders.sort_by(|a, b| {
        a.days_until_expiry
            .cmp(&b.days_until_expiry)
            .then_with(|| a.driver_name.cmp(&b.driver_name))
            .then_with(|| a.document_type.cmp(&b.document_type))
    });
    reminders
}

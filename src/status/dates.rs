use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer};

/// Date-only formats accepted for `expiryDate`, tried in order.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

/// Parse an expiry value into a calendar date.
///
/// Accepts plain dates, RFC 3339 timestamps (converted to the local calendar
/// date) and naive `YYYY-MM-DDTHH:MM:SS` timestamps. Time-of-day is always
/// discarded. Returns `None` for empty or unrecognised input.
pub fn parse_expiry(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(ts) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(ts.with_timezone(&Local).date_naive());
    }

    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(ts) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Some(ts.date());
        }
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawExpiry {
    Text(String),
    Other(serde::de::IgnoredAny),
}

/// Lenient `deserialize_with` helper for `expiryDate`.
///
/// Never fails: anything that is not a recognisable date becomes `None`.
pub fn deserialize_expiry<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawExpiry>::deserialize(deserializer)?;
    Ok(match raw {
        Some(RawExpiry::Text(text)) => {
            let parsed = parse_expiry(&text);
            if parsed.is_none() && !text.trim().is_empty() {
                tracing::warn!(expiry = %text, "unrecognised expiry date, treating as absent");
            }
            parsed
        }
        Some(RawExpiry::Other(_)) => {
            tracing::warn!("non-string expiry date, treating as absent");
            None
        }
        None => None,
    })
}

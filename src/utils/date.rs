//! Publish date parsing and formatting.
//!
//! Accepted input forms (all interpreted as UTC unless an offset is given):
//!
//! | Input                       | Parsed as                    |
//! |-----------------------------|------------------------------|
//! | `2024-01-15`                | midnight UTC                 |
//! | `2024-01-15 09:30`          | 09:30:00 UTC                 |
//! | `2024-01-15 09:30:12`       | 09:30:12 UTC                 |
//! | `2024-01-15T09:30:12Z`      | RFC 3339                     |
//! | `2024-01-15T09:30:12+02:00` | RFC 3339, converted to UTC   |

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};

/// Formats tried for dates without an explicit offset.
const NAIVE_DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S"];

/// Parse a publish date. Returns `None` for anything unrecognized or out of range.
pub fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    }

    NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|dt| dt.and_utc())
}

/// Machine-readable form used in JSON artifacts, sitemap and `<time datetime>`.
///
/// `2024-01-15T00:00:00Z`
pub fn to_iso(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Human-readable form used on pages.
///
/// `January 15, 2024`
pub fn to_display(dt: &DateTime<Utc>) -> String {
    dt.format("%B %-d, %Y").to_string()
}

/// Feed form. `Mon, 15 Jan 2024 00:00:00 +0000`
pub fn to_rfc2822(dt: &DateTime<Utc>) -> String {
    dt.to_rfc2822()
}

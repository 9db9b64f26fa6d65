//! Timestamp helpers.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};

/// Parse a backend timestamp and render it as an RFC 3339 UTC string with
/// millisecond precision (`2024-01-02T03:04:05.000Z`).
///
/// Accepts RFC 3339, `YYYY-MM-DD HH:MM:SS` (taken as UTC) and `YYYY-MM-DD`.
/// Returns `None` for empty or unparseable input.
#[must_use]
pub fn to_iso_string_or_none(value: &str) -> Option<String> {
    parse_timestamp(value).map(|ts| ts.to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// Parse a backend timestamp into UTC.
#[must_use]
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Some(ts.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rfc3339_is_normalized_to_utc() {
        assert_eq!(
            to_iso_string_or_none("2024-01-02T11:04:05+08:00").as_deref(),
            Some("2024-01-02T03:04:05.000Z")
        );
    }

    #[test]
    fn test_space_separated_and_date_only() {
        assert_eq!(
            to_iso_string_or_none("2024-01-02 03:04:05").as_deref(),
            Some("2024-01-02T03:04:05.000Z")
        );
        assert_eq!(
            to_iso_string_or_none("2024-01-02").as_deref(),
            Some("2024-01-02T00:00:00.000Z")
        );
    }

    #[test]
    fn test_invalid_input() {
        assert_eq!(to_iso_string_or_none(""), None);
        assert_eq!(to_iso_string_or_none("   "), None);
        assert_eq!(to_iso_string_or_none("not a date"), None);
    }
}

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

const ISO_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// Parse a date as typed into a form or returned by the API.
///
/// Accepts RFC 3339 date-times, naive `YYYY-MM-DDTHH:MM[:SS[.fff]]` (read as UTC)
/// and bare `YYYY-MM-DD` (midnight UTC).
pub fn parse(input: &str) -> Option<DateTime<Utc>> {
    let s = input.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

pub fn is_valid(input: &str) -> bool {
    parse(input).is_some()
}

/// Millisecond-precision UTC encoding, e.g. `2024-03-01T00:00:00.000Z`.
pub fn encode(dt: DateTime<Utc>) -> String {
    dt.format(ISO_FORMAT).to_string()
}

/// Re-encode a parseable date as ISO-8601; `None` if it does not parse.
pub fn normalize(input: &str) -> Option<String> {
    parse(input).map(encode)
}

pub fn display_day(input: &str) -> String {
    match parse(input) {
        Some(dt) => dt.format("%Y-%m-%d").to_string(),
        None => input.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_date_becomes_midnight_utc() {
        assert_eq!(normalize("2024-03-01").as_deref(), Some("2024-03-01T00:00:00.000Z"));
    }

    #[test]
    fn offset_date_time_is_converted_to_utc() {
        assert_eq!(
            normalize("2024-03-01T10:30:00+02:00").as_deref(),
            Some("2024-03-01T08:30:00.000Z")
        );
    }

    #[test]
    fn encoded_value_parses_back_unchanged() {
        let once = normalize("2023-12-31T23:59:59.250Z").unwrap();
        assert_eq!(once, "2023-12-31T23:59:59.250Z");
        assert_eq!(normalize(&once).unwrap(), once);
    }

    #[test]
    fn naive_date_time_without_seconds() {
        assert_eq!(normalize("2024-01-02T03:04").as_deref(), Some("2024-01-02T03:04:00.000Z"));
    }

    #[test]
    fn garbage_and_impossible_dates_are_rejected() {
        assert!(!is_valid(""));
        assert!(!is_valid("not a date"));
        assert!(!is_valid("2024-02-30"));
        assert!(!is_valid("2024-13-01"));
    }

    #[test]
    fn display_day_falls_back_to_raw_value() {
        assert_eq!(display_day("2024-03-01T08:30:00.000Z"), "2024-03-01");
        assert_eq!(display_day("soon"), "soon");
    }
}

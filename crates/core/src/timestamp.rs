//! Display formatting for wire timestamps.
//!
//! The wire value is never modified; only its rendering is normalized.

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::constants::TIMESTAMP_DISPLAY_FORMAT;

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parse an ISO-8601 timestamp. Values without an offset are taken as UTC.
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// Render a wire timestamp in the fixed display pattern, or verbatim if unparsable.
#[must_use]
pub fn render_timestamp(raw: &str) -> String {
    match parse_timestamp(raw) {
        Some(dt) => dt.format(TIMESTAMP_DISPLAY_FORMAT).to_string(),
        None => {
            tracing::debug!(raw, "unparsable timestamp, rendering verbatim");
            raw.to_owned()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rfc3339_utc() {
        assert_eq!(render_timestamp("2024-05-01T10:15:30Z"), "2024-05-01 10:15:30");
    }

    #[test]
    fn test_rfc3339_with_offset_converted_to_utc() {
        assert_eq!(render_timestamp("2024-05-01T12:15:30+02:00"), "2024-05-01 10:15:30");
    }

    #[test]
    fn test_naive_with_fraction_treated_as_utc() {
        assert_eq!(render_timestamp("2024-05-01T10:15:30.123456"), "2024-05-01 10:15:30");
    }

    #[test]
    fn test_naive_space_separated() {
        assert_eq!(render_timestamp("2024-05-01 10:15:30"), "2024-05-01 10:15:30");
    }

    #[test]
    fn test_garbage_rendered_verbatim() {
        assert_eq!(render_timestamp("yesterday"), "yesterday");
        assert!(parse_timestamp("yesterday").is_none());
    }
}

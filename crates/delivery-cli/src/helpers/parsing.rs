//! Parsing helpers for package IDs and timestamps.

use chrono::{DateTime, NaiveDate, Utc};

use delivery_core::PackageId;

use crate::errors::CliError;

/// Parse a package ID argument ("7" or "#7").
pub fn parse_package_id(value: &str) -> anyhow::Result<PackageId> {
    value
        .parse::<PackageId>()
        .map_err(|_| CliError::invalid_input(format!("Invalid package ID: {}", value)).into())
}

/// Parse a timestamp as unix seconds, ISO-8601 or YYYY-MM-DD.
pub fn parse_timestamp(value: &str) -> anyhow::Result<i64> {
    let trimmed = value.trim();
    if let Ok(seconds) = trimmed.parse::<i64>() {
        return Ok(seconds);
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(parsed.timestamp());
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        let naive = date
            .and_hms_opt(0, 0, 0)
            .ok_or_else(|| CliError::invalid_input(format!("Invalid date value: {}", value)))?;
        return Ok(DateTime::<Utc>::from_naive_utc_and_offset(naive, Utc).timestamp());
    }

    Err(CliError::invalid_input(format!(
        "Invalid time (expected unix seconds, ISO-8601 or YYYY-MM-DD): {}",
        value
    ))
    .into())
}

/// Render unix seconds as RFC 3339 UTC; 0 renders as "pending".
pub fn format_timestamp(seconds: i64) -> String {
    if seconds == 0 {
        return "pending".to_string();
    }
    DateTime::<Utc>::from_timestamp(seconds, 0)
        .map(|dt| dt.to_rfc3339())
        .unwrap_or_else(|| seconds.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_unix_seconds() {
        assert_eq!(parse_timestamp("1000").unwrap(), 1000);
        assert_eq!(parse_timestamp("-5").unwrap(), -5);
    }

    #[test]
    fn test_parse_rfc3339() {
        assert_eq!(parse_timestamp("1970-01-01T00:16:40Z").unwrap(), 1000);
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_timestamp("1970-01-02").unwrap(), 86_400);
    }

    #[test]
    fn test_parse_garbage_is_invalid_input() {
        let err = parse_timestamp("yesterday").unwrap_err();
        assert!(err.downcast_ref::<CliError>().is_some());
    }

    #[test]
    fn test_parse_package_id() {
        assert_eq!(parse_package_id("#3").unwrap(), PackageId::new(3));
        assert!(parse_package_id("x").is_err());
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(0), "pending");
        assert_eq!(format_timestamp(1000), "1970-01-01T00:16:40+00:00");
    }
}

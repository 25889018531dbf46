use chrono::{DateTime, NaiveDate};
use serde::{de, Deserialize, Deserializer};

use crate::core::error::{AppError, Result};

/// Parse a calendar date supplied at the boundary.
///
/// Accepts a plain `YYYY-MM-DD` date or a full RFC 3339 timestamp, in which
/// case the date portion as written is kept (`2024-03-01T00:00:00.000Z` is
/// 1 March regardless of the offset). Anything else fails fast.
pub fn parse_calendar_date(input: &str) -> Result<NaiveDate> {
    let value = input.trim();
    if value.is_empty() {
        return Err(AppError::InvalidInput("date must not be empty".to_string()));
    }

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date);
    }

    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.date_naive())
        .map_err(|_| {
            AppError::InvalidInput(format!(
                "'{}' is not a valid calendar date (expected YYYY-MM-DD)",
                value
            ))
        })
}

/// Optional variant: blank input means "not supplied"
pub fn parse_optional_calendar_date(input: Option<&str>) -> Result<Option<NaiveDate>> {
    match input.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => parse_calendar_date(value).map(Some),
    }
}

/// Serde adapter for `NaiveDate` fields that also accept ISO timestamps
pub fn deserialize_calendar_date<'de, D>(deserializer: D) -> std::result::Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_calendar_date(&raw).map_err(de::Error::custom)
}

/// Serde adapter for optional date fields; pair with `#[serde(default)]`
pub fn deserialize_optional_calendar_date<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    parse_optional_calendar_date(raw.as_deref()).map_err(de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_date() {
        let date = parse_calendar_date("2024-03-01").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
    }

    #[test]
    fn test_parse_timestamp_keeps_written_date() {
        let date = parse_calendar_date("2024-03-01T23:30:00.000+03:00").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(matches!(
            parse_calendar_date("01/03/2024"),
            Err(AppError::InvalidInput(_))
        ));
        assert!(matches!(
            parse_calendar_date("2024-02-30"),
            Err(AppError::InvalidInput(_))
        ));
        assert!(matches!(
            parse_calendar_date("  "),
            Err(AppError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_parse_optional_blank_is_none() {
        assert_eq!(parse_optional_calendar_date(None).unwrap(), None);
        assert_eq!(parse_optional_calendar_date(Some(" ")).unwrap(), None);
        assert!(parse_optional_calendar_date(Some("2024-13-01")).is_err());
    }
}

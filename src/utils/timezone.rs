use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

/// Error types for timezone operations
#[derive(Debug)]
pub enum TimezoneError {
    InvalidTimezone(String),
}

impl std::fmt::Display for TimezoneError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimezoneError::InvalidTimezone(tz) => write!(f, "Invalid timezone: {}", tz),
        }
    }
}

impl std::error::Error for TimezoneError {}

/// Parse a timezone string
pub fn parse_timezone(tz_str: &str) -> Result<Tz, TimezoneError> {
    tz_str
        .trim()
        .parse()
        .map_err(|_| TimezoneError::InvalidTimezone(tz_str.to_string()))
}

/// Calendar date of `instant` as seen in `timezone`
pub fn date_in(instant: DateTime<Utc>, timezone: &Tz) -> NaiveDate {
    instant.with_timezone(timezone).date_naive()
}

/// Today's date in `timezone`
pub fn today_in(timezone: &Tz) -> NaiveDate {
    date_in(Utc::now(), timezone)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_timezone() {
        assert!(parse_timezone("UTC").is_ok());
        assert!(parse_timezone("Europe/Paris").is_ok());
        assert!(parse_timezone(" Asia/Tokyo ").is_ok());
        assert!(parse_timezone("Invalid/Timezone").is_err());
    }

    #[test]
    fn test_date_in_crosses_midnight() {
        let instant = Utc.with_ymd_and_hms(2025, 12, 31, 20, 0, 0).unwrap();

        let utc = parse_timezone("UTC").unwrap();
        let tokyo = parse_timezone("Asia/Tokyo").unwrap();
        let new_york = parse_timezone("America/New_York").unwrap();

        assert_eq!(date_in(instant, &utc), NaiveDate::from_ymd_opt(2025, 12, 31).unwrap());
        assert_eq!(date_in(instant, &tokyo), NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());
        assert_eq!(date_in(instant, &new_york), NaiveDate::from_ymd_opt(2025, 12, 31).unwrap());
    }
}

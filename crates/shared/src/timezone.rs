//! Rendering of stored UTC instants in the configured timezone.

use chrono::{DateTime, SecondsFormat, Utc};
use chrono_tz::Tz;

use crate::error::AppError;

/// Parses an IANA timezone name such as `America/Sao_Paulo`.
///
/// # Errors
///
/// Returns `AppError::Internal` if the name is not a known zone.
pub fn parse_timezone(name: &str) -> Result<Tz, AppError> {
    name.parse::<Tz>()
        .map_err(|_| AppError::Internal(format!("unknown timezone: {name}")))
}

/// Formats an instant as RFC 3339 with millisecond precision and the zone's offset.
#[must_use]
pub fn format_in_timezone(instant: DateTime<Utc>, tz: Tz) -> String {
    instant
        .with_timezone(&tz)
        .to_rfc3339_opts(SecondsFormat::Millis, false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_known_zone() {
        assert_eq!(
            parse_timezone("America/Sao_Paulo").unwrap(),
            chrono_tz::America::Sao_Paulo
        );
    }

    #[test]
    fn test_parse_unknown_zone() {
        assert!(matches!(
            parse_timezone("Mars/Olympus"),
            Err(AppError::Internal(_))
        ));
    }

    #[test]
    fn test_format_applies_offset() {
        let instant = Utc.with_ymd_and_hms(2024, 3, 10, 15, 0, 0).unwrap();

        assert_eq!(
            format_in_timezone(instant, chrono_tz::America::Sao_Paulo),
            "2024-03-10T12:00:00.000-03:00"
        );
        assert_eq!(
            format_in_timezone(instant, chrono_tz::UTC),
            "2024-03-10T15:00:00.000+00:00"
        );
    }
}

pub mod ask;
pub mod conflicts;
pub mod delete;
pub mod events;
pub mod new;
pub mod wipe;

use anyhow::Result;
use chrono::{DateTime, NaiveDateTime, Utc};

/// Parse a date/time argument: RFC 3339 first, then "YYYY-MM-DDTHH:MM"
/// taken as UTC.
pub fn parse_datetime(input: &str) -> Result<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt.with_timezone(&Utc));
    }

    let naive = NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M").map_err(|_| {
        anyhow::anyhow!(
            "Could not parse date/time \"{}\". Expected RFC 3339 or YYYY-MM-DDTHH:MM",
            input
        )
    })?;
    Ok(naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parses_rfc3339() {
        let dt = parse_datetime("2026-02-24T09:00:00Z").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2026, 2, 24, 9, 0, 0).unwrap());
    }

    #[test]
    fn parses_short_form_as_utc() {
        let dt = parse_datetime("2026-02-24T09:00").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2026, 2, 24, 9, 0, 0).unwrap());
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_datetime("next tuesday-ish").is_err());
    }
}

pub mod data;
pub mod forecasting;
pub mod serve;
pub mod training;

pub use serve::serve;

use anyhow::{anyhow, Result};
use chrono::{DateTime, FixedOffset, Local};
use compute::timestamps::{local_to_utc, parse_input_datetime};

/// Reads an instant given as RFC 3339 or as local wall-clock `YYYY-MM-DDTHH:MM`.
pub fn parse_instant(value: &str) -> Result<DateTime<FixedOffset>> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(value) {
        return Ok(instant);
    }
    parse_input_datetime(value)
        .and_then(|naive| local_to_utc(&naive, &Local))
        .map(|utc| utc.with_timezone(&Local).fixed_offset())
        .ok_or_else(|| anyhow!("Invalid date and time '{}'", value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_parse_instant_keeps_offset() {
        let instant = parse_instant("2024-03-01T10:25:00+01:00").unwrap();
        assert_eq!(instant.offset().local_minus_utc(), 3600);
        assert_eq!(
            instant.with_timezone(&Utc).to_rfc3339(),
            "2024-03-01T09:25:00+00:00"
        );
    }

    #[test]
    fn test_parse_instant_local_input() {
        let instant = parse_instant("2024-03-01T10:25").unwrap();
        let local = instant.with_timezone(&Local);
        assert_eq!(local.format("%Y-%m-%dT%H:%M").to_string(), "2024-03-01T10:25");
    }

    #[test]
    fn test_parse_instant_rejects_garbage() {
        assert!(parse_instant("tomorrow").is_err());
    }
}

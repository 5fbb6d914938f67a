//! Timestamp handling for backend payloads and browser inputs.
//!
//! The backend emits timestamps in several spellings: RFC 3339, HTTP-date
//! (`Mon, 01 Jan 2024 00:00:00 GMT`) and naive ISO without an offset, which
//! is stored as UTC. Requests always go out as `YYYY-MM-DDTHH:MM:SS.mmmZ`.

use chrono::{
    DateTime, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Timelike, Utc,
};
use std::cmp::Ordering;

const NAIVE_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Parses any backend timestamp spelling into an instant.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(value) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Formats an instant the way requests expect it.
pub fn to_iso_instant(instant: &DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Re-spells a backend timestamp as a normalized instant.
pub fn normalize_instant(value: &str) -> Option<String> {
    parse_timestamp(value).map(|instant| to_iso_instant(&instant))
}

/// Orders timestamps chronologically.
///
/// Unparseable values sort after every parsed one and among themselves by
/// text, so the order stays total on mixed input.
pub fn compare_timestamps(a: &str, b: &str) -> Ordering {
    let key = |text: &str| {
        let parsed = parse_timestamp(text);
        (parsed.is_none(), parsed)
    };
    key(a).cmp(&key(b)).then_with(|| a.cmp(b))
}

/// Truncates an instant to the start of its hour in its own time zone.
pub fn start_of_hour<Tz: TimeZone>(instant: &DateTime<Tz>) -> Option<DateTime<Utc>> {
    instant
        .with_minute(0)?
        .with_second(0)?
        .with_nanosecond(0)
        .map(|dt| dt.with_timezone(&Utc))
}

/// First instant of `date` in `tz`.
pub fn start_of_day<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> Option<DateTime<Utc>> {
    let naive = date.and_hms_opt(0, 0, 0)?;
    tz.from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Last millisecond of `date` in `tz`.
pub fn end_of_day<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> Option<DateTime<Utc>> {
    let naive = date.and_hms_milli_opt(23, 59, 59, 999)?;
    tz.from_local_datetime(&naive)
        .latest()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Reads the value of an `<input type="datetime-local">`.
pub fn parse_input_datetime(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S"))
        .ok()
}

/// Reads the value of an `<input type="date">`.
pub fn parse_input_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

/// Interprets a wall-clock time in `tz`.
pub fn local_to_utc<Tz: TimeZone>(naive: &NaiveDateTime, tz: &Tz) -> Option<DateTime<Utc>> {
    tz.from_local_datetime(naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    #[test]
    fn test_parses_every_backend_spelling() {
        let expected = utc(2024, 1, 1, 5, 0);
        assert_eq!(parse_timestamp("2024-01-01T05:00:00Z"), Some(expected));
        assert_eq!(parse_timestamp("2024-01-01T00:00:00-05:00"), Some(expected));
        assert_eq!(parse_timestamp("Mon, 01 Jan 2024 05:00:00 GMT"), Some(expected));
        assert_eq!(parse_timestamp("2024-01-01T05:00:00"), Some(expected));
        assert_eq!(parse_timestamp("2024-01-01T05:00:00.000"), Some(expected));
        assert_eq!(parse_timestamp("2024-01-01 05:00:00"), Some(expected));
        assert_eq!(parse_timestamp("2024-01-01"), Some(utc(2024, 1, 1, 0, 0)));
    }

    #[test]
    fn test_rejects_garbage() {
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("yesterday"), None);
    }

    #[test]
    fn test_normalizes_to_millisecond_instant() {
        assert_eq!(
            normalize_instant("Mon, 01 Jan 2024 05:00:00 GMT").as_deref(),
            Some("2024-01-01T05:00:00.000Z")
        );
        assert_eq!(
            normalize_instant("2024-03-10T12:30:00+01:00").as_deref(),
            Some("2024-03-10T11:30:00.000Z")
        );
    }

    #[test]
    fn test_compare_mixes_spellings_chronologically() {
        assert_eq!(
            compare_timestamps("Mon, 01 Jan 2024 05:00:00 GMT", "2024-01-01T04:00:00"),
            Ordering::Greater
        );
        assert_eq!(compare_timestamps("b", "a"), Ordering::Greater);
    }

    #[test]
    fn test_compare_puts_unparseable_last() {
        assert_eq!(compare_timestamps("2024-01-01T04:00:00", "0-garbage"), Ordering::Less);
        assert_eq!(compare_timestamps("zzz", "2024-01-01T04:00:00"), Ordering::Greater);

        let mut values = vec![
            "garbage",
            "Mon, 01 Jan 2024 05:00:00 GMT",
            "2024-01-01T06:00:00",
            "2024-01-01T04:00:00",
            "abc",
        ];
        values.sort_by(|a, b| compare_timestamps(a, b));
        assert_eq!(
            values,
            vec![
                "2024-01-01T04:00:00",
                "Mon, 01 Jan 2024 05:00:00 GMT",
                "2024-01-01T06:00:00",
                "abc",
                "garbage",
            ]
        );
    }

    #[test]
    fn test_start_of_hour_in_offset_zone() {
        let tz = FixedOffset::east_opt(2 * 3600).unwrap();
        let local = tz.with_ymd_and_hms(2024, 5, 6, 14, 37, 12).unwrap();
        assert_eq!(start_of_hour(&local), Some(utc(2024, 5, 6, 12, 0)));
    }

    #[test]
    fn test_day_bounds() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        let start = start_of_day(date, &Utc).unwrap();
        let end = end_of_day(date, &Utc).unwrap();
        assert_eq!(to_iso_instant(&start), "2024-02-29T00:00:00.000Z");
        assert_eq!(to_iso_instant(&end), "2024-02-29T23:59:59.999Z");

        let tz = FixedOffset::west_opt(5 * 3600).unwrap();
        assert_eq!(
            to_iso_instant(&start_of_day(date, &tz).unwrap()),
            "2024-02-29T05:00:00.000Z"
        );
    }

    #[test]
    fn test_browser_input_values() {
        let naive = parse_input_datetime("2024-07-01T08:15").unwrap();
        assert_eq!(local_to_utc(&naive, &Utc), Some(utc(2024, 7, 1, 8, 15)));
        assert!(parse_input_datetime("").is_none());
        assert_eq!(
            parse_input_date("2024-07-01"),
            NaiveDate::from_ymd_opt(2024, 7, 1)
        );
        assert!(parse_input_date("07/01/2024").is_none());
    }
}

//! Creation timestamps: `DateTime<Utc>` in memory, ISO-8601 strings in documents.
//!
//! Use as `#[serde(with = "crate::timestamp")]` on a record's timestamp field.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, SubsecRound, Utc};
use serde::{Deserialize, Deserializer, Serializer};

/// Current instant, truncated to microseconds so the stored string is exact.
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

pub fn format(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Accepts RFC 3339 with any offset, and offset-less ISO-8601 (taken as UTC).
pub fn parse(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
        .map(|naive| naive.and_utc())
}

pub fn serialize<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format(ts))
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
    let raw = String::deserialize(deserializer)?;
    parse(&raw).map_err(|e| serde::de::Error::custom(format!("invalid timestamp {raw:?}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};

    #[test]
    fn format_then_parse_is_exact() {
        let ts = now();
        assert_eq!(ts.nanosecond() % 1_000, 0);
        assert_eq!(parse(&format(&ts)).unwrap(), ts);
    }

    #[test]
    fn parses_offset_and_naive_forms() {
        let expected = Utc.with_ymd_and_hms(2024, 3, 9, 14, 30, 5).unwrap();
        assert_eq!(parse("2024-03-09T14:30:05+00:00").unwrap(), expected);
        assert_eq!(parse("2024-03-09T16:30:05+02:00").unwrap(), expected);
        assert_eq!(parse("2024-03-09T14:30:05Z").unwrap(), expected);
        assert_eq!(parse("2024-03-09T14:30:05").unwrap(), expected);
        assert_eq!(parse("2024-03-09 14:30:05").unwrap(), expected);

        let with_micros = parse("2024-03-09T14:30:05.123456+00:00").unwrap();
        assert_eq!(with_micros.nanosecond(), 123_456_000);
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse("yesterday").is_err());
        assert!(parse("").is_err());
    }
}

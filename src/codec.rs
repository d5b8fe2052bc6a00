//! Scalar codecs for single field values.
//!
//! Decoders turn raw wire values into semantic types (rank codes, relative
//! timestamps). Encoders turn typed request inputs into the strings the API
//! expects in its query string. Nothing here touches I/O.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde_json::Value;

use crate::model::{Interval, Rank};

/// Unix time of 2016-01-06T00:00:00Z in milliseconds, the instant relative
/// timestamps are measured from.
pub const EPOCH0_MS: i64 = 1_452_038_400_000;

/// Wire format of date query parameters.
const DATE_PARAM_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Formats accepted for the `timestamp` field of collection metadata.
const COLLECTION_TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// The reference instant for relative timestamps.
pub fn epoch0() -> DateTime<Utc> {
    DateTime::from_timestamp_millis(EPOCH0_MS).unwrap_or_default()
}

/// Decode a rank code.
///
/// Anything that is not an integer in the rank table, `null` included,
/// decodes to `None`.
pub fn decode_rank(raw: &Value) -> Option<Rank> {
    let code = match raw {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64))?,
        _ => return None,
    };
    Rank::from_code(code)
}

/// Decode a "seconds since epoch0" field.
///
/// `null`, `false`, the empty string and anything non-numeric decode to
/// `None`. Numeric zero is a real value and decodes to [`epoch0`].
/// Fractional seconds are truncated.
pub fn decode_timestamp(raw: &Value) -> Option<DateTime<Utc>> {
    match raw {
        Value::Number(n) => match n.as_i64() {
            Some(seconds) => instant_from_seconds(seconds),
            None => decode_timestamp_seconds(n.as_f64()?),
        },
        Value::String(s) => instant_from_seconds(parse_leading_int(s)?),
        _ => None,
    }
}

/// Decode a floating point seconds value; `NaN` and infinities are `None`.
pub fn decode_timestamp_seconds(seconds: f64) -> Option<DateTime<Utc>> {
    if !seconds.is_finite() {
        return None;
    }
    let truncated = seconds.trunc();
    if truncated.abs() > i64::MAX as f64 / 1000.0 {
        return None;
    }
    instant_from_seconds(truncated as i64)
}

fn instant_from_seconds(seconds: i64) -> Option<DateTime<Utc>> {
    let millis = seconds.checked_mul(1000)?.checked_add(EPOCH0_MS)?;
    DateTime::from_timestamp_millis(millis)
}

/// Leading optionally-signed integer of a string, ignoring surrounding
/// whitespace and any trailing garbage ("42abc" is 42).
fn parse_leading_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let digits_start = usize::from(s.starts_with(['-', '+']));
    let digits_len = s[digits_start..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    if digits_len == 0 {
        return None;
    }
    s[..digits_start + digits_len].parse().ok()
}

/// Parse the `timestamp` of collection metadata as a UTC instant.
///
/// The API sends ISO-8601 without a zone; RFC 3339 with a zone is accepted too.
pub fn parse_collection_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    COLLECTION_TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
        .or_else(|| {
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|dt| dt.with_timezone(&Utc))
        })
}

/// A date query parameter: either an instant or a string sent verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateParam {
    Instant(DateTime<Utc>),
    Text(String),
}

impl From<DateTime<Utc>> for DateParam {
    fn from(value: DateTime<Utc>) -> Self {
        DateParam::Instant(value)
    }
}

impl From<&str> for DateParam {
    fn from(value: &str) -> Self {
        DateParam::Text(value.to_string())
    }
}

impl From<String> for DateParam {
    fn from(value: String) -> Self {
        DateParam::Text(value)
    }
}

/// An interval query parameter: either an [`Interval`] or a raw token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntervalParam {
    Interval(Interval),
    Text(String),
}

impl From<Interval> for IntervalParam {
    fn from(value: Interval) -> Self {
        IntervalParam::Interval(value)
    }
}

impl From<&str> for IntervalParam {
    fn from(value: &str) -> Self {
        IntervalParam::Text(value.to_string())
    }
}

impl From<String> for IntervalParam {
    fn from(value: String) -> Self {
        IntervalParam::Text(value)
    }
}

/// Encode a date parameter as `YYYY-MM-DD HH:MM:SS` (UTC).
///
/// Strings pass through unchanged, even empty ones.
pub fn encode_date_param(value: Option<&DateParam>) -> Option<String> {
    match value? {
        DateParam::Instant(instant) => Some(instant.format(DATE_PARAM_FORMAT).to_string()),
        DateParam::Text(text) => Some(text.clone()),
    }
}

/// Encode a date parameter given as loosely typed JSON.
///
/// Only strings are accepted (and passed through); every other JSON type
/// yields `None`. Typed callers go through [`DateParam`], which cannot hold
/// the other types.
#[cfg(test)]
pub(crate) fn encode_date_value(value: &Value) -> Option<String> {
    value.as_str().map(str::to_string)
}

/// Encode an interval parameter as its wire token. Strings pass through.
pub fn encode_interval_param(value: Option<&IntervalParam>) -> Option<String> {
    match value? {
        IntervalParam::Interval(interval) => Some(interval.token().to_string()),
        IntervalParam::Text(text) => Some(text.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use serde_json::json;

    #[test]
    fn test_epoch0_is_2016_01_06() {
        assert_eq!(epoch0(), Utc.with_ymd_and_hms(2016, 1, 6, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_decode_rank_known_codes() {
        assert_eq!(decode_rank(&json!(-1)), Some(Rank::None));
        assert_eq!(decode_rank(&json!(0)), Some(Rank::FleetAdmiral));
        assert_eq!(decode_rank(&json!(3)), Some(Rank::Major));
        assert_eq!(decode_rank(&json!(6)), Some(Rank::Candidate));
        assert_eq!(decode_rank(&json!(2.0)), Some(Rank::Commander));
    }

    #[test]
    fn test_decode_rank_unknown_is_none() {
        assert_eq!(decode_rank(&json!(-2)), None);
        assert_eq!(decode_rank(&json!(7)), None);
        assert_eq!(decode_rank(&json!(null)), None);
        assert_eq!(decode_rank(&json!(2.5)), None);
        assert_eq!(decode_rank(&json!("Major")), None);
    }

    #[test]
    fn test_decode_timestamp_zero_is_epoch0() {
        assert_eq!(decode_timestamp(&json!(0)), Some(epoch0()));
        assert_eq!(decode_timestamp_seconds(0.0), Some(epoch0()));
    }

    #[test]
    fn test_decode_timestamp_offsets() {
        assert_eq!(
            decode_timestamp(&json!(60)),
            Some(epoch0() + Duration::seconds(60))
        );
        assert_eq!(
            decode_timestamp(&json!(86400)),
            Some(Utc.with_ymd_and_hms(2016, 1, 7, 0, 0, 0).unwrap())
        );
        assert_eq!(
            decode_timestamp(&json!(90.9)),
            Some(epoch0() + Duration::seconds(90))
        );
        assert_eq!(
            decode_timestamp(&json!("120")),
            Some(epoch0() + Duration::seconds(120))
        );
    }

    #[test]
    fn test_decode_timestamp_falsy_is_none() {
        assert_eq!(decode_timestamp(&json!(null)), None);
        assert_eq!(decode_timestamp(&json!("")), None);
        assert_eq!(decode_timestamp(&json!(false)), None);
        assert_eq!(decode_timestamp_seconds(f64::NAN), None);
    }

    #[test]
    fn test_decode_timestamp_garbage_is_none() {
        assert_eq!(decode_timestamp(&json!("soon")), None);
        assert_eq!(decode_timestamp(&json!([1])), None);
        assert_eq!(decode_timestamp(&json!({"s": 1})), None);
        assert_eq!(decode_timestamp_seconds(f64::INFINITY), None);
    }

    #[test]
    fn test_parse_collection_timestamp() {
        let expected = Utc.with_ymd_and_hms(2019, 10, 9, 23, 59, 0).unwrap();
        assert_eq!(
            parse_collection_timestamp("2019-10-09T23:59:00"),
            Some(expected)
        );
        assert_eq!(
            parse_collection_timestamp("2019-10-09 23:59:00"),
            Some(expected)
        );
        assert_eq!(
            parse_collection_timestamp("2019-10-09T23:59:00Z"),
            Some(expected)
        );
        assert_eq!(parse_collection_timestamp("yesterday"), None);
    }

    #[test]
    fn test_encode_date_param_formats_instant() {
        let instant = Utc.with_ymd_and_hms(2024, 9, 14, 23, 45, 56).unwrap();
        assert_eq!(
            encode_date_param(Some(&instant.into())).as_deref(),
            Some("2024-09-14 23:45:56")
        );
        assert_eq!(
            encode_date_param(Some(&epoch0().into())).as_deref(),
            Some("2016-01-06 00:00:00")
        );
    }

    #[test]
    fn test_encode_date_param_passes_strings_through() {
        assert_eq!(
            encode_date_param(Some(&"2024-01-01".into())).as_deref(),
            Some("2024-01-01")
        );
        assert_eq!(encode_date_param(Some(&"".into())).as_deref(), Some(""));
        assert_eq!(encode_date_param(None), None);
    }

    #[test]
    fn test_encode_date_value_rejects_non_strings() {
        assert_eq!(
            encode_date_value(&json!("random text")).as_deref(),
            Some("random text")
        );
        let non_strings = [
            json!(true),
            json!(false),
            json!(8),
            json!(8.1),
            json!({}),
            json!({"key": "value"}),
            json!([]),
        ];
        for value in non_strings {
            assert_eq!(encode_date_value(&value), None, "input: {value}");
        }
    }

    #[test]
    fn test_encode_interval_param() {
        assert_eq!(
            encode_interval_param(Some(&Interval::Daily.into())).as_deref(),
            Some("day")
        );
        assert_eq!(
            encode_interval_param(Some(&"month".into())).as_deref(),
            Some("month")
        );
        assert_eq!(encode_interval_param(None), None);
    }
}

//! UTC timestamp conversions

use chrono::{DateTime, Utc};

/// Seconds since the Unix epoch, with microsecond precision
#[allow(clippy::cast_precision_loss)]
pub fn as_timestamp(value: DateTime<Utc>) -> f64 {
    value.timestamp_micros() as f64 / 1_000_000.0
}

/// Date for a timestamp in seconds; non-finite or out-of-range values map to the epoch
#[allow(clippy::cast_possible_truncation)]
pub fn as_datetime(timestamp: f64) -> DateTime<Utc> {
    if !timestamp.is_finite() {
        return epoch();
    }
    let micros = (timestamp * 1_000_000.0).round() as i64;
    DateTime::from_timestamp_micros(micros).unwrap_or_else(epoch)
}

/// Date for a textual timestamp; anything unparseable maps to the epoch
pub fn parse_timestamp(text: &str) -> DateTime<Utc> {
    text.trim()
        .parse::<f64>()
        .map_or_else(|_| epoch(), as_datetime)
}

/// Current time truncated to microseconds, so it survives a timestamp round trip
pub fn now() -> DateTime<Utc> {
    as_datetime(as_timestamp(Utc::now()))
}

/// 1970-01-01T00:00:00Z
pub fn epoch() -> DateTime<Utc> {
    DateTime::<Utc>::default()
}

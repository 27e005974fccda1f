//! Formatting helpers for prices, durations and timestamps
//!
//! Pure functions shared by every renderer: compact price strings such as
//! `1.23M`, digit grouping for exact amounts, and the human-readable
//! "time remaining" / "time elapsed" strings used in profile tables.

use chrono::{DateTime, TimeZone, Utc};
use thiserror::Error;

/// Unit thresholds for compact prices, largest first
const PRICE_UNITS: [(i64, &str); 4] = [
    (1_000_000_000_000, "T"),
    (1_000_000_000, "B"),
    (1_000_000, "M"),
    (1_000, "K"),
];

const SECONDS_PER_MINUTE: i64 = 60;
const SECONDS_PER_HOUR: i64 = 60 * SECONDS_PER_MINUTE;
const SECONDS_PER_DAY: i64 = 24 * SECONDS_PER_HOUR;
const SECONDS_PER_WEEK: i64 = 7 * SECONDS_PER_DAY;

/// Errors from parsing user or wire input
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormatError {
    /// Timestamp was not valid RFC 3339
    #[error("Invalid timestamp: '{0}'")]
    Timestamp(String),

    /// Argument was not a valid integer ID
    #[error("Invalid ID: {0}")]
    InvalidId(String),
}

/// Formats a price either compactly with a unit suffix or as a plain grouped number.
///
/// ```
/// use bcncli::format::format_price;
///
/// assert_eq!(format_price(1_230_000, false), "1.23M");
/// assert_eq!(format_price(200_000_000, false), "200M");
/// assert_eq!(format_price(123_000, true), "123 000");
/// ```
pub fn format_price(value: i64, plain: bool) -> String {
    if plain {
        return group_digits(value);
    }

    let abs = value.unsigned_abs();
    for (threshold, suffix) in PRICE_UNITS {
        if abs >= threshold as u64 {
            let scaled = value as f64 / threshold as f64;
            let text = format!("{:.2}", scaled);
            let text = text.trim_end_matches('0').trim_end_matches('.');
            return format!("{}{}", text, suffix);
        }
    }

    value.to_string()
}

/// Groups the decimal digits of `value` in threes separated by single spaces
fn group_digits(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let lead = match digits.len() % 3 {
        0 => 3,
        n => n,
    };

    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    out.push_str(&digits[..lead]);
    let mut i = lead;
    while i < digits.len() {
        out.push(' ');
        out.push_str(&digits[i..i + 3]);
        i += 3;
    }
    out
}

/// Parses a positional ID argument
pub fn parse_id(arg: &str) -> Result<i64, FormatError> {
    arg.trim()
        .parse::<i64>()
        .map_err(|_| FormatError::InvalidId(arg.to_string()))
}

/// Parses an RFC 3339 timestamp into UTC
pub fn parse_timestamp(iso: &str) -> Result<DateTime<Utc>, FormatError> {
    DateTime::parse_from_rfc3339(iso)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|_| FormatError::Timestamp(iso.to_string()))
}

/// Converts epoch milliseconds to an RFC 3339 string, or `-` when unset
pub fn epoch_millis_to_rfc3339(ms: i64) -> String {
    if ms <= 0 {
        return "-".to_string();
    }
    match Utc.timestamp_millis_opt(ms).single() {
        Some(t) => t.to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
        None => "-".to_string(),
    }
}

/// Time left until `target`, e.g. `1m 5s`. Returns `0` once `target` has passed.
pub fn humanize_remaining(target: DateTime<Utc>, now: DateTime<Utc>) -> String {
    humanize_seconds((target - now).num_seconds())
}

/// Time since `target`, e.g. `1h 1m 5s`. Returns `0` if `target` is in the future.
pub fn humanize_elapsed(target: DateTime<Utc>, now: DateTime<Utc>) -> String {
    humanize_seconds((now - target).num_seconds())
}

/// Parses `iso` and returns the time remaining until it
pub fn remaining_until(iso: &str, now: DateTime<Utc>) -> Result<String, FormatError> {
    parse_timestamp(iso).map(|t| humanize_remaining(t, now))
}

/// Parses `iso` and returns the time elapsed since it
pub fn elapsed_since(iso: &str, now: DateTime<Utc>) -> Result<String, FormatError> {
    parse_timestamp(iso).map(|t| humanize_elapsed(t, now))
}

fn humanize_seconds(total: i64) -> String {
    if total <= 0 {
        return "0".to_string();
    }

    let mut rest = total;
    let weeks = rest / SECONDS_PER_WEEK;
    rest %= SECONDS_PER_WEEK;
    let days = rest / SECONDS_PER_DAY;
    rest %= SECONDS_PER_DAY;
    let hours = rest / SECONDS_PER_HOUR;
    rest %= SECONDS_PER_HOUR;
    let minutes = rest / SECONDS_PER_MINUTE;
    let seconds = rest % SECONDS_PER_MINUTE;

    let mut parts = Vec::with_capacity(5);
    for (amount, unit) in [(weeks, 'w'), (days, 'd'), (hours, 'h'), (minutes, 'm')] {
        if amount > 0 {
            parts.push(format!("{}{}", amount, unit));
        }
    }
    // Seconds are always shown when nothing larger is
    if seconds > 0 || parts.is_empty() {
        parts.push(format!("{}s", seconds));
    }

    parts.join(" ")
}

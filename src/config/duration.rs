use std::time::Duration;

use serde::{de, Deserialize, Deserializer};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid duration '{value}': {reason}")]
pub struct DurationParseError {
    pub value: String,
    pub reason: &'static str,
}

const SECOND_MS: f64 = 1_000.0;
const MINUTE_MS: f64 = SECOND_MS * 60.0;
const HOUR_MS: f64 = MINUTE_MS * 60.0;
const DAY_MS: f64 = HOUR_MS * 24.0;
const WEEK_MS: f64 = DAY_MS * 7.0;
const YEAR_MS: f64 = DAY_MS * 365.25;

/// Parses token lifetimes written as `"15m"`, `"7d"`, `"1.5h"`, `"500ms"` or
/// `"2 weeks"`. A bare number is a count of seconds.
pub fn parse_duration(input: &str) -> Result<Duration, DurationParseError> {
    let fail = |reason| DurationParseError {
        value: input.to_string(),
        reason,
    };

    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(fail("empty value"));
    }

    let split = trimmed
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(trimmed.len());
    let (number, unit) = trimmed.split_at(split);

    if number.is_empty() {
        return Err(fail("missing amount"));
    }
    let amount: f64 = number.parse().map_err(|_| fail("malformed amount"))?;

    let unit_ms = match unit.trim().to_ascii_lowercase().as_str() {
        "" => SECOND_MS,
        "ms" | "msec" | "msecs" | "millisecond" | "milliseconds" => 1.0,
        "s" | "sec" | "secs" | "second" | "seconds" => SECOND_MS,
        "m" | "min" | "mins" | "minute" | "minutes" => MINUTE_MS,
        "h" | "hr" | "hrs" | "hour" | "hours" => HOUR_MS,
        "d" | "day" | "days" => DAY_MS,
        "w" | "week" | "weeks" => WEEK_MS,
        "y" | "yr" | "yrs" | "year" | "years" => YEAR_MS,
        _ => return Err(fail("unknown unit")),
    };

    let millis = (amount * unit_ms).round();
    if !millis.is_finite() || millis > u64::MAX as f64 {
        return Err(fail("out of range"));
    }

    Ok(Duration::from_millis(millis as u64))
}

/// Serde adapter accepting either a duration string or an integer second count,
/// since environment values arrive as integers when they look numeric.
pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Seconds(u64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Seconds(seconds) => Ok(Duration::from_secs(seconds)),
        Raw::Text(text) => parse_duration(&text).map_err(de::Error::custom),
    }
}

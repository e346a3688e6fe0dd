//! Chart timeframe chosen from a contract's expiration date.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Serialize;

/// Days assumed when the expiration is missing or unparseable
pub const DEFAULT_DAYS_TO_EXPIRY: i64 = 10;

const SECONDS_PER_DAY: i64 = 86_400;

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeframeChoice {
    pub interval: &'static str,
    pub period: &'static str,
}

impl TimeframeChoice {
    pub const fn new(interval: &'static str, period: &'static str) -> Self {
        Self { interval, period }
    }

    /// Bucket a days-to-expiry count
    pub fn for_days(days: i64) -> Self {
        match days {
            d if d <= 2 => Self::new("5m", "5d"),
            d if d <= 7 => Self::new("15m", "7d"),
            d if d <= 14 => Self::new("1h", "1mo"),
            _ => Self::new("4h", "3mo"),
        }
    }
}

/// Parse an ISO-8601 date or datetime. Naive values are read as UTC.
pub fn parse_expiration(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Some(naive) = NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
    {
        return Some(naive.and_utc());
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Whole days from `now` until expiration, floored
pub fn days_to_expiry(expiration: Option<&str>, now: DateTime<Utc>) -> i64 {
    expiration
        .and_then(parse_expiration)
        .map(|exp| (exp - now).num_seconds().div_euclid(SECONDS_PER_DAY))
        .unwrap_or(DEFAULT_DAYS_TO_EXPIRY)
}

/// Total over all inputs: anything unparseable behaves like ten days out.
pub fn select_timeframe(expiration: Option<&str>, now: DateTime<Utc>) -> TimeframeChoice {
    TimeframeChoice::for_days(days_to_expiry(expiration, now))
}

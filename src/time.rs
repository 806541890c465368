//! Turns "posted 3 hours ago" style phrases into absolute timestamps.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

pub const MINUTE_MS: i64 = 60 * 1000;
pub const HOUR_MS: i64 = 60 * MINUTE_MS;
pub const DAY_MS: i64 = 24 * HOUR_MS;
pub const WEEK_MS: i64 = 7 * DAY_MS;
/// Months are a flat 30 days.
pub const MONTH_MS: i64 = 30 * DAY_MS;

/// One row of the unit table: the keyword searched for in the phrase, its length in
/// milliseconds and the pattern that pulls the leading count out of the phrase.
#[derive(Debug)]
pub struct TimeUnit {
    pub keyword: &'static str,
    pub millis: i64,
    count: Regex,
    /// Word that stands for a count of one when no digits are present.
    implied_one: Option<&'static str>,
}

impl TimeUnit {
    fn new(keyword: &'static str, millis: i64, implied_one: Option<&'static str>) -> Self {
        // The keyword is a plain word, so the pattern is always valid.
        let count = Regex::new(&format!(r"([0-9]+)\s*{keyword}")).unwrap();
        Self {
            keyword,
            millis,
            count,
            implied_one,
        }
    }

    /// Count of units mentioned in an already lowercased phrase.
    fn count_in(&self, phrase: &str) -> i64 {
        if let Some(caps) = self.count.captures(phrase) {
            // ASCII digits only, so the parse can fail just on overflow.
            return caps[1].parse().unwrap_or(i64::MAX);
        }
        match self.implied_one {
            Some(word) if phrase.contains(word) => 1,
            _ => 0,
        }
    }
}

/// Units in the order they are tried. Only the first unit whose keyword occurs counts.
pub static UNITS: Lazy<[TimeUnit; 5]> = Lazy::new(|| {
    [
        TimeUnit::new("minute", MINUTE_MS, None),
        TimeUnit::new("hour", HOUR_MS, None),
        TimeUnit::new("day", DAY_MS, Some("yesterday")),
        TimeUnit::new("week", WEEK_MS, None),
        TimeUnit::new("month", MONTH_MS, None),
    ]
});

/// Resolves a relative time phrase against `now`.
///
/// Never fails: a phrase without a known unit resolves to `now` itself.
pub fn normalize(phrase: &str, now: DateTime<Utc>) -> DateTime<Utc> {
    let phrase = phrase.to_lowercase();
    let offset = UNITS
        .iter()
        .find(|unit| phrase.contains(unit.keyword))
        .map(|unit| unit.count_in(&phrase).saturating_mul(unit.millis))
        .unwrap_or(0);

    let millis = now.timestamp_millis().saturating_sub(offset);
    DateTime::from_timestamp_millis(millis).unwrap_or(DateTime::<Utc>::MIN_UTC)
}

//! Calendar dates for puzzle scheduling and archive navigation.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::constants::ISO_DATE_FORMAT;

/// Error raised when a string is not a canonical ISO calendar date.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("`{input}` is not a valid ISO calendar date (expected YYYY-MM-DD)")]
pub struct DateParseError {
    pub input: String,
}

/// A validated calendar date in canonical `YYYY-MM-DD` form.
///
/// The persisted keyspace and the navigation parameter both carry dates as
/// strings; validating them into this newtype up front means `Ord` always
/// agrees with calendar order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PuzzleDate(NaiveDate);

impl PuzzleDate {
    /// Today's date in UTC, matching the reference wire format for "today".
    #[must_use]
    pub fn today_utc() -> Self {
        Self(Utc::now().date_naive())
    }

    /// The preceding calendar day, if representable.
    #[must_use]
    pub fn previous(self) -> Option<Self> {
        self.0.pred_opt().map(Self)
    }

    /// The following calendar day, if representable.
    #[must_use]
    pub fn next(self) -> Option<Self> {
        self.0.succ_opt().map(Self)
    }
}

impl fmt::Display for PuzzleDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(ISO_DATE_FORMAT))
    }
}

impl FromStr for PuzzleDate {
    type Err = DateParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parsed = NaiveDate::parse_from_str(s, ISO_DATE_FORMAT).map_err(|_| DateParseError {
            input: s.to_string(),
        })?;
        // Zero-padded form only; `2024-7-4` would collide with the padded
        // spelling in the persisted keyspace.
        if parsed.format(ISO_DATE_FORMAT).to_string() != s {
            return Err(DateParseError {
                input: s.to_string(),
            });
        }
        Ok(Self(parsed))
    }
}

impl TryFrom<String> for PuzzleDate {
    type Error = DateParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PuzzleDate> for String {
    fn from(value: PuzzleDate) -> Self {
        value.to_string()
    }
}

/// Resolve which date's puzzle is active.
///
/// A requested date wins only when it parses as canonical ISO and is not in
/// the future; anything else (absent, malformed, future) falls back to
/// `today`. A resolved date with no scheduled puzzle is not a resolution
/// error - that gap surfaces downstream.
#[must_use]
pub fn resolve_puzzle_date(requested: Option<&str>, today: PuzzleDate) -> PuzzleDate {
    requested
        .and_then(|raw| raw.parse::<PuzzleDate>().ok())
        .filter(|candidate| *candidate <= today)
        .unwrap_or(today)
}

/// Archive navigation data for the active puzzle date.
///
/// Pure data: link construction stays in the rendering layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveNav {
    pub previous: Option<PuzzleDate>,
    pub next: Option<PuzzleDate>,
    /// The previous day has a puzzle scheduled.
    pub previous_available: bool,
    /// The next day is not in the future. A schedule gap on that day is
    /// allowed here and handled downstream, as with direct navigation.
    pub next_available: bool,
    pub is_today: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> PuzzleDate {
        s.parse().unwrap()
    }

    #[test]
    fn parses_canonical_iso_dates() {
        let parsed = date("2025-03-09");
        assert_eq!(parsed.to_string(), "2025-03-09");
    }

    #[test]
    fn rejects_malformed_and_non_padded_forms() {
        for bad in ["2025-3-9", "2025/03/09", "03-09-2025", "yesterday", ""] {
            assert!(bad.parse::<PuzzleDate>().is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn rejects_impossible_calendar_dates() {
        assert!("2025-02-30".parse::<PuzzleDate>().is_err());
        assert!("2024-02-29".parse::<PuzzleDate>().is_ok());
    }

    #[test]
    fn ordering_matches_calendar_order() {
        assert!(date("2025-01-31") < date("2025-02-01"));
        assert!(date("2024-12-31") < date("2025-01-01"));
    }

    #[test]
    fn previous_and_next_cross_month_boundaries() {
        assert_eq!(date("2025-03-01").previous(), Some(date("2025-02-28")));
        assert_eq!(date("2025-02-28").next(), Some(date("2025-03-01")));
    }

    #[test]
    fn resolver_honors_past_dates() {
        let today = date("2025-06-15");
        assert_eq!(
            resolve_puzzle_date(Some("2025-06-01"), today),
            date("2025-06-01")
        );
        assert_eq!(resolve_puzzle_date(Some("2025-06-15"), today), today);
    }

    #[test]
    fn resolver_clamps_future_dates_to_today() {
        let today = date("2025-06-15");
        assert_eq!(resolve_puzzle_date(Some("2025-06-16"), today), today);
        assert_eq!(resolve_puzzle_date(Some("2099-01-01"), today), today);
    }

    #[test]
    fn resolver_falls_back_on_absent_or_malformed_input() {
        let today = date("2025-06-15");
        assert_eq!(resolve_puzzle_date(None, today), today);
        assert_eq!(resolve_puzzle_date(Some("not-a-date"), today), today);
        assert_eq!(resolve_puzzle_date(Some("2025-6-1"), today), today);
    }

    #[test]
    fn serde_round_trips_as_string() {
        let parsed = date("2025-03-09");
        let json = serde_json::to_string(&parsed).unwrap();
        assert_eq!(json, "\"2025-03-09\"");
        assert_eq!(serde_json::from_str::<PuzzleDate>(&json).unwrap(), parsed);
        assert!(serde_json::from_str::<PuzzleDate>("\"2025-3-9\"").is_err());
    }
}

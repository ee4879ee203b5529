//! Date periods for analytics queries
//!
//! A `DateRange` is a closed interval: both `start` and `end` are included
//! when fetching. The comparison window returned by `previous()` ends at
//! `start` (inclusive), so a sale stamped exactly at `start` is counted in
//! both windows.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Closed date interval `[start, end]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateRange {
    /// Create a range, rejecting `start > end` and ranges whose comparison
    /// window would start before the earliest representable instant
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, CoreError> {
        if start > end {
            return Err(CoreError::InvalidDateRange { start, end });
        }
        let range = Self { start, end };
        if range.checked_previous().is_none() {
            return Err(CoreError::RangeOutOfBounds { start, end });
        }
        Ok(range)
    }

    /// Last N days ending at `now`
    pub fn last_days(days: u32, now: DateTime<Utc>) -> Result<Self, CoreError> {
        let start = Duration::try_days(i64::from(days))
            .and_then(|span| now.checked_sub_signed(span))
            .ok_or_else(|| CoreError::InvalidDate {
                input: format!("{} days before {}", days, now.format("%Y-%m-%d")),
            })?;
        Self::new(start, now)
    }

    /// Dashboard default: start of the month 30 days ago through the end of
    /// the current month (UTC calendar)
    pub fn dashboard_default(now: DateTime<Utc>) -> Self {
        let from = now
            .checked_sub_signed(Duration::days(30))
            .unwrap_or(now)
            .date_naive();
        let to = now.date_naive();
        Self {
            start: start_of_day(first_of_month(from)),
            end: end_of_day(last_of_month(to)),
        }
    }

    /// Length in whole days, rounded up (a partial day counts as one)
    pub fn days(&self) -> i64 {
        let millis = (self.end - self.start).num_milliseconds();
        // ceil for non-negative millis
        (millis + MILLIS_PER_DAY - 1).div_euclid(MILLIS_PER_DAY)
    }

    /// Equal-length window immediately preceding this one
    ///
    /// `prev_end = start`, `prev_start = start - days()`. Ranges built with
    /// [`DateRange::new`] always have one; otherwise the start is clamped to
    /// the earliest representable instant.
    pub fn previous(&self) -> Self {
        self.checked_previous().unwrap_or(Self {
            start: DateTime::<Utc>::MIN_UTC,
            end: self.start,
        })
    }

    /// Comparison window, or `None` when it leaves chrono's calendar
    pub fn checked_previous(&self) -> Option<Self> {
        let start = Duration::try_days(self.days())
            .and_then(|span| self.start.checked_sub_signed(span))?;
        Some(Self {
            start,
            end: self.start,
        })
    }

    /// Inclusive membership test
    pub fn contains(&self, ts: &DateTime<Utc>) -> bool {
        *ts >= self.start && *ts <= self.end
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} → {}",
            self.start.format("%Y-%m-%d"),
            self.end.format("%Y-%m-%d")
        )
    }
}

/// Which side of a range a parsed bound belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    Start,
    End,
}

/// Parse a range bound from RFC 3339 or a plain `YYYY-MM-DD` date.
///
/// Plain dates expand to the first instant of the day for `Bound::Start`
/// and the last millisecond of the day for `Bound::End`.
pub fn parse_bound(input: &str, bound: Bound) -> Result<DateTime<Utc>, CoreError> {
    let input = input.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(input) {
        return Ok(ts.with_timezone(&Utc));
    }

    let date = NaiveDate::parse_from_str(input, "%Y-%m-%d").map_err(|_| CoreError::InvalidDate {
        input: input.to_string(),
    })?;

    Ok(match bound {
        Bound::Start => start_of_day(date),
        Bound::End => end_of_day(date),
    })
}

fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN))
}

fn end_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_hms_milli_opt(23, 59, 59, 999)
        .map_or_else(|| start_of_day(date), |dt| Utc.from_utc_datetime(&dt))
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

fn last_of_month(date: NaiveDate) -> NaiveDate {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|next| next.pred_opt())
        .unwrap_or(date)
}

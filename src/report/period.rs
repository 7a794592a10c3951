use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Half-open time interval `[from, to)`. The single range-membership
/// primitive used throughout the report pipeline.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClosedRange {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl ClosedRange {
    pub fn new(from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        Self { from, to }
    }

    pub fn includes(&self, instant: DateTime<Utc>) -> bool {
        self.from <= instant && instant < self.to
    }
}

/// User-facing time-period descriptor, resolved to a concrete [`ClosedRange`]
/// against the configured start day of month and a reference instant.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum TimePeriod {
    /// One budgeting month, starting on the configured day of month.
    Month { year: i32, month: u32 },
    /// Explicit bounds. Both must be present to resolve.
    FromTo {
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    },
    /// The trailing `days` ending at the reference instant.
    LastNDays { days: u32 },
}

impl TimePeriod {
    /// Resolves the descriptor, or `None` when it cannot produce a range.
    pub fn resolve(&self, start_day_of_month: u32, now: DateTime<Utc>) -> Option<ClosedRange> {
        match *self {
            TimePeriod::Month { year, month } => {
                let from = month_start(year, month, start_day_of_month)?;
                let (next_year, next_month) = if month == 12 {
                    (year + 1, 1)
                } else {
                    (year, month + 1)
                };
                let to = month_start(next_year, next_month, start_day_of_month)?;
                Some(ClosedRange::new(from, to))
            }
            TimePeriod::FromTo { from, to } => match (from, to) {
                (Some(from), Some(to)) if from < to => Some(ClosedRange::new(from, to)),
                _ => None,
            },
            TimePeriod::LastNDays { days } => {
                if days == 0 {
                    return None;
                }
                Some(ClosedRange::new(now - Duration::days(days as i64), now))
            }
        }
    }
}

fn month_start(year: i32, month: u32, start_day: u32) -> Option<DateTime<Utc>> {
    let day = start_day.max(1).min(days_in_month(year, month)?);
    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    Utc.from_local_datetime(&date.and_hms_opt(0, 0, 0)?).single()
}

fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    let first_next = NaiveDate::from_ymd_opt(next_year, next_month, 1)?;
    Some((first_next - Duration::days(1)).day())
}

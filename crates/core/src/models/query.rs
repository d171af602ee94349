use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use super::period::Granularity;
use crate::errors::CoreError;

/// A date-range request for one series, as issued by a dashboard filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesQuery {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub granularity: Granularity,
}

impl SeriesQuery {
    pub fn new(start: NaiveDate, end: NaiveDate, granularity: Granularity) -> Self {
        Self {
            start,
            end,
            granularity,
        }
    }

    /// The last `days` days up to and including `today`.
    pub fn last_days(
        today: NaiveDate,
        days: u64,
        granularity: Granularity,
    ) -> Result<Self, CoreError> {
        let start = today.checked_sub_days(Days::new(days)).ok_or_else(|| {
            CoreError::ValidationError(format!("{days} days before {today} is out of range"))
        })?;
        Ok(Self::new(start, today, granularity))
    }

    /// Monthly query covering the current month and the `months - 1` before it,
    /// starting on the first day of the earliest month.
    pub fn last_months(today: NaiveDate, months: u32) -> Result<Self, CoreError> {
        if months == 0 {
            return Err(CoreError::ValidationError(
                "Month shortcut must cover at least one month".to_string(),
            ));
        }
        let start = today
            .with_day(1)
            .and_then(|first| first.checked_sub_months(Months::new(months - 1)))
            .ok_or_else(|| {
                CoreError::ValidationError(format!(
                    "{months} months before {today} is out of range"
                ))
            })?;
        Ok(Self::new(start, today, Granularity::Month))
    }

    /// Number of days spanned, counting both ends.
    pub fn span_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// Reject inverted ranges, ranges ending in the future and ranges
    /// longer than `max_range_days`.
    pub fn validate(&self, today: NaiveDate, max_range_days: i64) -> Result<(), CoreError> {
        if self.start > self.end {
            return Err(CoreError::ValidationError(format!(
                "Start date ({}) must not be after end date ({})",
                self.start, self.end
            )));
        }
        if self.end > today {
            return Err(CoreError::ValidationError(format!(
                "End date ({}) must not be in the future",
                self.end
            )));
        }
        let range_days = (self.end - self.start).num_days();
        if range_days > max_range_days {
            return Err(CoreError::ValidationError(format!(
                "Range of {range_days} days exceeds maximum of {max_range_days} days"
            )));
        }
        Ok(())
    }

    /// Query-string pairs understood by the series endpoints.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("start_date", self.start.format("%Y-%m-%d").to_string()),
            ("end_date", self.end.format("%Y-%m-%d").to_string()),
            ("type", self.granularity.as_query_param().to_string()),
        ]
    }
}

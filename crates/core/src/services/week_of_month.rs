use chrono::{Datelike, NaiveDate};

use crate::models::period::PeriodShape;
use crate::models::week::WeekOfMonthInfo;

/// ISO-8601 week number of `date`: shift to the Thursday of its week and
/// count weeks from that Thursday's year start.
pub fn iso_week_of_year(date: NaiveDate) -> u32 {
    date.iso_week().week()
}

/// Ordinal week of `year`-`month` for ISO week `week_of_year` (1..=53).
///
/// `week_of_year - iso_week(first day of month) + 1`, floored at 1.
///
/// This is an approximation. When the 1st of the month still belongs to the
/// previous ISO year (typical for January), its week number is 52 or 53 and
/// every week of that month floors to 1. Likewise December tokens that
/// carry next year's `W1` collapse to week 1.
pub fn week_of_month(year: i32, month: u32, week_of_year: u32) -> Option<u32> {
    if !(1..=53).contains(&week_of_year) {
        return None;
    }
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let week_first = i64::from(iso_week_of_year(first));
    let week_of_month = (i64::from(week_of_year) - week_first + 1).max(1);
    Some(week_of_month as u32)
}

/// Resolve a `YYYY-MM-W<n>` token. Any other shape yields `None`.
pub fn week_of_month_info(token: &str) -> Option<WeekOfMonthInfo> {
    match PeriodShape::classify(token) {
        PeriodShape::Week {
            year,
            month,
            week_of_year,
        } => week_of_month(year, month, week_of_year).map(|week_of_month| WeekOfMonthInfo {
            week_of_month,
            month,
            year,
        }),
        _ => None,
    }
}

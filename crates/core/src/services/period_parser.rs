use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};

use crate::models::period::{PeriodShape, Timestamp};
use crate::services::week_of_month;

/// Timestamp layouts tried, in order, for tokens that match none of the
/// period shapes.
const NAIVE_DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
];

const NAIVE_DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y/%m/%d"];

/// Years a token may name. chrono accepts signed years of any width
/// (`+12025/01/01`), which cannot be written back as `YYYY-MM-DD`.
const YEAR_RANGE: std::ops::RangeInclusive<i32> = 0..=9999;

/// Convert a period token into a comparable UTC timestamp.
///
/// - `YYYY-MM-DD` → midnight of that day
/// - `YYYY-MM` → midnight of the 1st
/// - `YYYY-MM-W<n>` → midnight of the approximate first day of that week
///   inside the month (see [`week_anchor_date`])
/// - anything else → a lenient generic date parse
///
/// Never panics; malformed or impossible dates yield `None`.
pub fn parse(token: &str) -> Option<Timestamp> {
    match PeriodShape::classify(token) {
        PeriodShape::Date { year, month, day } => {
            NaiveDate::from_ymd_opt(year, month, day).map(midnight)
        }
        PeriodShape::Month { year, month } => NaiveDate::from_ymd_opt(year, month, 1).map(midnight),
        PeriodShape::Week {
            year,
            month,
            week_of_year,
        } => week_anchor_date(year, month, week_of_year).map(midnight),
        PeriodShape::Opaque => parse_generic(token),
    }
}

/// Calendar day of a parsed token.
pub fn parse_date(token: &str) -> Option<NaiveDate> {
    parse(token).map(|ts| ts.date_naive())
}

/// Day represented by week `week_of_year` of `year`-`month`:
/// `1 + (week_of_month - 1) * 7`, clamped to the month's last day.
pub fn week_anchor_date(year: i32, month: u32, week_of_year: u32) -> Option<NaiveDate> {
    let week_of_month = week_of_month::week_of_month(year, month, week_of_year)?;
    let last_day = last_day_of_month(year, month)?;
    let day = (week_of_month - 1)
        .saturating_mul(7)
        .saturating_add(1)
        .min(last_day);
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Number of the last day of `year`-`month` (28..=31).
pub fn last_day_of_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next_first = first.checked_add_months(chrono::Months::new(1))?;
    next_first.pred_opt().map(|d| chrono::Datelike::day(&d))
}

fn midnight(date: NaiveDate) -> Timestamp {
    date.and_time(chrono::NaiveTime::MIN).and_utc()
}

fn parse_generic(token: &str) -> Option<Timestamp> {
    parse_lenient(token).filter(|ts| YEAR_RANGE.contains(&ts.year()))
}

fn parse_lenient(token: &str) -> Option<Timestamp> {
    let trimmed = token.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in NAIVE_DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Some(dt.and_utc());
        }
    }
    for fmt in NAIVE_DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, fmt) {
            return Some(midnight(date));
        }
    }
    None
}

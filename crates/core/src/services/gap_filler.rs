use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};
use tracing::debug;

use crate::models::series::SeriesPoint;
use crate::services::period_parser;

/// Expand a sparse daily series into one point per calendar day.
///
/// Spans from the earliest to the latest parseable token, inclusive.
/// Days missing from the input get value 0; values are looked up by the
/// exact `YYYY-MM-DD` token. Output periods are `YYYY-MM-DD` and labels
/// are the day of month. Returns an empty vector when nothing parses.
///
/// When the input repeats a token, the last occurrence wins.
pub fn fill_daily(points: &[SeriesPoint]) -> Vec<SeriesPoint> {
    let mut by_token: HashMap<&str, f64> = HashMap::with_capacity(points.len());
    for point in points {
        if point.period.is_empty() {
            continue;
        }
        if by_token.insert(point.period.as_str(), point.value).is_some() {
            debug!(period = %point.period, "duplicate period token, keeping the last value");
        }
    }

    let Some((min, max)) = date_bounds(points) else {
        return Vec::new();
    };

    let mut filled = Vec::with_capacity(((max - min).num_days() + 1) as usize);
    let mut current = min;
    while current <= max {
        let period = current.format("%Y-%m-%d").to_string();
        let value = by_token.get(period.as_str()).copied().unwrap_or(0.0);
        filled.push(SeriesPoint::with_label(period, current.day().to_string(), value));

        current = match current.succ_opt() {
            Some(next) => next,
            None => break,
        };
    }
    filled
}

/// Days between the earliest and latest parseable tokens (0 for a single
/// day), or `None` when nothing parses.
pub fn daily_span(points: &[SeriesPoint]) -> Option<i64> {
    date_bounds(points).map(|(min, max)| (max - min).num_days())
}

fn date_bounds(points: &[SeriesPoint]) -> Option<(NaiveDate, NaiveDate)> {
    points
        .iter()
        .filter_map(|p| period_parser::parse_date(&p.period))
        .fold(None, |bounds, date| match bounds {
            None => Some((date, date)),
            Some((min, max)) => Some((min.min(date), max.max(date))),
        })
}

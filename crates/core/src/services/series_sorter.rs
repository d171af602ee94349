use std::cmp::Ordering;

use tracing::debug;

use crate::models::period::Timestamp;
use crate::models::series::SeriesPoint;
use crate::services::period_parser;

/// Order points chronologically by their period token.
///
/// Parseable tokens come first, ascending by timestamp. Unparseable tokens
/// follow, ordered lexicographically by the raw token, so a batch where
/// nothing parses ends up fully lexicographic. The sort is stable: equal
/// timestamps keep their input order. Returns a new vector with every
/// input point.
pub fn sort(points: &[SeriesPoint]) -> Vec<SeriesPoint> {
    let mut keyed: Vec<(Option<Timestamp>, &SeriesPoint)> = points
        .iter()
        .map(|p| (period_parser::parse(&p.period), p))
        .collect();

    let unparsed = keyed.iter().filter(|(ts, _)| ts.is_none()).count();
    if unparsed > 0 {
        debug!(unparsed, total = points.len(), "sorting unparseable period tokens last");
    }

    keyed.sort_by(|(a_ts, a), (b_ts, b)| compare(a_ts, &a.period, b_ts, &b.period));
    keyed.into_iter().map(|(_, p)| p.clone()).collect()
}

fn compare(
    a_ts: &Option<Timestamp>,
    a_token: &str,
    b_ts: &Option<Timestamp>,
    b_token: &str,
) -> Ordering {
    match (a_ts, b_ts) {
        (Some(a), Some(b)) => a.cmp(b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a_token.cmp(b_token),
    }
}

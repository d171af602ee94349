use crate::models::chart::{ChartSeries, SeriesSummary};
use crate::models::locale::MonthNames;
use crate::models::period::Granularity;
use crate::models::series::SeriesPoint;
use crate::models::settings::DashboardSettings;
use crate::services::{gap_filler, label_formatter, series_sorter};

/// Turns backend rows into chart-ready series.
///
/// Pipeline: sort → (daily only) gap-fill → label. Each stage produces a
/// new vector; the input is never touched.
pub struct ChartService {
    fill_missing_dates: bool,
    max_range_days: i64,
    names: MonthNames,
}

impl ChartService {
    pub fn new() -> Self {
        Self::from_settings(&DashboardSettings::default())
    }

    pub fn from_settings(settings: &DashboardSettings) -> Self {
        Self {
            fill_missing_dates: settings.fill_missing_dates,
            max_range_days: settings.max_range_days,
            names: MonthNames::default(),
        }
    }

    /// Use a different locale table for labels.
    pub fn with_names(mut self, names: MonthNames) -> Self {
        self.names = names;
        self
    }

    /// Shape `points` for a chart of the given granularity.
    pub fn build(&self, points: &[SeriesPoint], granularity: Granularity) -> ChartSeries {
        let sorted = series_sorter::sort(points);
        let shaped = if granularity == Granularity::Day && self.should_fill(&sorted) {
            gap_filler::fill_daily(&sorted)
        } else {
            sorted
        };

        let mut chart = ChartSeries {
            labels: Vec::with_capacity(shaped.len()),
            raw_periods: Vec::with_capacity(shaped.len()),
            values: Vec::with_capacity(shaped.len()),
        };
        for point in shaped {
            chart
                .labels
                .push(label_formatter::format_with(&point.period, granularity, &self.names));
            chart.values.push(point.value);
            chart.raw_periods.push(point.period);
        }
        chart
    }

    /// KPI figures over the raw backend rows.
    pub fn summarize(&self, points: &[SeriesPoint]) -> SeriesSummary {
        if points.is_empty() {
            return SeriesSummary::default();
        }
        let total: f64 = points.iter().map(|p| p.value).sum();
        let tickets: f64 = points.iter().map(|p| p.average_ticket).sum();
        let max = points
            .iter()
            .map(|p| p.value)
            .fold(f64::NEG_INFINITY, f64::max);
        SeriesSummary {
            count: points.len(),
            total,
            average_ticket: tickets / points.len() as f64,
            operations: points.iter().map(SeriesPoint::operations).sum(),
            max,
        }
    }

    /// Gap filling emits one point per calendar day, so a span wider than
    /// the query limit means a malformed token stretched the bounds.
    fn should_fill(&self, sorted: &[SeriesPoint]) -> bool {
        if !self.fill_missing_dates {
            return false;
        }
        match gap_filler::daily_span(sorted) {
            Some(span) if span > self.max_range_days => {
                tracing::warn!(
                    span_days = span,
                    max_range_days = self.max_range_days,
                    "daily span exceeds range limit, skipping gap fill"
                );
                false
            }
            _ => true,
        }
    }
}

impl Default for ChartService {
    fn default() -> Self {
        Self::new()
    }
}

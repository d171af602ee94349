// ═══════════════════════════════════════════════════════════════════
// Dashboard Tests — ChartSlot lifecycle, VolumeDashboard facade
// ═══════════════════════════════════════════════════════════════════

use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use period_series_core::errors::CoreError;
use period_series_core::models::chart::ChartSeries;
use period_series_core::models::period::Granularity;
use period_series_core::models::query::SeriesQuery;
use period_series_core::models::series::{SeriesPage, SeriesPoint};
use period_series_core::models::settings::DashboardSettings;
use period_series_core::providers::traits::SeriesProvider;
use period_series_core::services::chart_slot::{ApplyOutcome, ChartSlot};
use period_series_core::VolumeDashboard;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn series(values: &[f64]) -> ChartSeries {
    ChartSeries {
        labels: values.iter().map(|v| v.to_string()).collect(),
        raw_periods: values.iter().map(|v| v.to_string()).collect(),
        values: values.to_vec(),
    }
}

// ═══════════════════════════════════════════════════════════════════
// Mock Providers
// ═══════════════════════════════════════════════════════════════════

/// Returns a fixed page and counts how often it was asked.
struct FixtureProvider {
    page: SeriesPage,
    calls: Arc<AtomicUsize>,
}

impl FixtureProvider {
    fn new(points: Vec<SeriesPoint>) -> (Self, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let provider = Self {
            page: SeriesPage {
                data: points,
                total_count: Some(42),
            },
            calls: Arc::clone(&calls),
        };
        (provider, calls)
    }
}

#[async_trait]
impl SeriesProvider for FixtureProvider {
    fn name(&self) -> &str {
        "Fixture"
    }

    async fn fetch_series(&self, _query: &SeriesQuery) -> Result<SeriesPage, CoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.page.clone())
    }
}

/// Always fails like an unreachable backend.
struct FailingProvider;

#[async_trait]
impl SeriesProvider for FailingProvider {
    fn name(&self) -> &str {
        "Failing"
    }

    async fn fetch_series(&self, _query: &SeriesQuery) -> Result<SeriesPage, CoreError> {
        Err(CoreError::Api {
            endpoint: "/operations/volume-data".into(),
            message: "HTTP 500 Internal Server Error".into(),
        })
    }
}

fn daily_points() -> Vec<SeriesPoint> {
    vec![
        SeriesPoint::new("2025-10-03", 30.0),
        SeriesPoint::new("2025-10-01", 10.0),
    ]
}

// ═══════════════════════════════════════════════════════════════════
//  ChartSlot
// ═══════════════════════════════════════════════════════════════════

mod chart_slot {
    use super::*;

    #[test]
    fn starts_empty() {
        assert!(ChartSlot::new().current().is_none());
    }

    #[test]
    fn tickets_increase() {
        let mut slot = ChartSlot::new();
        let a = slot.begin_request();
        let b = slot.begin_request();
        assert!(b > a);
        assert!(slot.is_current(b));
        assert!(!slot.is_current(a));
    }

    #[test]
    fn latest_ticket_installs() {
        let mut slot = ChartSlot::new();
        let t = slot.begin_request();
        let outcome = slot.apply(t, Granularity::Day, series(&[1.0]));
        assert_eq!(outcome, ApplyOutcome::Installed { replaced: None });
        let live = slot.current().unwrap();
        assert_eq!(live.ticket, t.value());
        assert_eq!(live.series.values, vec![1.0]);
    }

    #[test]
    fn slow_earlier_response_is_discarded() {
        let mut slot = ChartSlot::new();
        let first = slot.begin_request();
        let second = slot.begin_request();

        assert!(matches!(
            slot.apply(second, Granularity::Day, series(&[2.0])),
            ApplyOutcome::Installed { .. }
        ));
        assert_eq!(
            slot.apply(first, Granularity::Day, series(&[1.0])),
            ApplyOutcome::Stale
        );
        assert_eq!(slot.current().unwrap().series.values, vec![2.0]);
    }

    #[test]
    fn earlier_response_is_discarded_even_before_newer_arrives() {
        let mut slot = ChartSlot::new();
        let first = slot.begin_request();
        let _second = slot.begin_request();
        assert_eq!(
            slot.apply(first, Granularity::Day, series(&[1.0])),
            ApplyOutcome::Stale
        );
        assert!(slot.current().is_none());
    }

    #[test]
    fn same_ticket_cannot_install_twice() {
        let mut slot = ChartSlot::new();
        let t = slot.begin_request();
        slot.apply(t, Granularity::Day, series(&[1.0]));
        assert_eq!(
            slot.apply(t, Granularity::Day, series(&[9.0])),
            ApplyOutcome::Stale
        );
        assert_eq!(slot.current().unwrap().series.values, vec![1.0]);
    }

    #[test]
    fn apply_returns_displaced_chart() {
        let mut slot = ChartSlot::new();
        let a = slot.begin_request();
        slot.apply(a, Granularity::Month, series(&[1.0]));
        let b = slot.begin_request();
        match slot.apply(b, Granularity::Day, series(&[2.0])) {
            ApplyOutcome::Installed { replaced: Some(old) } => {
                assert_eq!(old.granularity, Granularity::Month);
                assert_eq!(old.series.values, vec![1.0]);
            }
            other => panic!("expected replacement, got {other:?}"),
        }
    }

    #[test]
    fn replace_swaps_and_mints_new_identity() {
        let mut slot = ChartSlot::new();
        assert!(slot.replace(Granularity::Day, series(&[1.0])).is_none());
        let first_id = slot.current().unwrap().id;

        let old = slot.replace(Granularity::Day, series(&[2.0])).unwrap();
        assert_eq!(old.id, first_id);
        assert_ne!(slot.current().unwrap().id, first_id);
    }

    #[test]
    fn replace_invalidates_outstanding_tickets() {
        let mut slot = ChartSlot::new();
        let pending = slot.begin_request();
        slot.replace(Granularity::Day, series(&[5.0]));
        assert_eq!(
            slot.apply(pending, Granularity::Day, series(&[1.0])),
            ApplyOutcome::Stale
        );
    }

    #[test]
    fn dispose_empties_the_slot() {
        let mut slot = ChartSlot::new();
        slot.replace(Granularity::Day, series(&[1.0]));
        assert!(slot.dispose().is_some());
        assert!(slot.current().is_none());
        assert!(slot.dispose().is_none());
    }
}

// ═══════════════════════════════════════════════════════════════════
//  VolumeDashboard
// ═══════════════════════════════════════════════════════════════════

mod dashboard {
    use super::*;

    fn dashboard_with(points: Vec<SeriesPoint>) -> (VolumeDashboard, Arc<AtomicUsize>) {
        let (provider, calls) = FixtureProvider::new(points);
        let dash =
            VolumeDashboard::with_provider(DashboardSettings::default(), Box::new(provider)).unwrap();
        (dash, calls)
    }

    #[tokio::test]
    async fn load_shapes_and_installs_chart() {
        let (mut dash, calls) = dashboard_with(daily_points());
        let query = SeriesQuery::new(d(2025, 10, 1), d(2025, 10, 3), Granularity::Day);

        let view = dash.load(&query, d(2025, 10, 17)).await.unwrap().unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(view.chart.labels, vec!["1", "2", "3"]);
        assert_eq!(view.chart.values, vec![10.0, 0.0, 30.0]);
        assert_eq!(view.summary.count, 2);
        assert_eq!(view.summary.total, 40.0);
        assert_eq!(view.summary.max, 30.0);
        assert_eq!(view.total_count, Some(42));

        let live = dash.current_chart().unwrap();
        assert_eq!(live.series, view.chart);
        assert_eq!(live.granularity, Granularity::Day);
    }

    #[tokio::test]
    async fn load_completes_even_with_an_outstanding_ticket() {
        let (mut dash, _) = dashboard_with(daily_points());
        let query = SeriesQuery::new(d(2025, 10, 1), d(2025, 10, 3), Granularity::Day);

        let earlier = dash.begin_request();
        let view = dash.load(&query, d(2025, 10, 17)).await.unwrap();
        assert!(view.is_some());
        assert!(dash.current_chart().unwrap().ticket > earlier.value());

        // the ticket issued before `load` is now the stale one
        let page = SeriesPage {
            data: daily_points(),
            total_count: None,
        };
        let late = dash.complete_request(earlier, Granularity::Day, page).unwrap();
        assert!(late.is_none());
    }

    #[tokio::test]
    async fn each_load_replaces_the_chart() {
        let (mut dash, _) = dashboard_with(daily_points());
        let query = SeriesQuery::new(d(2025, 10, 1), d(2025, 10, 3), Granularity::Day);

        dash.load(&query, d(2025, 10, 17)).await.unwrap();
        let first_id = dash.current_chart().unwrap().id;
        dash.load(&query, d(2025, 10, 17)).await.unwrap();
        assert_ne!(dash.current_chart().unwrap().id, first_id);
    }

    #[tokio::test]
    async fn invalid_query_never_reaches_provider() {
        let (mut dash, calls) = dashboard_with(daily_points());
        let query = SeriesQuery::new(d(2025, 10, 3), d(2025, 10, 1), Granularity::Day);

        let err = dash.load(&query, d(2025, 10, 17)).await.unwrap_err();
        assert!(matches!(err, CoreError::ValidationError(_)));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert!(dash.current_chart().is_none());
    }

    #[tokio::test]
    async fn empty_result_is_reported() {
        let (mut dash, _) = dashboard_with(Vec::new());
        let query = SeriesQuery::new(d(2025, 10, 1), d(2025, 10, 3), Granularity::Day);

        let err = dash.load(&query, d(2025, 10, 17)).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Query validation failed: No data found for the selected period"
        );
    }

    #[tokio::test]
    async fn provider_errors_propagate_and_keep_previous_chart() {
        let (mut dash, _) = dashboard_with(daily_points());
        let query = SeriesQuery::new(d(2025, 10, 1), d(2025, 10, 3), Granularity::Day);
        dash.load(&query, d(2025, 10, 17)).await.unwrap();

        let mut failing =
            VolumeDashboard::with_provider(DashboardSettings::default(), Box::new(FailingProvider))
                .unwrap();
        let err = failing.load(&query, d(2025, 10, 17)).await.unwrap_err();
        assert!(matches!(err, CoreError::Api { .. }));
        assert!(failing.current_chart().is_none());
        assert!(dash.current_chart().is_some());
    }

    #[test]
    fn stale_completion_is_dropped() {
        let (mut dash, _) = dashboard_with(Vec::new());
        let page = SeriesPage {
            data: vec![SeriesPoint::new("2025-10", 1.0)],
            total_count: None,
        };
        let newer_page = SeriesPage {
            data: vec![SeriesPoint::new("2025-09", 7.0)],
            total_count: None,
        };

        let older = dash.begin_request();
        let newer = dash.begin_request();

        let view = dash
            .complete_request(newer, Granularity::Month, newer_page)
            .unwrap()
            .unwrap();
        assert_eq!(view.chart.labels, vec!["set/25"]);

        let stale = dash.complete_request(older, Granularity::Month, page).unwrap();
        assert!(stale.is_none());
        assert_eq!(dash.current_chart().unwrap().series.labels, vec!["set/25"]);
    }

    #[test]
    fn stale_empty_page_is_not_an_error() {
        let (mut dash, _) = dashboard_with(Vec::new());
        let older = dash.begin_request();
        let _newer = dash.begin_request();
        let result = dash.complete_request(older, Granularity::Day, SeriesPage::default());
        assert!(matches!(result, Ok(None)));
    }

    #[test]
    fn dispose_chart() {
        let (mut dash, _) = dashboard_with(Vec::new());
        let t = dash.begin_request();
        dash.complete_request(
            t,
            Granularity::Month,
            SeriesPage {
                data: vec![SeriesPoint::new("2025-10", 1.0)],
                total_count: None,
            },
        )
        .unwrap();
        assert!(dash.dispose_chart().is_some());
        assert!(dash.current_chart().is_none());
    }

    #[test]
    fn rejects_invalid_settings() {
        let settings = DashboardSettings {
            max_range_days: 0,
            ..DashboardSettings::default()
        };
        let err = VolumeDashboard::with_provider(settings, Box::new(FailingProvider)).unwrap_err();
        assert!(matches!(err, CoreError::Configuration(_)));
    }

    #[test]
    fn http_dashboard_builds_from_settings() {
        let dash = VolumeDashboard::new(DashboardSettings::default()).unwrap();
        assert_eq!(dash.settings().volume_endpoint, "/operations/volume-data");
        assert!(format!("{dash:?}").contains("HTTP"));
    }
}

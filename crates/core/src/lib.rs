pub mod errors;
pub mod models;
pub mod providers;
pub mod services;

use chrono::NaiveDate;
use models::{
    chart::{ChartSeries, RenderedChart, SeriesSummary},
    period::Granularity,
    query::SeriesQuery,
    series::SeriesPage,
    settings::DashboardSettings,
};
use providers::{http::HttpSeriesProvider, traits::SeriesProvider};
use serde::{Deserialize, Serialize};
use services::{
    chart_service::ChartService,
    chart_slot::{ApplyOutcome, ChartSlot, RequestTicket},
};

use errors::CoreError;

/// What a dashboard panel shows after a successful load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardView {
    pub chart: ChartSeries,
    pub summary: SeriesSummary,
    /// Row count reported by the backend, when it reports one
    pub total_count: Option<u64>,
}

/// Main entry point: one chart panel backed by a series endpoint.
///
/// Holds the provider, the shaping service and the single live chart.
/// Each load discards the previous chart; nothing is cached between loads.
#[must_use]
pub struct VolumeDashboard {
    settings: DashboardSettings,
    provider: Box<dyn SeriesProvider>,
    chart_service: ChartService,
    slot: ChartSlot,
}

impl std::fmt::Debug for VolumeDashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VolumeDashboard")
            .field("provider", &self.provider.name())
            .field("settings", &self.settings)
            .field("slot", &self.slot)
            .finish()
    }
}

impl VolumeDashboard {
    /// Dashboard talking to the configured HTTP endpoint.
    pub fn new(settings: DashboardSettings) -> Result<Self, CoreError> {
        let provider = HttpSeriesProvider::new(&settings);
        Self::with_provider(settings, Box::new(provider))
    }

    /// Dashboard reading from any provider (fixtures, alternative transports).
    pub fn with_provider(
        settings: DashboardSettings,
        provider: Box<dyn SeriesProvider>,
    ) -> Result<Self, CoreError> {
        settings.validate()?;
        let chart_service = ChartService::from_settings(&settings);
        Ok(Self {
            settings,
            provider,
            chart_service,
            slot: ChartSlot::new(),
        })
    }

    // ── Loading ─────────────────────────────────────────────────────

    /// Validate, fetch, shape and install a chart for `query`.
    ///
    /// `load` borrows the dashboard mutably for the whole fetch, so no other
    /// request can start meanwhile and the result is always `Some` on
    /// success. Callers that overlap fetches use `begin_request` and
    /// `complete_request`, where a superseded response yields `Ok(None)`.
    pub async fn load(
        &mut self,
        query: &SeriesQuery,
        today: NaiveDate,
    ) -> Result<Option<DashboardView>, CoreError> {
        query.validate(today, self.settings.max_range_days)?;
        let ticket = self.begin_request();
        let page = self.provider.fetch_series(query).await?;
        self.complete_request(ticket, query.granularity, page)
    }

    /// Reserve a ticket for a fetch performed by the caller.
    pub fn begin_request(&mut self) -> RequestTicket {
        self.slot.begin_request()
    }

    /// Shape a fetched page and install it if `ticket` is still current.
    ///
    /// Returns `Ok(None)` for stale responses. An empty page is an error:
    /// there is nothing to chart for the selected period.
    pub fn complete_request(
        &mut self,
        ticket: RequestTicket,
        granularity: Granularity,
        page: SeriesPage,
    ) -> Result<Option<DashboardView>, CoreError> {
        if !self.slot.is_current(ticket) {
            return Ok(self.discard_stale(ticket));
        }
        if page.data.is_empty() {
            return Err(CoreError::ValidationError(
                "No data found for the selected period".to_string(),
            ));
        }

        let chart = self.chart_service.build(&page.data, granularity);
        let summary = self.chart_service.summarize(&page.data);
        let view = DashboardView {
            chart: chart.clone(),
            summary,
            total_count: page.total_count,
        };

        match self.slot.apply(ticket, granularity, chart) {
            ApplyOutcome::Installed { .. } => Ok(Some(view)),
            ApplyOutcome::Stale => Ok(self.discard_stale(ticket)),
        }
    }

    // ── Chart lifecycle ─────────────────────────────────────────────

    /// The chart currently shown, if any.
    #[must_use]
    pub fn current_chart(&self) -> Option<&RenderedChart> {
        self.slot.current()
    }

    /// Tear down the live chart (e.g. when the panel is closed).
    pub fn dispose_chart(&mut self) -> Option<RenderedChart> {
        self.slot.dispose()
    }

    // ── Settings ────────────────────────────────────────────────────

    #[must_use]
    pub fn settings(&self) -> &DashboardSettings {
        &self.settings
    }

    #[must_use]
    pub fn chart_service(&self) -> &ChartService {
        &self.chart_service
    }

    // ── Internal ────────────────────────────────────────────────────

    fn discard_stale(&self, ticket: RequestTicket) -> Option<DashboardView> {
        tracing::debug!(
            ticket = ticket.value(),
            provider = self.provider.name(),
            "response superseded by a newer request"
        );
        None
    }
}

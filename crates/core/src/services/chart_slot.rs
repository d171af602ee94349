use tracing::debug;
use uuid::Uuid;

use crate::models::chart::{ChartSeries, RenderedChart};
use crate::models::period::Granularity;

/// Sequence number handed out when a fetch starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestTicket(u64);

impl RequestTicket {
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// Result of offering a finished response to the slot.
#[derive(Debug, Clone, PartialEq)]
pub enum ApplyOutcome {
    /// The response is now the live chart; holds the chart it displaced.
    Installed { replaced: Option<RenderedChart> },
    /// A newer request was issued after this one; the response was dropped.
    Stale,
}

/// Owner of the single chart bound to a canvas.
///
/// Fetches take a ticket before they start and hand it back with the
/// result. Only the most recently issued ticket may install a chart, so a
/// slow earlier response can never overwrite a newer one.
#[derive(Debug, Default)]
pub struct ChartSlot {
    issued: u64,
    current: Option<RenderedChart>,
}

impl ChartSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a request. Every earlier outstanding ticket becomes stale.
    pub fn begin_request(&mut self) -> RequestTicket {
        self.issued += 1;
        RequestTicket(self.issued)
    }

    /// Whether `ticket` is still the latest one issued.
    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        ticket.0 == self.issued
    }

    /// Install the response of `ticket` if nothing newer was requested.
    pub fn apply(
        &mut self,
        ticket: RequestTicket,
        granularity: Granularity,
        series: ChartSeries,
    ) -> ApplyOutcome {
        let shown = self.current.as_ref().map_or(0, |c| c.ticket);
        if !self.is_current(ticket) || ticket.0 <= shown {
            debug!(
                ticket = ticket.0,
                latest = self.issued,
                "discarding stale chart response"
            );
            return ApplyOutcome::Stale;
        }
        ApplyOutcome::Installed {
            replaced: self.install(ticket.0, granularity, series),
        }
    }

    /// Swap in a chart unconditionally. Outstanding tickets become stale.
    pub fn replace(&mut self, granularity: Granularity, series: ChartSeries) -> Option<RenderedChart> {
        let ticket = self.begin_request();
        self.install(ticket.0, granularity, series)
    }

    /// Drop the live chart, returning it.
    pub fn dispose(&mut self) -> Option<RenderedChart> {
        self.current.take()
    }

    pub fn current(&self) -> Option<&RenderedChart> {
        self.current.as_ref()
    }

    fn install(
        &mut self,
        ticket: u64,
        granularity: Granularity,
        series: ChartSeries,
    ) -> Option<RenderedChart> {
        self.current.replace(RenderedChart {
            id: Uuid::new_v4(),
            ticket,
            granularity,
            series,
        })
    }
}

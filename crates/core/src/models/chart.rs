use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::period::Granularity;

/// Chart-ready series: three parallel vectors of equal length.
///
/// The core computes labels and values; the frontend only renders.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    /// X-axis labels, one per point
    pub labels: Vec<String>,

    /// Raw period tokens behind each label (for tooltips / drill-down)
    pub raw_periods: Vec<String>,

    /// Y values
    pub values: Vec<f64>,
}

impl ChartSeries {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// KPI figures shown next to a chart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SeriesSummary {
    /// Number of points summarized
    pub count: usize,

    /// Sum of all values
    pub total: f64,

    /// Mean of the per-row average ticket (0 for an empty series)
    pub average_ticket: f64,

    /// Operation count: per row `round(value / average_ticket)`, summed.
    /// Rows whose ticket is 0 (or whose quotient is not finite) count 0.
    pub operations: i64,

    /// Largest value (0 for an empty series)
    pub max: f64,
}

/// The chart currently bound to a canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedChart {
    /// Identity of this render; a new one is minted per replacement
    pub id: Uuid,

    /// Sequence number of the request that produced it
    pub ticket: u64,

    pub granularity: Granularity,

    pub series: ChartSeries,
}

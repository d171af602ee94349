use serde::{Deserialize, Deserializer, Serialize};

/// One row of a time series as returned by the backend.
///
/// Rows are never mutated: each shaping stage produces a new `Vec`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    /// Raw period token (`YYYY-MM-DD`, `YYYY-MM` or `YYYY-MM-W<n>`)
    #[serde(alias = "date")]
    pub period: String,

    /// Display label pre-computed by the backend (may be empty)
    #[serde(default)]
    pub period_formatted: String,

    /// Aggregated value for the period
    #[serde(
        rename = "total_volume",
        alias = "value",
        default,
        deserialize_with = "lenient_number"
    )]
    pub value: f64,

    /// Mean amount per operation within the period
    #[serde(default, deserialize_with = "lenient_number")]
    pub average_ticket: f64,
}

impl SeriesPoint {
    pub fn new(period: impl Into<String>, value: f64) -> Self {
        Self {
            period: period.into(),
            period_formatted: String::new(),
            value,
            average_ticket: 0.0,
        }
    }

    /// Create a point carrying the backend's display label.
    pub fn with_label(period: impl Into<String>, label: impl Into<String>, value: f64) -> Self {
        Self {
            period: period.into(),
            period_formatted: label.into(),
            value,
            average_ticket: 0.0,
        }
    }

    /// Attach the backend's average ticket to this point.
    pub fn with_ticket(mut self, average_ticket: f64) -> Self {
        self.average_ticket = average_ticket;
        self
    }

    /// Operations behind this row, `round(value / average_ticket)`.
    ///
    /// A zero ticket (or any other non-finite quotient) counts as 0.
    pub fn operations(&self) -> i64 {
        let ratio = self.value / self.average_ticket;
        if ratio.is_finite() {
            // half-up, as the dashboard rounds
            (ratio + 0.5).floor() as i64
        } else {
            0
        }
    }
}

/// Response envelope of the series endpoints: `{ data: [...], total_count? }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeriesPage {
    #[serde(default)]
    pub data: Vec<SeriesPoint>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_count: Option<u64>,
}

/// Numbers, numeric strings and null are all accepted; anything that does
/// not read as a finite number becomes 0.
fn lenient_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = serde_json::Value::deserialize(deserializer)?;
    let value = match raw {
        serde_json::Value::Number(n) => n.as_f64().unwrap_or(0.0),
        serde_json::Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    };
    Ok(if value.is_finite() { value } else { 0.0 })
}

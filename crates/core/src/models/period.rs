use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// A parsed period token. Exact shapes resolve to UTC midnight.
pub type Timestamp = DateTime<Utc>;

/// How a batch of period tokens should be interpreted and labelled.
///
/// Supplied by the caller alongside the series, never inferred from the
/// tokens: `YYYY-MM` means "one row per month" in one request and
/// "one row per year" in another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    #[serde(alias = "daily", alias = "month_day")]
    Day,
    #[serde(alias = "weekly", alias = "month_week")]
    Week,
    #[serde(alias = "monthly", alias = "year_month")]
    Month,
    #[serde(alias = "yearly")]
    Year,
}

impl Granularity {
    /// Value of the `type` query parameter the backend expects.
    pub fn as_query_param(&self) -> &'static str {
        match self {
            Granularity::Day => "daily",
            Granularity::Week => "weekly",
            Granularity::Month => "monthly",
            Granularity::Year => "yearly",
        }
    }
}

impl std::fmt::Display for Granularity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Granularity::Day => write!(f, "day"),
            Granularity::Week => write!(f, "week"),
            Granularity::Month => write!(f, "month"),
            Granularity::Year => write!(f, "year"),
        }
    }
}

impl std::str::FromStr for Granularity {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "day" | "daily" | "month_day" => Ok(Granularity::Day),
            "week" | "weekly" | "month_week" => Ok(Granularity::Week),
            "month" | "monthly" | "year_month" => Ok(Granularity::Month),
            "year" | "yearly" => Ok(Granularity::Year),
            other => Err(CoreError::ValidationError(format!(
                "Unknown granularity '{other}': use day, week, month or year"
            ))),
        }
    }
}

/// Syntactic shape of a period token.
///
/// Matching only checks digit counts and separators; the components may
/// still name an impossible date (e.g. month 13). At most one shape matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeriodShape {
    /// `YYYY-MM-DD`
    Date { year: i32, month: u32, day: u32 },
    /// `YYYY-MM`
    Month { year: i32, month: u32 },
    /// `YYYY-MM-W<n>`, n being the ISO week-of-year
    Week { year: i32, month: u32, week_of_year: u32 },
    /// Anything else
    Opaque,
}

impl PeriodShape {
    pub fn classify(token: &str) -> Self {
        let mut parts = token.split('-');
        let (Some(y), Some(m)) = (parts.next(), parts.next()) else {
            return PeriodShape::Opaque;
        };
        let (Some(year), Some(month)) = (fixed_digits(y, 4), fixed_digits(m, 2)) else {
            return PeriodShape::Opaque;
        };
        let year = year as i32;

        match (parts.next(), parts.next()) {
            (None, _) => PeriodShape::Month { year, month },
            (Some(third), None) => {
                if let Some(day) = fixed_digits(third, 2) {
                    PeriodShape::Date { year, month, day }
                } else if let Some(week_of_year) = third.strip_prefix('W').and_then(any_digits) {
                    PeriodShape::Week { year, month, week_of_year }
                } else {
                    PeriodShape::Opaque
                }
            }
            _ => PeriodShape::Opaque,
        }
    }
}

/// Parse exactly `len` ASCII digits.
pub(crate) fn fixed_digits(s: &str, len: usize) -> Option<u32> {
    if s.len() != len {
        return None;
    }
    any_digits(s)
}

/// Parse one or more ASCII digits (no sign, no whitespace).
pub(crate) fn any_digits(s: &str) -> Option<u32> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

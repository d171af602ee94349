use serde::{Deserialize, Serialize};

use super::locale::MonthNames;

/// Position of a `YYYY-MM-W<n>` token inside its calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekOfMonthInfo {
    /// Ordinal week inside the month, always >= 1
    pub week_of_month: u32,
    /// Calendar month, 1-12
    pub month: u32,
    pub year: i32,
}

impl WeekOfMonthInfo {
    /// Compact label, e.g. `2ª/out`.
    pub fn short_label(&self, names: &MonthNames) -> String {
        format!("{}ª/{}", self.week_of_month, names.short(self.month))
    }

    /// Long label, e.g. `Segunda semana de outubro`.
    pub fn long_label(&self, names: &MonthNames) -> String {
        format!(
            "{} {} {}",
            names.ordinal(self.week_of_month),
            names.week_word,
            names.full(self.month)
        )
    }
}

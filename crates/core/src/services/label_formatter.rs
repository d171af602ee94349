use crate::models::locale::MonthNames;
use crate::models::period::{any_digits, fixed_digits, Granularity};
use crate::services::week_of_month;

/// Render a period token as a display label using the pt-BR tables.
///
/// - `Day`: day of month without leading zero (`"5"`)
/// - `Month` / `Year`: `"<mon>/<yy>"` (`"out/25"`)
/// - `Week`: `"<n>ª/<mon>"` (`"1ª/out"`)
///
/// Tokens that do not fit the requested granularity come back unchanged.
pub fn format(token: &str, granularity: Granularity) -> String {
    format_with(token, granularity, &MonthNames::PT_BR)
}

/// Same as [`format`] with an explicit locale table.
pub fn format_with(token: &str, granularity: Granularity, names: &MonthNames) -> String {
    let label = match granularity {
        Granularity::Day => day_label(token),
        Granularity::Month | Granularity::Year => month_label(token, names),
        Granularity::Week => week_label(token, names),
    };
    label.unwrap_or_else(|| token.to_string())
}

/// Third dash-separated component read as a day number.
pub fn day_label(token: &str) -> Option<String> {
    let day = any_digits(token.split('-').nth(2)?)?;
    (1..=31).contains(&day).then(|| day.to_string())
}

/// Month and two-digit year, from `YYYY-MM[...]`, `YYYYMM` or `YYYYMMDD`.
pub fn month_label(token: &str, names: &MonthNames) -> Option<String> {
    let (year, month) = if token.contains('-') {
        let mut parts = token.split('-');
        (parts.next()?, parts.next()?)
    } else if (token.len() == 6 || token.len() == 8) && token.is_ascii() {
        (&token[..4], &token[4..6])
    } else {
        return None;
    };

    fixed_digits(year, 4)?;
    let month = match month.len() {
        1 | 2 => any_digits(month)?,
        _ => return None,
    };
    if !(1..=12).contains(&month) {
        return None;
    }
    Some(format!("{}/{}", names.short(month), &year[2..]))
}

/// Ordinal week within its month, from a `YYYY-MM-W<n>` token.
pub fn week_label(token: &str, names: &MonthNames) -> Option<String> {
    week_of_month::week_of_month_info(token).map(|info| info.short_label(names))
}

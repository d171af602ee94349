/// Localized lookup tables used by the label formatter.
///
/// Swapping the display locale means passing a different table; no
/// formatting code changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthNames {
    pub short: [&'static str; 12],
    pub full: [&'static str; 12],
    /// Ordinal words for weeks 1..=6
    pub ordinals: [&'static str; 6],
    /// Joins the ordinal and the month in long week labels
    pub week_word: &'static str,
}

impl MonthNames {
    pub const PT_BR: MonthNames = MonthNames {
        short: [
            "jan", "fev", "mar", "abr", "mai", "jun", "jul", "ago", "set", "out", "nov", "dez",
        ],
        full: [
            "janeiro", "fevereiro", "março", "abril", "maio", "junho", "julho", "agosto",
            "setembro", "outubro", "novembro", "dezembro",
        ],
        ordinals: ["Primeira", "Segunda", "Terceira", "Quarta", "Quinta", "Sexta"],
        week_word: "semana de",
    };

    /// Short name of a 1-based month. Out-of-range months render as the number.
    pub fn short(&self, month: u32) -> String {
        Self::lookup(&self.short, month)
    }

    /// Full name of a 1-based month. Out-of-range months render as the number.
    pub fn full(&self, month: u32) -> String {
        Self::lookup(&self.full, month)
    }

    /// Ordinal word for `n`, falling back to `<n>ª` past the table.
    pub fn ordinal(&self, n: u32) -> String {
        match n.checked_sub(1).and_then(|i| self.ordinals.get(i as usize)) {
            Some(word) => (*word).to_string(),
            None => format!("{n}ª"),
        }
    }

    fn lookup(table: &[&'static str; 12], month: u32) -> String {
        match month.checked_sub(1).and_then(|i| table.get(i as usize)) {
            Some(name) => (*name).to_string(),
            None => month.to_string(),
        }
    }
}

impl Default for MonthNames {
    fn default() -> Self {
        Self::PT_BR
    }
}

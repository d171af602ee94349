pub mod chart;
pub mod locale;
pub mod period;
pub mod query;
pub mod series;
pub mod settings;
pub mod week;

pub mod chart_service;
pub mod chart_slot;
pub mod gap_filler;
pub mod label_formatter;
pub mod period_parser;
pub mod series_sorter;
pub mod week_of_month;

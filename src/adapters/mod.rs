//! Concrete adapter implementations for ports.

pub mod chart_svg;
#[cfg(feature = "http")]
pub mod coingecko_adapter;
pub mod csv_adapter;
pub mod csv_table_adapter;
pub mod file_config_adapter;
pub mod format;
pub mod json_file_adapter;
pub mod json_report_adapter;
pub mod text_report_adapter;
#[cfg(feature = "web")]
pub mod web;

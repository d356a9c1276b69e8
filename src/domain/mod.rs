//! Core domain types and the indicator pipeline.
//!
//! Nothing in here performs I/O; market data arrives through
//! [`crate::ports::market_data_port::MarketDataPort`] and results leave
//! through [`crate::ports::report_port::ReportPort`].

pub mod sample;
pub mod alignment;
pub mod flow;
pub mod indicator;
pub mod signal;
pub mod summary;
pub mod params;
pub mod pipeline;
pub mod config_validation;
pub mod error;

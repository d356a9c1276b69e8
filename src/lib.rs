//! coinscope: technical-analysis snapshot for a single crypto asset.
//!
//! Hexagonal architecture: the indicator pipeline lives in [`domain`], port
//! traits in [`ports`], concrete data sources and renderers in [`adapters`].

pub mod domain;
pub mod ports;
pub mod adapters;
pub mod cli;

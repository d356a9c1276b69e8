//! Configuration validation.
//!
//! Validates all config fields before an analysis runs.

use crate::domain::error::AnalysisError;
use crate::domain::params::normalize_coin_id;
use crate::ports::config_port::ConfigPort;
use std::fmt;
use std::str::FromStr;

/// Where market data comes from, selected by `[market] source`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    CoinGecko,
    Json,
    Csv,
}

impl FromStr for SourceKind {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "coingecko" => Ok(SourceKind::CoinGecko),
            "json" => Ok(SourceKind::Json),
            "csv" => Ok(SourceKind::Csv),
            other => Err(AnalysisError::config_invalid(
                "market",
                "source",
                format!("unknown source '{other}' (expected coingecko, json or csv)"),
            )),
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceKind::CoinGecko => write!(f, "coingecko"),
            SourceKind::Json => write!(f, "json"),
            SourceKind::Csv => write!(f, "csv"),
        }
    }
}

pub fn validate_market_config(config: &dyn ConfigPort) -> Result<(), AnalysisError> {
    validate_non_empty(config, "market", "coin_id")?;
    if let Some(coin) = config.get_string("market", "coin_id") {
        normalize_coin_id(&coin)?;
    }
    validate_non_empty(config, "market", "vs_currency")?;
    validate_at_least_one(config, "market", "days", 30)?;
    validate_at_least_one(config, "market", "timeout_secs", 10)?;
    if let Some(source) = config.get_string("market", "source") {
        source.parse::<SourceKind>()?;
    }
    Ok(())
}

pub fn validate_analysis_config(config: &dyn ConfigPort) -> Result<(), AnalysisError> {
    validate_at_least_one(config, "indicators", "rsi_period", 14)?;
    validate_at_least_one(config, "indicators", "macd_fast", 12)?;
    validate_at_least_one(config, "indicators", "macd_slow", 26)?;
    validate_at_least_one(config, "indicators", "macd_signal", 9)?;
    validate_at_least_one(config, "indicators", "short_volume_window", 7)?;
    validate_macd_spans(config)?;
    validate_thresholds(config)?;
    Ok(())
}

pub fn validate_web_config(config: &dyn ConfigPort) -> Result<(), AnalysisError> {
    let port = config.get_int("web", "port", 8080);
    if !(1..=65535).contains(&port) {
        return Err(AnalysisError::config_invalid(
            "web",
            "port",
            "port must be between 1 and 65535",
        ));
    }
    Ok(())
}

fn validate_non_empty(config: &dyn ConfigPort, section: &str, key: &str) -> Result<(), AnalysisError> {
    match config.get_string(section, key) {
        Some(s) if s.trim().is_empty() => Err(AnalysisError::config_invalid(
            section,
            key,
            format!("{key} must not be empty"),
        )),
        _ => Ok(()),
    }
}

fn validate_at_least_one(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
    default: i64,
) -> Result<(), AnalysisError> {
    if config.get_int(section, key, default) < 1 {
        return Err(AnalysisError::config_invalid(
            section,
            key,
            format!("{key} must be at least 1"),
        ));
    }
    Ok(())
}

fn validate_macd_spans(config: &dyn ConfigPort) -> Result<(), AnalysisError> {
    let fast = config.get_int("indicators", "macd_fast", 12);
    let slow = config.get_int("indicators", "macd_slow", 26);
    if fast >= slow {
        return Err(AnalysisError::config_invalid(
            "indicators",
            "macd_fast",
            "macd_fast must be less than macd_slow",
        ));
    }
    Ok(())
}

fn validate_thresholds(config: &dyn ConfigPort) -> Result<(), AnalysisError> {
    let oversold = config.get_double("signal", "oversold", 30.0);
    let overbought = config.get_double("signal", "overbought", 70.0);

    for (key, value) in [("oversold", oversold), ("overbought", overbought)] {
        if !(0.0..=100.0).contains(&value) {
            return Err(AnalysisError::config_invalid(
                "signal",
                key,
                format!("{key} must be between 0 and 100"),
            ));
        }
    }
    if oversold >= overbought {
        return Err(AnalysisError::config_invalid(
            "signal",
            "oversold",
            "oversold must be less than overbought",
        ));
    }
    Ok(())
}

//! Tunable analysis parameters and the market-data query.

use crate::domain::error::AnalysisError;
use crate::domain::flow::DEFAULT_SHORT_VOLUME_WINDOW;
use crate::domain::indicator::macd::{DEFAULT_FAST, DEFAULT_SIGNAL, DEFAULT_SLOW};
use crate::domain::indicator::rsi::DEFAULT_PERIOD;
use crate::domain::signal::SignalThresholds;

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisParams {
    pub rsi_period: usize,
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,
    pub short_volume_window: usize,
    pub thresholds: SignalThresholds,
}

impl Default for AnalysisParams {
    fn default() -> Self {
        Self {
            rsi_period: DEFAULT_PERIOD,
            macd_fast: DEFAULT_FAST,
            macd_slow: DEFAULT_SLOW,
            macd_signal: DEFAULT_SIGNAL,
            short_volume_window: DEFAULT_SHORT_VOLUME_WINDOW,
            thresholds: SignalThresholds::default(),
        }
    }
}

impl AnalysisParams {
    pub fn validate(&self) -> Result<(), AnalysisError> {
        let periods = [
            ("rsi_period", self.rsi_period),
            ("macd_fast", self.macd_fast),
            ("macd_slow", self.macd_slow),
            ("macd_signal", self.macd_signal),
            ("short_volume_window", self.short_volume_window),
        ];
        for (key, value) in periods {
            if value == 0 {
                return Err(AnalysisError::config_invalid(
                    "indicators",
                    key,
                    format!("{key} must be at least 1"),
                ));
            }
        }
        if self.macd_fast >= self.macd_slow {
            return Err(AnalysisError::config_invalid(
                "indicators",
                "macd_fast",
                "macd_fast must be less than macd_slow",
            ));
        }

        let SignalThresholds {
            oversold,
            overbought,
        } = self.thresholds;
        if !(0.0..=100.0).contains(&oversold) {
            return Err(AnalysisError::config_invalid(
                "signal",
                "oversold",
                "oversold must be between 0 and 100",
            ));
        }
        if !(0.0..=100.0).contains(&overbought) {
            return Err(AnalysisError::config_invalid(
                "signal",
                "overbought",
                "overbought must be between 0 and 100",
            ));
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
}

/// Which asset to fetch and over what period.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketQuery {
    pub coin_id: String,
    pub vs_currency: String,
    pub days: u32,
}

/// Trim and lowercase a coin id. Ids are ASCII letters, digits and dashes,
/// as CoinGecko uses them; anything else is rejected before it can reach a
/// URL or a file path.
pub fn normalize_coin_id(raw: &str) -> Result<String, AnalysisError> {
    let coin = raw.trim().to_lowercase();
    if coin.is_empty() {
        return Err(AnalysisError::config_invalid(
            "market",
            "coin_id",
            "coin id must not be empty",
        ));
    }
    if !coin
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(AnalysisError::config_invalid(
            "market",
            "coin_id",
            format!("invalid coin id: {coin}"),
        ));
    }
    Ok(coin)
}

impl Default for MarketQuery {
    fn default() -> Self {
        Self {
            coin_id: "bitcoin".to_string(),
            vs_currency: "usd".to_string(),
            days: 30,
        }
    }
}

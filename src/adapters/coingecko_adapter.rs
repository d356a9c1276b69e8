//! CoinGecko REST adapter.
//!
//! GET {api_base}/coins/{coin_id}/market_chart?vs_currency=..&days=..
//! The public API rate-limits aggressively and answers with an empty
//! `prices` array when throttled; that case is reported as its own error.

use std::time::Duration;

use tracing::{debug, info};

use crate::domain::error::AnalysisError;
use crate::domain::params::MarketQuery;
use crate::domain::sample::MarketChart;
use crate::ports::config_port::ConfigPort;
use crate::ports::market_data_port::MarketDataPort;

pub const DEFAULT_API_BASE: &str = "https://api.coingecko.com/api/v3";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

pub struct CoinGeckoAdapter {
    api_base: String,
    client: reqwest::blocking::Client,
}

impl CoinGeckoAdapter {
    pub fn new(api_base: impl Into<String>, timeout: Duration) -> Result<Self, AnalysisError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("coinscope/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AnalysisError::data_source(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            api_base: api_base.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn from_config(config: &dyn ConfigPort) -> Result<Self, AnalysisError> {
        let api_base = config
            .get_string("market", "api_base")
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
        let timeout = config.get_int("market", "timeout_secs", DEFAULT_TIMEOUT_SECS as i64);
        let timeout = u64::try_from(timeout).unwrap_or(DEFAULT_TIMEOUT_SECS);
        Self::new(api_base, Duration::from_secs(timeout))
    }

    pub fn market_chart_url(&self, query: &MarketQuery) -> String {
        format!(
            "{}/coins/{}/market_chart?vs_currency={}&days={}",
            self.api_base, query.coin_id, query.vs_currency, query.days
        )
    }
}

impl MarketDataPort for CoinGeckoAdapter {
    fn fetch_market_chart(&self, query: &MarketQuery) -> Result<MarketChart, AnalysisError> {
        let url = self.market_chart_url(query);
        info!(coin = %query.coin_id, days = query.days, "fetching market chart");

        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| AnalysisError::data_source(format!("request to {} failed: {}", url, e)))?;

        let status = response.status();
        debug!(%status, "market chart response");
        if !status.is_success() {
            return Err(AnalysisError::data_source(format!(
                "{} returned HTTP {}",
                url, status
            )));
        }

        let chart: MarketChart = response
            .json()
            .map_err(|e| AnalysisError::data_source(format!("invalid market chart JSON: {}", e)))?;

        if chart.prices.is_empty() {
            return Err(AnalysisError::data_source(
                "no price data from API; wait a few minutes and retry (rate limit)",
            ));
        }
        Ok(chart)
    }

    fn source_name(&self) -> &'static str {
        "coingecko"
    }
}

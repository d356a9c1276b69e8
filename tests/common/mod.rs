#![allow(dead_code)]

use coinscope::domain::error::AnalysisError;
use coinscope::domain::params::MarketQuery;
use coinscope::domain::sample::{MarketChart, Sample};
use coinscope::ports::market_data_port::MarketDataPort;
use std::collections::HashMap;
use std::sync::Mutex;

pub const T0: i64 = 1_700_000_000_000;
pub const HOUR: i64 = 3_600_000;

/// In-memory market data keyed by coin id. Records every query it serves.
pub struct MockMarketDataPort {
    pub charts: HashMap<String, MarketChart>,
    pub errors: HashMap<String, String>,
    pub queries: Mutex<Vec<MarketQuery>>,
}

impl MockMarketDataPort {
    pub fn new() -> Self {
        Self {
            charts: HashMap::new(),
            errors: HashMap::new(),
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn with_chart(mut self, coin_id: &str, chart: MarketChart) -> Self {
        self.charts.insert(coin_id.to_string(), chart);
        self
    }

    pub fn with_error(mut self, coin_id: &str, reason: &str) -> Self {
        self.errors.insert(coin_id.to_string(), reason.to_string());
        self
    }

    pub fn query_count(&self) -> usize {
        self.queries.lock().unwrap().len()
    }
}

impl MarketDataPort for MockMarketDataPort {
    fn fetch_market_chart(&self, query: &MarketQuery) -> Result<MarketChart, AnalysisError> {
        self.queries.lock().unwrap().push(query.clone());
        if let Some(reason) = self.errors.get(&query.coin_id) {
            return Err(AnalysisError::data_source(reason.clone()));
        }
        self.charts
            .get(&query.coin_id)
            .cloned()
            .ok_or_else(|| AnalysisError::data_source(format!("no data for {}", query.coin_id)))
    }

    fn source_name(&self) -> &'static str {
        "mock"
    }
}

/// Hourly chart with constant volume and market cap proportional to price.
pub fn chart_from_prices(prices: &[f64]) -> MarketChart {
    MarketChart {
        prices: prices
            .iter()
            .enumerate()
            .map(|(i, &p)| Sample(T0 + i as i64 * HOUR, p))
            .collect(),
        total_volumes: (0..prices.len())
            .map(|i| Sample(T0 + i as i64 * HOUR, 1_000.0))
            .collect(),
        market_caps: prices
            .iter()
            .enumerate()
            .map(|(i, &p)| Sample(T0 + i as i64 * HOUR, p * 1_000.0))
            .collect(),
    }
}

/// Prices 100, 110, 99 with volume 1000 and market cap 100000.
pub fn three_row_chart() -> MarketChart {
    MarketChart {
        prices: vec![
            Sample(T0, 100.0),
            Sample(T0 + HOUR, 110.0),
            Sample(T0 + 2 * HOUR, 99.0),
        ],
        total_volumes: (0..3).map(|i| Sample(T0 + i * HOUR, 1_000.0)).collect(),
        market_caps: (0..3).map(|i| Sample(T0 + i * HOUR, 100_000.0)).collect(),
    }
}

/// `n` bars rising by `step` from `start`.
pub fn rising_prices(n: usize, start: f64, step: f64) -> Vec<f64> {
    (0..n).map(|i| start + i as f64 * step).collect()
}

/// A strong rally that loses momentum: MACD falls under its signal line
/// while RSI is still pinned high.
pub fn decelerating_rally() -> Vec<f64> {
    let mut prices = rising_prices(30, 100.0, 5.0);
    let top = prices[prices.len() - 1];
    prices.extend((1..=10).map(|i| top + i as f64 * 0.5));
    prices
}

/// Mirror of `decelerating_rally`.
pub fn decelerating_selloff() -> Vec<f64> {
    let mut prices = rising_prices(30, 400.0, -5.0);
    let bottom = prices[prices.len() - 1];
    prices.extend((1..=10).map(|i| bottom - i as f64 * 0.5));
    prices
}

/// Serialize a chart the way the market_chart endpoint returns it.
pub fn chart_json(chart: &MarketChart) -> String {
    serde_json::to_string(chart).unwrap()
}

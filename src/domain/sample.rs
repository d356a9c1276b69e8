//! Raw market samples as delivered by a market-data source.
//!
//! The serde shape of [`MarketChart`] matches the CoinGecko `market_chart`
//! payload: every metric is an array of `[timestamp_ms, value]` pairs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::error::AnalysisError;

/// One observation of a single metric, timestamped in epoch milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample(pub i64, pub f64);

impl Sample {
    pub fn timestamp_ms(&self) -> i64 {
        self.0
    }

    pub fn value(&self) -> f64 {
        self.1
    }
}

pub type RawSeries = Vec<Sample>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Price,
    Volume,
    MarketCap,
}

impl Metric {
    pub const ALL: [Metric; 3] = [Metric::Price, Metric::Volume, Metric::MarketCap];

    pub fn name(&self) -> &'static str {
        match self {
            Metric::Price => "price",
            Metric::Volume => "volume",
            Metric::MarketCap => "market_cap",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketChart {
    #[serde(default)]
    pub prices: RawSeries,
    #[serde(default)]
    pub total_volumes: RawSeries,
    #[serde(default)]
    pub market_caps: RawSeries,
}

impl MarketChart {
    pub fn series(&self, metric: Metric) -> &RawSeries {
        match metric {
            Metric::Price => &self.prices,
            Metric::Volume => &self.total_volumes,
            Metric::MarketCap => &self.market_caps,
        }
    }

    /// Rejects empty series and non-finite sample values.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        for metric in Metric::ALL {
            let series = self.series(metric);
            if series.is_empty() {
                return Err(AnalysisError::invalid_input(format!(
                    "{} series is empty",
                    metric.name()
                )));
            }
            if let Some(bad) = series.iter().find(|s| !s.value().is_finite()) {
                return Err(AnalysisError::Computation {
                    reason: format!(
                        "non-finite {} value {} at timestamp {}",
                        metric.name(),
                        bad.value(),
                        bad.timestamp_ms()
                    ),
                });
            }
        }
        Ok(())
    }
}

/// Convert epoch milliseconds into an absolute UTC time.
pub fn to_datetime(timestamp_ms: i64) -> Result<DateTime<Utc>, AnalysisError> {
    DateTime::from_timestamp_millis(timestamp_ms).ok_or_else(|| {
        AnalysisError::invalid_input(format!("timestamp {timestamp_ms} is out of range"))
    })
}

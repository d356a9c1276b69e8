//! Series alignment: full outer join of price, volume and market cap on
//! timestamp, with forward-fill and a zero default for leading gaps.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::domain::error::AnalysisError;
use crate::domain::sample::{to_datetime, MarketChart, Metric, Sample};
use crate::domain::signal::Signal;

/// One row of the merged table. Derived fields are zero (and the signal
/// `Hold`) until the pipeline fills them in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlignedRow {
    pub timestamp: DateTime<Utc>,
    pub price: f64,
    pub volume: f64,
    pub market_cap: f64,
    pub price_change: f64,
    pub inflow: f64,
    pub outflow: f64,
    pub volume_percent_mc: f64,
    pub rsi: f64,
    pub macd: f64,
    pub macd_signal: f64,
    pub signal: Signal,
}

impl AlignedRow {
    pub fn new(timestamp: DateTime<Utc>, price: f64, volume: f64, market_cap: f64) -> Self {
        Self {
            timestamp,
            price,
            volume,
            market_cap,
            price_change: 0.0,
            inflow: 0.0,
            outflow: 0.0,
            volume_percent_mc: 0.0,
            rsi: 0.0,
            macd: 0.0,
            macd_signal: 0.0,
            signal: Signal::Hold,
        }
    }

    pub fn metric(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Price => self.price,
            Metric::Volume => self.volume,
            Metric::MarketCap => self.market_cap,
        }
    }
}

pub type AlignedTable = Vec<AlignedRow>;

/// Merge the three raw series into one ascending table.
///
/// Every distinct timestamp in any series yields a row. A metric without a
/// sample at that timestamp carries the last value seen for it, or 0.0 when
/// none has been seen yet. Duplicate timestamps within one series resolve to
/// the later sample.
pub fn align_series(chart: &MarketChart) -> Result<AlignedTable, AnalysisError> {
    chart.validate()?;

    let mut merged: BTreeMap<i64, [Option<f64>; 3]> = BTreeMap::new();
    for (slot, metric) in Metric::ALL.iter().enumerate() {
        for sample in chart.series(*metric) {
            merged.entry(sample.timestamp_ms()).or_default()[slot] = Some(sample.value());
        }
    }

    let mut last_known = [0.0_f64; 3];
    let mut table = Vec::with_capacity(merged.len());

    for (timestamp_ms, values) in merged {
        for (slot, value) in values.iter().enumerate() {
            if let Some(v) = value {
                last_known[slot] = *v;
            }
        }
        table.push(AlignedRow::new(
            to_datetime(timestamp_ms)?,
            last_known[0],
            last_known[1],
            last_known[2],
        ));
    }

    if table.is_empty() {
        return Err(AnalysisError::invalid_input("alignment produced no rows"));
    }

    Ok(table)
}

/// Split an aligned table back into one raw series per metric.
pub fn project_table(table: &[AlignedRow]) -> MarketChart {
    let project = |metric: Metric| {
        table
            .iter()
            .map(|row| Sample(row.timestamp.timestamp_millis(), row.metric(metric)))
            .collect()
    };
    MarketChart {
        prices: project(Metric::Price),
        total_volumes: project(Metric::Volume),
        market_caps: project(Metric::MarketCap),
    }
}

//! Scalar snapshot of one analysis, handed to presentation.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::alignment::AlignedRow;
use crate::domain::error::AnalysisError;
use crate::domain::flow::FlowTotals;
use crate::domain::signal::Signal;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub price: f64,
    pub market_cap: f64,
    pub volume_percent_mc: f64,
    pub total_inflow: f64,
    pub total_outflow: f64,
    pub volume_ratio: f64,
    pub signal: Signal,
    pub rsi: f64,
    pub macd: f64,
    pub macd_signal: f64,
    pub rows: usize,
    pub computed_at: DateTime<Utc>,
}

/// Row-local fields come from the last row; totals from `totals`.
pub fn summarize(
    table: &[AlignedRow],
    totals: &FlowTotals,
    computed_at: DateTime<Utc>,
) -> Result<Summary, AnalysisError> {
    let latest = table
        .last()
        .ok_or_else(|| AnalysisError::invalid_input("cannot summarize an empty table"))?;

    Ok(Summary {
        price: latest.price,
        market_cap: latest.market_cap,
        volume_percent_mc: latest.volume_percent_mc,
        total_inflow: totals.total_inflow,
        total_outflow: totals.total_outflow,
        volume_ratio: totals.volume_ratio,
        signal: latest.signal,
        rsi: latest.rsi,
        macd: latest.macd,
        macd_signal: latest.macd_signal,
        rows: table.len(),
        computed_at,
    })
}

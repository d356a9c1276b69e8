//! One analysis invocation: align, derive indicators, classify, summarize.
//!
//! Every call owns its inputs and outputs; nothing is shared between calls.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::domain::alignment::{align_series, AlignedRow, AlignedTable};
use crate::domain::error::AnalysisError;
use crate::domain::flow::{apply_flow_metrics, flow_totals, FlowTotals};
use crate::domain::indicator::{calculate_macd, calculate_rsi};
use crate::domain::params::AnalysisParams;
use crate::domain::sample::MarketChart;
use crate::domain::signal::classify;
use crate::domain::summary::{summarize, Summary};

#[derive(Debug, Clone)]
pub struct Analysis {
    pub table: AlignedTable,
    pub summary: Summary,
}

pub fn analyze(
    chart: &MarketChart,
    params: &AnalysisParams,
    computed_at: DateTime<Utc>,
) -> Result<Analysis, AnalysisError> {
    params.validate()?;

    let mut table = align_series(chart)?;
    apply_flow_metrics(&mut table);

    let prices: Vec<f64> = table.iter().map(|r| r.price).collect();
    let rsi = calculate_rsi(&prices, params.rsi_period);
    let macd = calculate_macd(&prices, params.macd_fast, params.macd_slow, params.macd_signal);

    for ((row, rsi), macd) in table.iter_mut().zip(rsi).zip(macd) {
        row.rsi = rsi;
        row.macd = macd.line;
        row.macd_signal = macd.signal;
        row.signal = classify(row.rsi, row.macd, row.macd_signal, &params.thresholds);
    }

    check_finite(&table)?;

    let totals = flow_totals(&table, params.short_volume_window);
    check_totals(&totals)?;
    let summary = summarize(&table, &totals, computed_at)?;

    debug!(
        rows = table.len(),
        signal = %summary.signal,
        rsi = summary.rsi,
        macd = summary.macd,
        "analysis complete"
    );

    Ok(Analysis { table, summary })
}

fn check_finite(table: &[AlignedRow]) -> Result<(), AnalysisError> {
    for row in table {
        let derived = [
            ("price_change", row.price_change),
            ("inflow", row.inflow),
            ("outflow", row.outflow),
            ("volume_percent_mc", row.volume_percent_mc),
            ("rsi", row.rsi),
            ("macd", row.macd),
            ("macd_signal", row.macd_signal),
        ];
        if let Some((name, value)) = derived.iter().find(|(_, v)| !v.is_finite()) {
            return Err(AnalysisError::Computation {
                reason: format!("{name} is {value} at {}", row.timestamp),
            });
        }
    }
    Ok(())
}

fn check_totals(totals: &FlowTotals) -> Result<(), AnalysisError> {
    let reductions = [
        ("total_inflow", totals.total_inflow),
        ("total_outflow", totals.total_outflow),
        ("volume_ratio", totals.volume_ratio),
    ];
    match reductions.iter().find(|(_, v)| !v.is_finite()) {
        Some((name, value)) => Err(AnalysisError::Computation {
            reason: format!("{name} is {value}"),
        }),
        None => Ok(()),
    }
}

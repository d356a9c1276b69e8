//! Flow metrics: per-row price change, inflow/outflow and volume as a
//! percentage of market cap, plus the whole-table reductions.

use crate::domain::alignment::AlignedRow;

pub const DEFAULT_SHORT_VOLUME_WINDOW: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FlowTotals {
    pub total_inflow: f64,
    pub total_outflow: f64,
    pub volume_ratio: f64,
}

/// Fractional change from `prev` to `curr`; 0.0 when `prev` is zero.
pub fn price_change(prev: f64, curr: f64) -> f64 {
    if prev == 0.0 {
        0.0
    } else {
        (curr - prev) / prev
    }
}

/// `volume / market_cap * 100`; 0.0 when market cap is zero.
pub fn volume_percent_mc(volume: f64, market_cap: f64) -> f64 {
    if market_cap == 0.0 {
        0.0
    } else {
        volume / market_cap * 100.0
    }
}

/// Fill `price_change`, `inflow`, `outflow` and `volume_percent_mc` on every row.
pub fn apply_flow_metrics(table: &mut [AlignedRow]) {
    let mut prev_price: Option<f64> = None;

    for row in table.iter_mut() {
        let change = prev_price.map_or(0.0, |prev| price_change(prev, row.price));
        row.price_change = change;
        row.inflow = if change > 0.0 { row.price * change } else { 0.0 };
        row.outflow = if change < 0.0 {
            row.price * change.abs()
        } else {
            0.0
        };
        row.volume_percent_mc = volume_percent_mc(row.volume, row.market_cap);
        prev_price = Some(row.price);
    }
}

/// Ratio of the mean of the last `short_window` volumes to the mean of all
/// volumes. Uses every value when fewer than `short_window` exist; 0.0 when
/// the overall mean is zero or there are no volumes.
pub fn volume_ratio(volumes: &[f64], short_window: usize) -> f64 {
    if volumes.is_empty() {
        return 0.0;
    }
    let window = short_window.max(1).min(volumes.len());
    let recent = &volumes[volumes.len() - window..];

    let short_mean = recent.iter().sum::<f64>() / window as f64;
    let long_mean = volumes.iter().sum::<f64>() / volumes.len() as f64;

    if long_mean == 0.0 {
        0.0
    } else {
        short_mean / long_mean
    }
}

pub fn flow_totals(table: &[AlignedRow], short_window: usize) -> FlowTotals {
    let volumes: Vec<f64> = table.iter().map(|r| r.volume).collect();
    FlowTotals {
        total_inflow: table.iter().map(|r| r.inflow).sum(),
        total_outflow: table.iter().map(|r| r.outflow).sum(),
        volume_ratio: volume_ratio(&volumes, short_window),
    }
}

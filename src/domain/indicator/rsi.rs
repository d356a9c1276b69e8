//! RSI (Relative Strength Index) with a ramp-up simple-mean window.
//!
//! delta[0] = 0, gain = max(delta, 0), loss = max(-delta, 0).
//! avg_gain / avg_loss are trailing simple means over the last `period` rows,
//! or over every row so far while fewer than `period` exist. Both sums are
//! kept as running state; the row leaving the window is subtracted.
//!
//! Formula: RSI = 100 - (100 / (1 + avg_gain / avg_loss))
//! A zero avg_loss is replaced by f64::EPSILON. When both averages are zero
//! the ratio is undefined and RSI is the neutral 50.

pub const DEFAULT_PERIOD: usize = 14;
pub const NEUTRAL_RSI: f64 = 50.0;

pub fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_gain == 0.0 && avg_loss == 0.0 {
        return NEUTRAL_RSI;
    }
    let divisor = if avg_loss == 0.0 { f64::EPSILON } else { avg_loss };
    let rs = avg_gain / divisor;
    let rsi = 100.0 - 100.0 / (1.0 + rs);
    if rsi.is_nan() {
        NEUTRAL_RSI
    } else {
        rsi.clamp(0.0, 100.0)
    }
}

pub fn calculate_rsi(prices: &[f64], period: usize) -> Vec<f64> {
    if period == 0 {
        return Vec::new();
    }

    let mut gains: Vec<f64> = Vec::with_capacity(prices.len());
    let mut losses: Vec<f64> = Vec::with_capacity(prices.len());
    let mut gain_sum = 0.0;
    let mut loss_sum = 0.0;
    let mut values = Vec::with_capacity(prices.len());

    for i in 0..prices.len() {
        let change = if i == 0 { 0.0 } else { prices[i] - prices[i - 1] };
        let gain = if change > 0.0 { change } else { 0.0 };
        let loss = if change < 0.0 { -change } else { 0.0 };
        gains.push(gain);
        losses.push(loss);
        gain_sum += gain;
        loss_sum += loss;

        if i >= period {
            gain_sum -= gains[i - period];
            loss_sum -= losses[i - period];
        }

        // running sums can drift a hair below zero after subtraction
        let window = (i + 1).min(period) as f64;
        let avg_gain = (gain_sum / window).max(0.0);
        let avg_loss = (loss_sum / window).max(0.0);

        values.push(rsi_from_averages(avg_gain, avg_loss));
    }

    values
}

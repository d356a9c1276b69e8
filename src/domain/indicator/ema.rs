//! Exponential Moving Average with ramp-up.
//!
//! alpha = 2/(span+1). Each output is the bias-adjusted weighted mean of all
//! inputs so far, weights (1-alpha)^k for the value k rows back:
//!
//!   EMA[i] = sum_k (1-alpha)^k * x[i-k] / sum_k (1-alpha)^k
//!
//! Both sums are kept as running state, so EMA[0] = x[0] and the estimate
//! converges to the classic recursive EMA as the window fills.

/// 2/(span+1)
pub fn smoothing_factor(span: usize) -> f64 {
    2.0 / (span as f64 + 1.0)
}

#[derive(Debug, Clone)]
pub struct Ema {
    decay: f64,
    weighted_sum: f64,
    weight_total: f64,
}

impl Ema {
    pub fn new(span: usize) -> Self {
        Self {
            decay: 1.0 - smoothing_factor(span),
            weighted_sum: 0.0,
            weight_total: 0.0,
        }
    }

    pub fn next(&mut self, value: f64) -> f64 {
        self.weighted_sum = value + self.decay * self.weighted_sum;
        self.weight_total = 1.0 + self.decay * self.weight_total;
        self.weighted_sum / self.weight_total
    }
}

#[cfg(test)]
pub(crate) fn calculate_ema(values: &[f64], span: usize) -> Vec<f64> {
    if span == 0 {
        return Vec::new();
    }
    let mut ema = Ema::new(span);
    values.iter().map(|&v| ema.next(v)).collect()
}

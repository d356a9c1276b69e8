//! MACD (Moving Average Convergence Divergence) indicator.
//!
//! MACD Line = EMA(fast) - EMA(slow)
//! Signal Line = EMA(signal) of MACD Line
//!
//! Default parameters: fast=12, slow=26, signal=9
//! All three averages use the ramp-up EMA from [`super::ema`], so there is no
//! warmup gap: on the first row both EMAs equal the price and MACD is 0.

use crate::domain::indicator::ema::Ema;

pub const DEFAULT_FAST: usize = 12;
pub const DEFAULT_SLOW: usize = 26;
pub const DEFAULT_SIGNAL: usize = 9;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MacdPoint {
    pub line: f64,
    pub signal: f64,
}

pub fn calculate_macd(prices: &[f64], fast: usize, slow: usize, signal_span: usize) -> Vec<MacdPoint> {
    if fast == 0 || slow == 0 || signal_span == 0 {
        return Vec::new();
    }

    let mut ema_fast = Ema::new(fast);
    let mut ema_slow = Ema::new(slow);
    let mut ema_signal = Ema::new(signal_span);

    prices
        .iter()
        .map(|&price| {
            let line = ema_fast.next(price) - ema_slow.next(price);
            let signal = ema_signal.next(line);
            MacdPoint { line, signal }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::indicator::ema::calculate_ema;
    use approx::assert_relative_eq;

    fn calculate_macd_default(prices: &[f64]) -> Vec<MacdPoint> {
        calculate_macd(prices, DEFAULT_FAST, DEFAULT_SLOW, DEFAULT_SIGNAL)
    }

    fn rising(n: usize) -> Vec<f64> {
        (0..n).map(|i| 100.0 + i as f64).collect()
    }

    #[test]
    fn macd_first_row_is_zero() {
        let series = calculate_macd_default(&[250.0]);
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].line, 0.0);
        assert_eq!(series[0].signal, 0.0);
    }

    #[test]
    fn macd_line_is_ema_fast_minus_ema_slow() {
        let prices = [10.0, 20.0, 30.0, 25.0, 50.0, 60.0, 55.0, 80.0, 90.0, 100.0];
        let series = calculate_macd(&prices, 3, 5, 2);

        let fast = calculate_ema(&prices, 3);
        let slow = calculate_ema(&prices, 5);

        for (i, point) in series.iter().enumerate() {
            assert_relative_eq!(point.line, fast[i] - slow[i], epsilon = 1e-12);
        }
    }

    #[test]
    fn macd_signal_is_ema_of_line() {
        let prices = rising(40);
        let series = calculate_macd_default(&prices);
        let lines: Vec<f64> = series.iter().map(|p| p.line).collect();
        let expected = calculate_ema(&lines, DEFAULT_SIGNAL);

        for (point, exp) in series.iter().zip(expected) {
            assert_relative_eq!(point.signal, exp, epsilon = 1e-12);
        }
    }

    #[test]
    fn macd_rising_prices_positive_line() {
        let series = calculate_macd_default(&rising(40));
        assert!(series[1..].iter().all(|p| p.line > 0.0));
    }

    #[test]
    fn macd_flat_prices_zero() {
        for point in calculate_macd_default(&[100.0; 30]) {
            assert_relative_eq!(point.line, 0.0, epsilon = 1e-9);
            assert_relative_eq!(point.signal, 0.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn macd_empty_prices() {
        assert!(calculate_macd_default(&[]).is_empty());
    }

    #[test]
    fn macd_zero_period() {
        let prices = [100.0, 101.0, 102.0];
        assert!(calculate_macd(&prices, 0, 26, 9).is_empty());
        assert!(calculate_macd(&prices, 12, 0, 9).is_empty());
        assert!(calculate_macd(&prices, 12, 26, 0).is_empty());
    }

    #[test]
    fn macd_default_constants() {
        assert_eq!(DEFAULT_FAST, 12);
        assert_eq!(DEFAULT_SLOW, 26);
        assert_eq!(DEFAULT_SIGNAL, 9);
    }
}

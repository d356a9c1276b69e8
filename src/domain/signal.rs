//! Row-local trading signal from RSI and MACD.
//!
//! Rules, first match wins:
//! - RSI < oversold and MACD above its signal line: Buy
//! - RSI > overbought and MACD below its signal line: Sell
//! - otherwise: Hold
//!
//! There is no hysteresis; a single borderline bar can flip the result.

use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_OVERSOLD: f64 = 30.0;
pub const DEFAULT_OVERBOUGHT: f64 = 70.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Signal {
    Buy,
    Sell,
    Hold,
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Signal::Buy => write!(f, "Buy"),
            Signal::Sell => write!(f, "Sell"),
            Signal::Hold => write!(f, "Hold"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignalThresholds {
    pub oversold: f64,
    pub overbought: f64,
}

impl Default for SignalThresholds {
    fn default() -> Self {
        Self {
            oversold: DEFAULT_OVERSOLD,
            overbought: DEFAULT_OVERBOUGHT,
        }
    }
}

pub fn classify(rsi: f64, macd: f64, macd_signal: f64, thresholds: &SignalThresholds) -> Signal {
    if rsi < thresholds.oversold && macd > macd_signal {
        Signal::Buy
    } else if rsi > thresholds.overbought && macd < macd_signal {
        Signal::Sell
    } else {
        Signal::Hold
    }
}

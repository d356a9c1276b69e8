//! Technical indicator implementations.
//!
//! Every indicator here consumes a plain price column and yields one output
//! per input row. Warmup uses a ramp-up policy: until a full window is
//! available the statistic is computed over the rows seen so far, so row 0
//! is always defined.

pub mod ema;
pub mod macd;
pub mod rsi;

pub use macd::{calculate_macd, MacdPoint};
pub use rsi::calculate_rsi;

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndicatorType {
    Rsi(usize),
    Macd {
        fast: usize,
        slow: usize,
        signal: usize,
    },
    MacdSignal {
        fast: usize,
        slow: usize,
        signal: usize,
    },
}

impl fmt::Display for IndicatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndicatorType::Rsi(period) => write!(f, "RSI({})", period),
            IndicatorType::Macd { fast, slow, signal } => {
                write!(f, "MACD({},{},{})", fast, slow, signal)
            }
            IndicatorType::MacdSignal { fast, slow, signal } => {
                write!(f, "MACD signal({},{},{})", fast, slow, signal)
            }
        }
    }
}

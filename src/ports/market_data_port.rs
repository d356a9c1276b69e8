//! Market data access port trait.

use crate::domain::error::AnalysisError;
use crate::domain::params::MarketQuery;
use crate::domain::sample::MarketChart;

pub trait MarketDataPort {
    /// Fetch price, volume and market-cap series for one asset.
    fn fetch_market_chart(&self, query: &MarketQuery) -> Result<MarketChart, AnalysisError>;

    /// Short name used in logs and error messages.
    fn source_name(&self) -> &'static str;
}

//! JSON file data adapter.
//!
//! Reads `<base_path>/<coin_id>.json` holding a saved `market_chart` payload.

use crate::domain::error::AnalysisError;
use crate::domain::params::MarketQuery;
use crate::domain::sample::MarketChart;
use crate::ports::market_data_port::MarketDataPort;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub struct JsonFileAdapter {
    base_path: PathBuf,
}

impl JsonFileAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn json_path(&self, coin_id: &str) -> PathBuf {
        self.base_path.join(format!("{}.json", coin_id))
    }
}

/// Decode one market_chart JSON file.
pub fn read_market_chart(path: &Path) -> Result<MarketChart, AnalysisError> {
    let content = fs::read_to_string(path).map_err(|e| {
        AnalysisError::data_source(format!("failed to read {}: {}", path.display(), e))
    })?;
    parse_market_chart(&content)
        .map_err(|e| AnalysisError::data_source(format!("{}: {}", path.display(), e)))
}

pub fn parse_market_chart(content: &str) -> Result<MarketChart, AnalysisError> {
    serde_json::from_str(content)
        .map_err(|e| AnalysisError::data_source(format!("invalid market chart JSON: {}", e)))
}

impl MarketDataPort for JsonFileAdapter {
    fn fetch_market_chart(&self, query: &MarketQuery) -> Result<MarketChart, AnalysisError> {
        let path = self.json_path(&query.coin_id);
        debug!(path = %path.display(), "reading market chart");
        read_market_chart(&path)
    }

    fn source_name(&self) -> &'static str {
        "json"
    }
}

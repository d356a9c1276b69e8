//! CSV file data adapter.
//!
//! Reads `<base_path>/<coin_id>.csv` with header `time,price,volume,market_cap`.
//! `time` is epoch milliseconds. An empty cell means that metric has no
//! sample at that timestamp, which lets one file describe misaligned series.

use crate::domain::error::AnalysisError;
use crate::domain::params::MarketQuery;
use crate::domain::sample::{MarketChart, Sample};
use crate::ports::market_data_port::MarketDataPort;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub struct CsvAdapter {
    base_path: PathBuf,
}

impl CsvAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, coin_id: &str) -> PathBuf {
        self.base_path.join(format!("{}.csv", coin_id))
    }
}

pub fn read_csv_chart(path: &Path) -> Result<MarketChart, AnalysisError> {
    let content = fs::read_to_string(path).map_err(|e| {
        AnalysisError::data_source(format!("failed to read {}: {}", path.display(), e))
    })?;
    parse_csv_chart(&content)
}

pub fn parse_csv_chart(content: &str) -> Result<MarketChart, AnalysisError> {
    let mut rdr = csv::Reader::from_reader(content.as_bytes());
    let mut chart = MarketChart::default();

    for (line, result) in rdr.records().enumerate() {
        let record = result
            .map_err(|e| AnalysisError::data_source(format!("CSV parse error: {}", e)))?;

        let time_str = record
            .get(0)
            .ok_or_else(|| AnalysisError::data_source("missing time column"))?;
        let time: i64 = time_str.trim().parse().map_err(|e| {
            AnalysisError::data_source(format!("invalid time value on row {}: {}", line + 1, e))
        })?;

        let columns = [
            (1, "price", &mut chart.prices),
            (2, "volume", &mut chart.total_volumes),
            (3, "market_cap", &mut chart.market_caps),
        ];
        for (idx, name, series) in columns {
            let cell = record.get(idx).map(str::trim).unwrap_or("");
            if cell.is_empty() {
                continue;
            }
            let value: f64 = cell.parse().map_err(|e| {
                AnalysisError::data_source(format!(
                    "invalid {} value on row {}: {}",
                    name,
                    line + 1,
                    e
                ))
            })?;
            series.push(Sample(time, value));
        }
    }

    Ok(chart)
}

impl MarketDataPort for CsvAdapter {
    fn fetch_market_chart(&self, query: &MarketQuery) -> Result<MarketChart, AnalysisError> {
        let path = self.csv_path(&query.coin_id);
        debug!(path = %path.display(), "reading csv chart");
        read_csv_chart(&path)
    }

    fn source_name(&self) -> &'static str {
        "csv"
    }
}

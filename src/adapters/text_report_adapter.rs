//! Plain-text report adapter implementing ReportPort.

use std::fs;
use std::io::Write;

use crate::adapters::format::{percent, ratio, usd};
use crate::domain::error::AnalysisError;
use crate::domain::pipeline::Analysis;
use crate::ports::report_port::ReportPort;

pub struct TextReportAdapter;

/// `bitcoin` -> `Bitcoin`
pub fn display_name(coin_id: &str) -> String {
    let mut chars = coin_id.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn render_text(analysis: &Analysis, coin_id: &str) -> String {
    let s = &analysis.summary;
    let mut out = String::new();

    out.push_str(&format!("{} Analysis\n", display_name(coin_id)));
    out.push_str(&format!(
        "Computed:           {}\n",
        s.computed_at.format("%Y-%m-%d %H:%M")
    ));
    out.push_str(&format!("Price:              {}\n", usd(s.price, 2)));
    out.push_str(&format!("Market Cap:         {}\n", usd(s.market_cap, 0)));
    out.push_str(&format!("Volume / MC:        {}\n", percent(s.volume_percent_mc)));
    out.push_str(&format!("Inflow:             {}\n", usd(s.total_inflow, 0)));
    out.push_str(&format!("Outflow:            {}\n", usd(s.total_outflow, 0)));
    out.push_str(&format!("Volume Ratio:       {}\n", ratio(s.volume_ratio)));
    out.push_str(&format!("RSI:                {:.2}\n", s.rsi));
    out.push_str(&format!(
        "MACD:               {:.4} (signal {:.4})\n",
        s.macd, s.macd_signal
    ));
    out.push_str(&format!("Signal:             {}\n", s.signal));
    out.push_str(&format!("Rows:               {}\n", s.rows));
    out
}

impl ReportPort for TextReportAdapter {
    fn write(&self, analysis: &Analysis, coin_id: &str, output_path: &str) -> Result<(), AnalysisError> {
        let text = render_text(analysis, coin_id);
        if output_path == "-" {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(text.as_bytes())?;
            return Ok(());
        }
        fs::write(output_path, text).map_err(|e| AnalysisError::Report {
            reason: format!("failed to write {}: {}", output_path, e),
        })
    }
}

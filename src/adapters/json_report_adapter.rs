//! JSON summary output, for scripts and the `--format json` flag.

use serde::Serialize;

use crate::domain::error::AnalysisError;
use crate::domain::pipeline::Analysis;
use crate::domain::summary::Summary;
use crate::ports::report_port::ReportPort;

pub struct JsonReportAdapter;

#[derive(Serialize)]
struct JsonReport<'a> {
    coin_id: &'a str,
    #[serde(flatten)]
    summary: &'a Summary,
}

pub fn render_json(analysis: &Analysis, coin_id: &str) -> Result<String, AnalysisError> {
    let report = JsonReport {
        coin_id,
        summary: &analysis.summary,
    };
    serde_json::to_string_pretty(&report).map_err(|e| AnalysisError::Report {
        reason: format!("failed to encode summary: {}", e),
    })
}

impl ReportPort for JsonReportAdapter {
    fn write(&self, analysis: &Analysis, coin_id: &str, output_path: &str) -> Result<(), AnalysisError> {
        let mut json = render_json(analysis, coin_id)?;
        json.push('\n');
        if output_path == "-" {
            print!("{}", json);
            return Ok(());
        }
        std::fs::write(output_path, json).map_err(|e| AnalysisError::Report {
            reason: format!("failed to write {}: {}", output_path, e),
        })
    }
}

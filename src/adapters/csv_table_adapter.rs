//! Writes the full aligned table as CSV, one row per timestamp.

use std::io::Write;

use tracing::debug;

use crate::domain::error::AnalysisError;
use crate::domain::pipeline::Analysis;
use crate::ports::report_port::ReportPort;

pub struct CsvTableAdapter;

fn write_table<W: Write>(writer: W, analysis: &Analysis) -> Result<(), AnalysisError> {
    let mut wtr = csv::Writer::from_writer(writer);
    for row in &analysis.table {
        wtr.serialize(row).map_err(|e| AnalysisError::Report {
            reason: format!("failed to serialize row {}: {}", row.timestamp, e),
        })?;
    }
    wtr.flush()?;
    Ok(())
}

impl ReportPort for CsvTableAdapter {
    fn write(&self, analysis: &Analysis, coin_id: &str, output_path: &str) -> Result<(), AnalysisError> {
        debug!(coin = coin_id, path = output_path, rows = analysis.table.len(), "writing table");
        if output_path == "-" {
            return write_table(std::io::stdout().lock(), analysis);
        }
        let file = std::fs::File::create(output_path).map_err(|e| AnalysisError::Report {
            reason: format!("failed to create {}: {}", output_path, e),
        })?;
        write_table(file, analysis)
    }
}

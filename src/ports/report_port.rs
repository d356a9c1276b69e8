//! Report generation port trait.

use crate::domain::error::AnalysisError;
use crate::domain::pipeline::Analysis;

/// Port for writing analysis results. An `output_path` of `-` means stdout.
pub trait ReportPort {
    fn write(&self, analysis: &Analysis, coin_id: &str, output_path: &str) -> Result<(), AnalysisError>;
}

//! Response envelopes. Field names are part of the public API.

use chrono::{SecondsFormat, Utc};
use serde::Serialize;

use hmpi_core::{BatchSummary, MetricsReport};

pub fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[derive(Debug, Serialize)]
pub struct DirectResponse {
    pub success: bool,
    pub results: MetricsReport,
    pub timestamp: String,
}

/// One uploaded row: bookkeeping fields next to the report fields.
#[derive(Debug, Serialize)]
pub struct SampleResult {
    pub sample_id: String,
    pub row_index: usize,
    pub available_metals: Vec<String>,
    pub timestamp: String,
    #[serde(flatten)]
    pub report: MetricsReport,
}

impl SampleResult {
    pub fn new(row_index: usize, available_metals: &[String], report: MetricsReport) -> Self {
        Self {
            sample_id: format!("Sample_{}", row_index + 1),
            row_index,
            available_metals: available_metals.to_vec(),
            timestamp: timestamp(),
            report,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub success: bool,
    pub filename: String,
    pub overall_statistics: BatchSummary,
    pub samples: Vec<SampleResult>,
    pub analysis_timestamp: String,
}

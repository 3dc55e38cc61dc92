//! Uploaded file detection.

use hmpi_core::error::{HmpiError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Csv,
    /// `.xlsx` or legacy `.xls`; the first worksheet is read.
    Excel,
}

/// Pick a decoder from the file extension (case-insensitive).
pub fn detect(filename: &str) -> Result<FileKind> {
    let ext = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "csv" => Ok(FileKind::Csv),
        "xlsx" | "xls" => Ok(FileKind::Excel),
        _ => Err(HmpiError::InvalidFileFormat(format!(
            "file must be CSV or Excel format: {filename}"
        ))),
    }
}

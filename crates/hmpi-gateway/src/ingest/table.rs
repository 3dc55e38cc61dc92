//! CSV and Excel rows -> per-sample concentration mappings.

use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Reader};
use csv::{ReaderBuilder, Trim};

use hmpi_core::error::{HmpiError, Result};
use hmpi_core::reference::ReferenceTables;

use super::sample::Sample;

#[derive(Debug)]
pub struct Table {
    /// Known metal columns, in header order.
    pub available_metals: Vec<String>,
    /// Every data row; rows without usable values carry an empty sample.
    pub rows: Vec<Row>,
}

#[derive(Debug)]
pub struct Row {
    /// Zero-based data row index (header excluded).
    pub index: usize,
    pub sample: Sample,
}

pub fn parse_csv(tables: &ReferenceTables, content: &[u8]) -> Result<Table> {
    let text = std::str::from_utf8(content)
        .map_err(|_| HmpiError::InvalidFileFormat("CSV must be UTF-8 encoded".into()))?;
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let mut rdr = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = rdr
        .headers()
        .map_err(|e| HmpiError::InvalidFileFormat(format!("unreadable CSV header: {e}")))?
        .clone();

    let columns = known_columns(tables, headers.iter())?;

    let mut rows = Vec::new();
    for (index, record) in rdr.records().enumerate() {
        let record = record
            .map_err(|e| HmpiError::InvalidFileFormat(format!("unreadable CSV row {}: {e}", index + 1)))?;

        let mut sample = Sample::default();
        for (idx, metal) in &columns {
            if let Some(cell) = record.get(*idx) {
                sample.push_cell(metal, cell);
            }
        }
        rows.push(finish_row(index, sample));
    }

    Ok(Table::new(columns, rows))
}

/// First worksheet of an `.xlsx`/`.xls` workbook; row 0 is the header.
pub fn parse_excel(tables: &ReferenceTables, content: &[u8]) -> Result<Table> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(content))
        .map_err(|e| HmpiError::InvalidFileFormat(format!("unreadable Excel workbook: {e}")))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| HmpiError::InvalidFileFormat("Excel workbook has no worksheets".into()))?
        .map_err(|e| HmpiError::InvalidFileFormat(format!("unreadable worksheet: {e}")))?;

    let mut records = range.rows();
    let headers: Vec<String> = records
        .next()
        .ok_or_else(|| HmpiError::InvalidFileFormat("worksheet is empty".into()))?
        .iter()
        .map(|cell| cell.to_string().trim().to_string())
        .collect();
    let columns = known_columns(tables, headers.iter().map(String::as_str))?;

    let mut rows = Vec::new();
    for (index, record) in records.enumerate() {
        let mut sample = Sample::default();
        for (idx, metal) in &columns {
            match record.get(*idx) {
                None | Some(Data::Empty) => {}
                Some(Data::Float(v)) => sample.push_number(metal, *v),
                Some(Data::Int(v)) => sample.push_number(metal, *v as f64),
                Some(Data::String(raw)) => sample.push_cell(metal, raw),
                Some(other) => sample.push_cell(metal, &other.to_string()),
            }
        }
        rows.push(finish_row(index, sample));
    }

    Ok(Table::new(columns, rows))
}

impl Table {
    fn new(columns: Vec<(usize, String)>, rows: Vec<Row>) -> Self {
        Self {
            available_metals: columns.into_iter().map(|(_, name)| name).collect(),
            rows,
        }
    }
}

/// Known metal columns as `(index, name)`. Duplicate headers: the first column wins.
fn known_columns<'h>(
    tables: &ReferenceTables,
    headers: impl Iterator<Item = &'h str>,
) -> Result<Vec<(usize, String)>> {
    let mut columns: Vec<(usize, String)> = Vec::new();
    for (idx, name) in headers.enumerate() {
        if tables.is_known(name) && !columns.iter().any(|(_, n)| n == name) {
            columns.push((idx, name.to_string()));
        }
    }
    if columns.is_empty() {
        return Err(HmpiError::NoRecognizedColumns {
            expected: tables.metals().map(str::to_string).collect(),
        });
    }
    Ok(columns)
}

fn finish_row(index: usize, sample: Sample) -> Row {
    if sample.is_empty() {
        tracing::debug!(row = index, "row has no usable concentrations, skipped");
    }
    Row { index, sample }
}

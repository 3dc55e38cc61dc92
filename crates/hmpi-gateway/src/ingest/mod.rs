//! Ingestion layer: request bodies and uploaded files into validated samples.
//!
//! Nothing here computes metrics. Values that fail validation are skipped and
//! recorded on the [`Sample`] so handlers can log and count them.

pub mod sample;
pub mod table;
pub mod upload;

pub use sample::{Sample, SkipReason, SkippedValue};
pub use table::{parse_csv, parse_excel, Row, Table};
pub use upload::{detect, FileKind};

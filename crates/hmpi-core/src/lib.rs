//! HMPI core: reference tables, the pollution index engine, batch statistics
//! and the shared error surface.
//!
//! The crate carries no transport or runtime dependencies. The engine is a
//! pure function over read-only tables, so it can be called from any number
//! of request handlers without coordination.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here. All fallible paths
//! surface as `HmpiError`/`Result`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod engine;
pub mod error;
pub mod reference;
pub mod summary;

pub use engine::{compute, MetricsReport};
/// Shared result type.
pub use error::{HmpiError, Result};
pub use reference::{ReferenceTables, RiskBand, RiskClassification};
pub use summary::{summarize, BatchSummary};

//! HMPI service library entry.
//!
//! This crate wires config, ingestion, the HTTP API and metrics around the
//! `hmpi-core` engine. It is consumed by the binary (`main.rs`) and by
//! integration tests.

pub mod api;
pub mod app_state;
pub mod config;
pub mod ingest;
pub mod obs;
pub mod router;

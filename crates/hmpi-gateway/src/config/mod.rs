//! Service config loader (strict parsing).

pub mod schema;

use std::fs;
use std::path::Path;

use hmpi_core::error::{HmpiError, Result};

pub use schema::{ReferenceSection, ServerSection, ServiceConfig};

pub fn load_from_file(path: &str) -> Result<ServiceConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| HmpiError::Internal(format!("read config failed: {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<ServiceConfig> {
    let cfg: ServiceConfig = serde_yaml::from_str(s)
        .map_err(|e| HmpiError::BadRequest(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Like [`load_from_file`], but a missing file means built-in defaults.
pub fn load_or_default(path: &str) -> Result<ServiceConfig> {
    if !Path::new(path).exists() {
        tracing::info!(%path, "config file not found, using defaults");
        return Ok(ServiceConfig::default());
    }
    load_from_file(path)
}

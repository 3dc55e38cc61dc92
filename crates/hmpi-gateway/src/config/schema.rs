use std::collections::BTreeMap;
use std::net::SocketAddr;

use axum::http::HeaderValue;
use serde::Deserialize;

use hmpi_core::error::{HmpiError, Result};
use hmpi_core::reference::{ReferenceTables, RiskBand};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,

    /// Deploy-time replacement for the built-in tables.
    #[serde(default)]
    pub reference: Option<ReferenceSection>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            version: 1,
            server: ServerSection::default(),
            reference: None,
        }
    }
}

impl ServiceConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(HmpiError::UnsupportedVersion);
        }

        self.server.validate()?;
        self.reference_tables()?;

        Ok(())
    }

    /// Tables the engine runs against: the configured set, or the built-ins.
    pub fn reference_tables(&self) -> Result<ReferenceTables> {
        match &self.reference {
            Some(r) => ReferenceTables::new(
                r.standard_limits.clone(),
                r.unit_weights.clone(),
                r.risk_bands.clone(),
            ),
            None => Ok(ReferenceTables::builtin()),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,

    /// Allowed browser origins. Empty allows any origin.
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,

    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            cors_origins: default_cors_origins(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

impl ServerSection {
    pub fn validate(&self) -> Result<()> {
        self.socket_addr()?;
        if !(1024..=100 * 1024 * 1024).contains(&self.max_upload_bytes) {
            return Err(HmpiError::BadRequest(
                "server.max_upload_bytes must be between 1024 and 104857600".into(),
            ));
        }
        for origin in &self.cors_origins {
            HeaderValue::from_str(origin).map_err(|_| {
                HmpiError::BadRequest(format!("server.cors_origins has invalid origin: {origin}"))
            })?;
        }
        Ok(())
    }

    pub fn socket_addr(&self) -> Result<SocketAddr> {
        self.listen.parse().map_err(|_| {
            HmpiError::BadRequest(format!(
                "server.listen must be a valid socket address: {}",
                self.listen
            ))
        })
    }
}

fn default_listen() -> String {
    "0.0.0.0:8000".into()
}
fn default_cors_origins() -> Vec<String> {
    (3000..=3003).map(|port| format!("http://localhost:{port}")).collect()
}
fn default_max_upload_bytes() -> usize {
    10 * 1024 * 1024
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReferenceSection {
    pub standard_limits: BTreeMap<String, f64>,
    pub unit_weights: BTreeMap<String, f64>,
    #[serde(default = "default_risk_bands")]
    pub risk_bands: Vec<RiskBand>,
}

fn default_risk_bands() -> Vec<RiskBand> {
    ReferenceTables::builtin().bands().to_vec()
}

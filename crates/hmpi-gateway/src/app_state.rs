//! Shared application state for the HMPI service.
//!
//! Reference tables are built once here and never mutated afterwards, so
//! handlers read them through a plain `Arc` without locking.

use std::sync::Arc;

use hmpi_core::error::Result;
use hmpi_core::reference::ReferenceTables;

use crate::config::ServiceConfig;
use crate::obs::ServiceMetrics;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
    metrics: Arc<ServiceMetrics>,
}

struct AppStateInner {
    cfg: ServiceConfig,
    tables: Arc<ReferenceTables>,
}

impl AppState {
    /// Build application state.
    /// Returns Result so main can report bad reference tables instead of panicking.
    pub fn new(cfg: ServiceConfig) -> Result<Self> {
        let tables = cfg.reference_tables()?;
        tracing::info!(
            metals = tables.metals().count(),
            bands = tables.bands().len(),
            custom = cfg.reference.is_some(),
            "reference tables loaded"
        );

        Ok(Self {
            inner: Arc::new(AppStateInner { cfg, tables: Arc::new(tables) }),
            metrics: Arc::new(ServiceMetrics::default()),
        })
    }

    pub fn cfg(&self) -> &ServiceConfig {
        &self.inner.cfg
    }

    pub fn tables(&self) -> Arc<ReferenceTables> {
        Arc::clone(&self.inner.tables)
    }

    pub fn metrics(&self) -> Arc<ServiceMetrics> {
        Arc::clone(&self.metrics)
    }
}

//! Top-level facade crate for the HMPI service.
//!
//! Re-exports the engine and the HTTP gateway so users can depend on a single crate.

pub mod core {
    pub use hmpi_core::*;
}

pub mod gateway {
    pub use hmpi_gateway::*;
}

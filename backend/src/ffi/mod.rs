//! Python bindings (feature `pyo3`)
//!
//! Exposes the commission engine as the `CommissionEngine` Python class.

pub mod engine;
pub mod types;

//! Commission Engine Core - Rust Engine
//!
//! Computes sales commissions for the agents on a real-estate deal and
//! generates the ledger statements recording them.
//!
//! # Architecture
//!
//! - **core**: Clock abstraction and the per-run time snapshot
//! - **models**: Domain types (Agent, DealInput, CommissionSchema, CommissionPolicy, results)
//! - **catalog**: Reference data store (schemas, policies) and catalog validation
//! - **engine**: Matching, commission formula, run loop
//! - **statements**: Parameterized transaction/wallet statement generation
//! - **input**: Deal input gate for outer surfaces
//! - **report**: Plain-text result rendering
//!
//! # Critical Invariants
//!
//! 1. Lookups return the first qualifying catalog entry (catalog order is the tie-break)
//! 2. One clock read per run; all agents share timestamps and wallet buckets
//! 3. Two statements per matched agent, transaction before wallet
//! 4. A failing agent never aborts the agents after it

// Module declarations
pub mod catalog;
pub mod core;
pub mod engine;
pub mod input;
pub mod models;
pub mod report;
pub mod statements;

// Re-exports for convenience
pub use catalog::{CatalogError, InMemoryCatalog, ReferenceStore};
pub use core::clock::{Clock, FixedClock, RunClock, SystemClock};
pub use engine::{CommissionEngine, CommissionFigures, EngineConfig, EngineError};
pub use models::{
    Agent, AgentCalculation, CalculationResult, CommissionPolicy, CommissionSchema, DealInput,
};
pub use statements::{SqlValue, Statement};

// FFI module (when feature enabled)
#[cfg(feature = "pyo3")]
pub mod ffi;

// PyO3 exports (when feature enabled)
#[cfg(feature = "pyo3")]
use pyo3::prelude::*;

#[cfg(feature = "pyo3")]
#[pymodule]
fn commission_engine_core_rs(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<ffi::engine::PyCommissionEngine>()?;
    Ok(())
}

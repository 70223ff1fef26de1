//! Commission Engine
//!
//! Matches each agent of a deal against the active schema for its account
//! type and the policy band containing the unit price, derives the
//! commission figures and generates the two persistence statements.
//!
//! See `calculator.rs` for the run loop.

pub mod calculator;
pub mod config;
pub mod formula;

use thiserror::Error;

use crate::catalog::CatalogError;

pub use calculator::{AgentMatch, CommissionEngine};
pub use config::EngineConfig;
pub use formula::{CommissionFigures, PRICE_SCALE};

/// Fatal engine errors
///
/// Per-agent matching failures are not errors; they are reported in
/// `CalculationResult::validation_errors`.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

//! Reference Data Store
//!
//! Holds the commission schemas and policies the engine matches against.
//! The engine only ever reads through the [`ReferenceStore`] trait, so the
//! backing can be a database, a file, or an in-memory fixture.
//!
//! # Matching Contract
//!
//! Both lookups return the FIRST qualifying entry in catalog order. When
//! entries overlap (two active schemas for one account type, two bands
//! covering one price) the earlier entry wins. Overlaps are reported by
//! [`validate_catalog`] but never change lookup results.

pub mod memory;
pub mod validation;

use chrono::NaiveDate;
use thiserror::Error;

use crate::models::{CommissionPolicy, CommissionSchema};

pub use memory::InMemoryCatalog;
pub use validation::{validate_catalog, CatalogIssue, CatalogValidationResult};

/// Errors raised while loading or reading a catalog
///
/// A lookup that finds nothing is NOT an error; it returns `Ok(None)`.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Catalog I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Catalog decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Catalog unavailable: {0}")]
    Unavailable(String),

    #[error("Catalog failed validation with {} issue(s)", .0.len())]
    Invalid(Vec<CatalogIssue>),
}

/// Read-only point queries over the commission catalog
pub trait ReferenceStore {
    /// First schema for `account_type` that is active and effective on `as_of`
    fn find_active_schema(
        &self,
        account_type: &str,
        as_of: NaiveDate,
    ) -> Result<Option<CommissionSchema>, CatalogError>;

    /// First policy under `schema_id` of `policy_type` whose band contains `price`
    fn find_policy(
        &self,
        schema_id: &str,
        policy_type: &str,
        price: f64,
    ) -> Result<Option<CommissionPolicy>, CatalogError>;

    /// Identifier of the catalog snapshot backing this store, if known
    fn fingerprint(&self) -> Option<String> {
        None
    }
}

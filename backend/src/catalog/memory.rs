//! In-memory catalog
//!
//! Loaded from a JSON document of the form:
//!
//! ```json
//! {
//!   "schemas":  [{ "id": "schema1", "name": "Standard", "account_type": "standard",
//!                  "effective_from": "2024-01-01", "effective_to": "2024-12-31",
//!                  "is_active": true }],
//!   "policies": [{ "id": "policy1", "commission_schema_id": "schema1",
//!                  "min_price": 0, "max_price": 500000,
//!                  "policy_type": "quarter", "commission": 2.5 }]
//! }
//! ```
//!
//! Entry order in the document is the catalog order used for tie-breaks.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::warn;

use super::{CatalogError, ReferenceStore};
use crate::models::{CommissionPolicy, CommissionSchema};

/// Catalog held entirely in memory, in authoritative order
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use commission_engine_core_rs::catalog::{InMemoryCatalog, ReferenceStore};
///
/// let json = r#"{
///   "schemas": [{"id": "s1", "name": "Standard", "account_type": "standard",
///                "effective_from": "2024-01-01", "effective_to": "2024-12-31",
///                "is_active": true}],
///   "policies": [{"id": "p1", "commission_schema_id": "s1", "min_price": 0,
///                 "max_price": 500000, "policy_type": "quarter", "commission": 2.5}]
/// }"#;
/// let catalog = InMemoryCatalog::from_json_str(json).unwrap();
///
/// let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
/// let schema = catalog.find_active_schema("standard", today).unwrap().unwrap();
/// let policy = catalog.find_policy(&schema.id, "quarter", 500_000.0).unwrap();
/// assert_eq!(policy.unwrap().id, "p1");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InMemoryCatalog {
    #[serde(default)]
    schemas: Vec<CommissionSchema>,
    #[serde(default)]
    policies: Vec<CommissionPolicy>,
}

impl InMemoryCatalog {
    pub fn new(schemas: Vec<CommissionSchema>, policies: Vec<CommissionPolicy>) -> Self {
        Self { schemas, policies }
    }

    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Append a schema at the end of catalog order
    pub fn push_schema(&mut self, schema: CommissionSchema) {
        self.schemas.push(schema);
    }

    /// Append a policy at the end of catalog order
    pub fn push_policy(&mut self, policy: CommissionPolicy) {
        self.policies.push(policy);
    }

    pub fn schemas(&self) -> &[CommissionSchema] {
        &self.schemas
    }

    pub fn policies(&self) -> &[CommissionPolicy] {
        &self.policies
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty() && self.policies.is_empty()
    }

    /// SHA-256 of the catalog's JSON encoding, hex-encoded
    ///
    /// Serialization follows field and entry order, so two catalogs with the
    /// same entries in the same order share a fingerprint.
    pub fn compute_fingerprint(&self) -> Result<String, CatalogError> {
        let json = serde_json::to_string(self)?;

        let mut hasher = Sha256::new();
        hasher.update(json.as_bytes());
        let result = hasher.finalize();

        Ok(format!("{:x}", result))
    }
}

impl ReferenceStore for InMemoryCatalog {
    fn find_active_schema(
        &self,
        account_type: &str,
        as_of: NaiveDate,
    ) -> Result<Option<CommissionSchema>, CatalogError> {
        Ok(self
            .schemas
            .iter()
            .find(|schema| schema.matches(account_type, as_of))
            .cloned())
    }

    fn find_policy(
        &self,
        schema_id: &str,
        policy_type: &str,
        price: f64,
    ) -> Result<Option<CommissionPolicy>, CatalogError> {
        Ok(self
            .policies
            .iter()
            .find(|policy| policy.matches(schema_id, policy_type, price))
            .cloned())
    }

    fn fingerprint(&self) -> Option<String> {
        match self.compute_fingerprint() {
            Ok(fingerprint) => Some(fingerprint),
            Err(error) => {
                warn!(%error, "catalog fingerprint unavailable");
                None
            }
        }
    }
}

//! Engine configuration
//!
//! Every field has a default, so an empty JSON object is a valid config.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::EngineError;
use crate::models::POLICY_TYPE_QUARTER;

/// Commission engine configuration
///
/// # Example
/// ```
/// use commission_engine_core_rs::engine::EngineConfig;
///
/// let config: EngineConfig = serde_json::from_str(r#"{"wallets_table": "wallets_v2"}"#).unwrap();
/// assert_eq!(config.policy_type, "quarter");
/// assert_eq!(config.transactions_table, "deals_transactions");
/// assert_eq!(config.wallets_table, "wallets_v2");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Policy type matched for every agent
    pub policy_type: String,

    /// Target table of the transaction statement
    pub transactions_table: String,

    /// Target table of the wallet upsert statement
    pub wallets_table: String,

    /// Thousands separator used for price-like values in rendered statements
    pub grouping_separator: char,

    /// Reject catalogs that fail validation instead of logging the issues
    pub strict_catalog: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            policy_type: POLICY_TYPE_QUARTER.to_string(),
            transactions_table: "deals_transactions".to_string(),
            wallets_table: "agent_wallets".to_string(),
            grouping_separator: '_',
            strict_catalog: false,
        }
    }
}

impl EngineConfig {
    pub fn from_json_str(json: &str) -> Result<Self, EngineError> {
        serde_json::from_str(json).map_err(|e| EngineError::InvalidConfig(e.to_string()))
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let file = File::open(path.as_ref())
            .map_err(|e| EngineError::InvalidConfig(format!("{}: {}", path.as_ref().display(), e)))?;
        serde_json::from_reader(BufReader::new(file))
            .map_err(|e| EngineError::InvalidConfig(e.to_string()))
    }

    /// Reject values that would produce unusable statements
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.policy_type.trim().is_empty() {
            return Err(EngineError::InvalidConfig(
                "policy_type must not be empty".to_string(),
            ));
        }
        for (name, table) in [
            ("transactions_table", &self.transactions_table),
            ("wallets_table", &self.wallets_table),
        ] {
            let is_identifier = !table.is_empty()
                && table
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.');
            if !is_identifier {
                return Err(EngineError::InvalidConfig(format!(
                    "{} must be a plain SQL identifier, got {:?}",
                    name, table
                )));
            }
        }
        if self.grouping_separator.is_ascii_digit() {
            return Err(EngineError::InvalidConfig(
                "grouping_separator must not be a digit".to_string(),
            ));
        }
        Ok(())
    }
}

//! Agent model
//!
//! A sales agent attached to a deal. Agents are supplied per calculation
//! and never persisted by the engine.

use serde::{Deserialize, Serialize};

/// Sales agent taking part in a deal
///
/// `account_type` is an open category tag (e.g. "standard", "premium",
/// "enterprise") matched verbatim against schema account types.
///
/// # Example
/// ```
/// use commission_engine_core_rs::Agent;
///
/// let agent = Agent::new("A-1", "Dana Reyes", "standard", 10.0);
/// assert_eq!(agent.commission_fraction(), 0.1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    pub id: String,
    pub name: String,
    pub account_type: String,
    /// Individual commission rate as a percentage (0, 100]
    pub commission: f64,
}

impl Agent {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        account_type: impl Into<String>,
        commission: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            account_type: account_type.into(),
            commission,
        }
    }

    /// Commission rate as a fraction (`commission / 100`)
    pub fn commission_fraction(&self) -> f64 {
        self.commission / 100.0
    }
}

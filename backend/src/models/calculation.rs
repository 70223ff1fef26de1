//! Calculation output models

use serde::{Deserialize, Serialize};

use super::agent::Agent;
use super::schema::{CommissionPolicy, CommissionSchema};
use crate::statements::Statement;

/// Outcome for one successfully matched agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentCalculation {
    pub agent_info: Agent,
    pub matched_schema: CommissionSchema,
    pub matched_policy: CommissionPolicy,
    /// Matched policy rate (percentage)
    pub policy_percentage: f64,
    pub policy_amount: f64,
    /// Agent's own rate (percentage)
    pub crm_percentage: f64,
    pub net_profit: f64,
    pub unit_price: f64,
    /// Agent rate as a fraction, display only
    pub commission_percentage: f64,
    pub policy_factor: f64,
    pub factor: f64,
}

/// Aggregated result of a calculation run
///
/// `sql_queries` and `statements` hold the same statements in the same
/// order (transaction then wallet per matched agent): the former rendered
/// for display, the latter with placeholders and bound values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    pub agents: Vec<AgentCalculation>,
    pub sql_queries: Vec<String>,
    pub validation_errors: Vec<String>,
    #[serde(default)]
    pub statements: Vec<Statement>,
}

impl CalculationResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// True if no agent failed matching
    pub fn is_clean(&self) -> bool {
        self.validation_errors.is_empty()
    }
}

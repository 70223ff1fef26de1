//! Deal input model

use serde::{Deserialize, Serialize};

use super::agent::Agent;

/// A closed real-estate deal submitted for commission calculation
///
/// Agent order is preserved into every output list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DealInput {
    pub deal_id: String,
    /// Unit sale price (positive)
    pub unit_price: f64,
    pub project_id: String,
    pub developer_id: String,
    pub agents: Vec<Agent>,
}

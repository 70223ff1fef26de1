//! Deal input gate
//!
//! Checks a `DealInput` before it reaches the engine. The engine assumes a
//! well-formed deal; outer surfaces (CLI, Python binding) call
//! [`validate_deal`] first.

use thiserror::Error;

use crate::models::DealInput;

/// Reasons a deal input is rejected
#[derive(Debug, Error, PartialEq)]
pub enum InputError {
    #[error("Missing required field '{0}'")]
    MissingField(&'static str),

    #[error("Unit price must be a positive number, got {0}")]
    InvalidUnitPrice(String),

    #[error("A deal needs at least one agent")]
    NoAgents,

    #[error("Agent #{index} is missing required field '{field}'")]
    MissingAgentField { index: usize, field: &'static str },

    #[error("Agent {agent_id} commission must be between 0 and 100, got {commission}")]
    InvalidCommission { agent_id: String, commission: f64 },
}

/// Validate a deal for calculation
///
/// # Example
/// ```
/// use commission_engine_core_rs::input::{validate_deal, InputError};
/// use commission_engine_core_rs::{Agent, DealInput};
///
/// let mut deal = DealInput {
///     deal_id: "D-1".to_string(),
///     unit_price: 250_000.0,
///     project_id: "P-1".to_string(),
///     developer_id: "DEV-1".to_string(),
///     agents: vec![Agent::new("A-1", "Dana", "standard", 100.0)],
/// };
/// assert!(validate_deal(&deal).is_ok());
///
/// deal.agents[0].commission = 0.0;
/// assert!(matches!(validate_deal(&deal), Err(InputError::InvalidCommission { .. })));
/// ```
pub fn validate_deal(deal: &DealInput) -> Result<(), InputError> {
    for (field, value) in [
        ("deal_id", &deal.deal_id),
        ("project_id", &deal.project_id),
        ("developer_id", &deal.developer_id),
    ] {
        if value.trim().is_empty() {
            return Err(InputError::MissingField(field));
        }
    }

    if !(deal.unit_price.is_finite() && deal.unit_price > 0.0) {
        return Err(InputError::InvalidUnitPrice(deal.unit_price.to_string()));
    }

    if deal.agents.is_empty() {
        return Err(InputError::NoAgents);
    }

    for (index, agent) in deal.agents.iter().enumerate() {
        if agent.id.trim().is_empty() {
            return Err(InputError::MissingAgentField { index, field: "id" });
        }
        if agent.name.trim().is_empty() {
            return Err(InputError::MissingAgentField { index, field: "name" });
        }
        let in_range = agent.commission.is_finite()
            && agent.commission > 0.0
            && agent.commission <= 100.0;
        if !in_range {
            return Err(InputError::InvalidCommission {
                agent_id: agent.id.clone(),
                commission: agent.commission,
            });
        }
    }

    Ok(())
}

/// Parse a price typed by a person, accepting `,` and `_` as grouping
///
/// # Example
/// ```
/// use commission_engine_core_rs::input::parse_price;
///
/// assert_eq!(parse_price("1,500,000").unwrap(), 1_500_000.0);
/// assert_eq!(parse_price(" 300_000.50 ").unwrap(), 300_000.5);
/// assert!(parse_price("-5").is_err());
/// assert!(parse_price("abc").is_err());
/// ```
pub fn parse_price(text: &str) -> Result<f64, InputError> {
    let cleaned: String = text
        .trim()
        .chars()
        .filter(|c| *c != ',' && *c != '_')
        .collect();

    match cleaned.parse::<f64>() {
        Ok(price) if price.is_finite() && price > 0.0 => Ok(price),
        _ => Err(InputError::InvalidUnitPrice(text.trim().to_string())),
    }
}

//! Commission figures derived for a matched agent
//!
//! The formula is fixed:
//!
//! ```text
//! policy_factor         = policy.commission * agent.commission / 100
//! factor                = unit_price / 1_000_000
//! policy_amount         = policy_factor * factor
//! net_profit            = unit_price * (agent.commission / 100)
//! commission_percentage = agent.commission / 100
//! ```

use serde::{Deserialize, Serialize};

/// Divisor turning a unit price into the policy scaling factor
pub const PRICE_SCALE: f64 = 1_000_000.0;

/// Derived numbers for one agent
///
/// # Example
/// ```
/// use commission_engine_core_rs::engine::CommissionFigures;
///
/// let figures = CommissionFigures::derive(4.0, 5.0, 1_500_000.0);
/// assert_eq!(figures.policy_factor, 0.2);
/// assert_eq!(figures.factor, 1.5);
/// assert!((figures.policy_amount - 0.3).abs() < 1e-12);
/// assert_eq!(figures.net_profit, 75_000.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CommissionFigures {
    pub policy_factor: f64,
    pub factor: f64,
    pub policy_amount: f64,
    pub net_profit: f64,
    pub commission_percentage: f64,
}

impl CommissionFigures {
    /// # Arguments
    /// * `policy_commission` - Matched policy rate (percentage)
    /// * `agent_commission` - Agent's individual rate (percentage)
    /// * `unit_price` - Deal unit price
    pub fn derive(policy_commission: f64, agent_commission: f64, unit_price: f64) -> Self {
        let policy_factor = (policy_commission * agent_commission) / 100.0;
        let factor = unit_price / PRICE_SCALE;
        let policy_amount = policy_factor * factor;
        let net_profit = unit_price * (agent_commission / 100.0);

        Self {
            policy_factor,
            factor,
            policy_amount,
            net_profit,
            commission_percentage: agent_commission / 100.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_band_example() {
        let figures = CommissionFigures::derive(2.5, 10.0, 300_000.0);
        assert_eq!(figures.policy_factor, 0.25);
        assert_eq!(figures.factor, 0.3);
        assert!((figures.policy_amount - 0.075).abs() < 1e-12);
        assert_eq!(figures.net_profit, 30_000.0);
        assert_eq!(figures.commission_percentage, 0.1);
    }

    #[test]
    fn test_net_profit_ignores_policy_rate() {
        let low = CommissionFigures::derive(1.0, 10.0, 800_000.0);
        let high = CommissionFigures::derive(9.0, 10.0, 800_000.0);
        assert_eq!(low.net_profit, high.net_profit);
        assert!(high.policy_amount > low.policy_amount);
    }
}

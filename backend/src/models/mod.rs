//! Domain models for the commission engine

pub mod agent;
pub mod calculation;
pub mod deal;
pub mod schema;

// Re-exports
pub use agent::Agent;
pub use calculation::{AgentCalculation, CalculationResult};
pub use deal::DealInput;
pub use schema::{CommissionPolicy, CommissionSchema, POLICY_TYPE_QUARTER};

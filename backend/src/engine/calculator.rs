//! Commission calculation run
//!
//! ```text
//! capture run clock (once)
//! for each agent, in input order:
//!   1. active schema for (account_type, today)   -> else validation error, next
//!   2. policy for (schema, policy_type, price)   -> else validation error, next
//!   3. derive figures
//!   4. transaction statement, wallet statement
//!   5. record AgentCalculation
//! ```
//!
//! A failing agent never stops the agents after it. Only store faults
//! abort a run.
//!
//! # Example
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use commission_engine_core_rs::catalog::InMemoryCatalog;
//! use commission_engine_core_rs::core::clock::FixedClock;
//! use commission_engine_core_rs::engine::{CommissionEngine, EngineConfig};
//! use commission_engine_core_rs::{Agent, DealInput};
//!
//! let catalog = InMemoryCatalog::from_json_str(r#"{
//!   "schemas": [{"id": "s1", "name": "Standard", "account_type": "standard",
//!                "effective_from": "2024-01-01", "effective_to": "2024-12-31",
//!                "is_active": true}],
//!   "policies": [{"id": "p1", "commission_schema_id": "s1", "min_price": 0,
//!                 "max_price": 500000, "policy_type": "quarter", "commission": 2.5}]
//! }"#).unwrap();
//!
//! let engine = CommissionEngine::new(catalog, EngineConfig::default())
//!     .unwrap()
//!     .with_clock(FixedClock::new(Utc.with_ymd_and_hms(2024, 4, 10, 8, 0, 0).unwrap()));
//!
//! let deal = DealInput {
//!     deal_id: "D-100".to_string(),
//!     unit_price: 300_000.0,
//!     project_id: "PRJ-1".to_string(),
//!     developer_id: "DEV-1".to_string(),
//!     agents: vec![Agent::new("A-1", "Dana", "standard", 10.0)],
//! };
//!
//! let result = engine.calculate(&deal).unwrap();
//! assert_eq!(result.agents.len(), 1);
//! assert_eq!(result.sql_queries.len(), 2);
//! assert_eq!(result.agents[0].net_profit, 30_000.0);
//! ```

use chrono::NaiveDate;
use tracing::{debug, info, info_span, warn};
use uuid::Uuid;

use super::config::EngineConfig;
use super::formula::CommissionFigures;
use super::EngineError;
use crate::catalog::{validate_catalog, CatalogError, InMemoryCatalog, ReferenceStore};
use crate::core::clock::{Clock, RunClock, SystemClock};
use crate::models::{
    Agent, AgentCalculation, CalculationResult, CommissionPolicy, CommissionSchema, DealInput,
};
use crate::statements::format::format_number;
use crate::statements::{transaction_statement, wallet_statement, StatementInputs};

/// Outcome of matching one agent against the catalog
#[derive(Debug, Clone, PartialEq)]
pub enum AgentMatch {
    Matched {
        schema: CommissionSchema,
        policy: CommissionPolicy,
    },
    /// No active schema for the account type on the run date
    NoSchema,
    /// Schema found, but no policy band contains the unit price
    NoPolicy { schema: CommissionSchema },
}

/// Commission engine over a reference store
pub struct CommissionEngine<S: ReferenceStore> {
    store: S,
    config: EngineConfig,
    clock: Box<dyn Clock + Send + Sync>,
    /// Store fingerprint, read once at construction
    fingerprint: Option<String>,
}

impl<S: ReferenceStore> CommissionEngine<S> {
    /// Create an engine reading the wall clock
    ///
    /// # Errors
    /// `EngineError::InvalidConfig` if the config fails validation.
    pub fn new(store: S, config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        let fingerprint = store.fingerprint();
        Ok(Self {
            store,
            config,
            clock: Box::new(SystemClock),
            fingerprint,
        })
    }

    /// Replace the clock (e.g. a `FixedClock` for reproducible runs)
    pub fn with_clock(mut self, clock: impl Clock + Send + Sync + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Fingerprint of the catalog snapshot this engine was built over
    pub fn fingerprint(&self) -> Option<&str> {
        self.fingerprint.as_deref()
    }

    /// Run a calculation using the engine's clock
    pub fn calculate(&self, deal: &DealInput) -> Result<CalculationResult, EngineError> {
        self.calculate_at(deal, self.clock.as_ref())
    }

    /// Run a calculation reading `clock` exactly once
    ///
    /// # Errors
    /// Only store faults. Agents that fail matching are recorded in
    /// `validation_errors` and skipped.
    pub fn calculate_at(
        &self,
        deal: &DealInput,
        clock: &dyn Clock,
    ) -> Result<CalculationResult, EngineError> {
        let run = RunClock::capture(clock);
        let run_id = Uuid::new_v4();
        let span = info_span!("commission_run", %run_id, deal_id = %deal.deal_id);
        let _guard = span.enter();

        let mut result = CalculationResult::new();

        for agent in &deal.agents {
            match self.match_agent(agent, deal.unit_price, run.today())? {
                AgentMatch::Matched { schema, policy } => {
                    self.record_match(&mut result, deal, agent, schema, policy, &run);
                }
                AgentMatch::NoSchema => {
                    warn!(agent_id = %agent.id, account_type = %agent.account_type, "no active schema");
                    result.validation_errors.push(format!(
                        "No active schema found for agent {} ({}) with account type {}",
                        agent.name, agent.id, agent.account_type
                    ));
                }
                AgentMatch::NoPolicy { schema } => {
                    warn!(agent_id = %agent.id, schema_id = %schema.id, unit_price = deal.unit_price, "no matching policy");
                    result.validation_errors.push(format!(
                        "No matching policy found for agent {} ({}) with unit price {}",
                        agent.name,
                        agent.id,
                        format_number(deal.unit_price)
                    ));
                }
            }
        }

        info!(
            matched = result.agents.len(),
            failed = result.validation_errors.len(),
            catalog = self.fingerprint().unwrap_or("unknown"),
            "commission run complete"
        );

        Ok(result)
    }

    /// Schema then policy lookup for one agent
    pub fn match_agent(
        &self,
        agent: &Agent,
        unit_price: f64,
        as_of: NaiveDate,
    ) -> Result<AgentMatch, EngineError> {
        let schema = match self.store.find_active_schema(&agent.account_type, as_of)? {
            Some(schema) => schema,
            None => return Ok(AgentMatch::NoSchema),
        };
        debug!(agent_id = %agent.id, schema_id = %schema.id, "matched schema");

        match self
            .store
            .find_policy(&schema.id, &self.config.policy_type, unit_price)?
        {
            Some(policy) => {
                debug!(agent_id = %agent.id, policy_id = %policy.id, "matched policy");
                Ok(AgentMatch::Matched { schema, policy })
            }
            None => Ok(AgentMatch::NoPolicy { schema }),
        }
    }

    fn record_match(
        &self,
        result: &mut CalculationResult,
        deal: &DealInput,
        agent: &Agent,
        schema: CommissionSchema,
        policy: CommissionPolicy,
        run: &RunClock,
    ) {
        let figures = CommissionFigures::derive(policy.commission, agent.commission, deal.unit_price);

        let inputs = StatementInputs {
            deal,
            agent,
            schema: &schema,
            policy: &policy,
            figures: &figures,
            clock: run,
        };
        let statements = [
            transaction_statement(&self.config.transactions_table, &inputs),
            wallet_statement(&self.config.wallets_table, &inputs),
        ];
        for statement in statements {
            result
                .sql_queries
                .push(statement.render(self.config.grouping_separator));
            result.statements.push(statement);
        }

        result.agents.push(AgentCalculation {
            agent_info: agent.clone(),
            policy_percentage: policy.commission,
            policy_amount: figures.policy_amount,
            crm_percentage: agent.commission,
            net_profit: figures.net_profit,
            unit_price: deal.unit_price,
            commission_percentage: figures.commission_percentage,
            policy_factor: figures.policy_factor,
            factor: figures.factor,
            matched_schema: schema,
            matched_policy: policy,
        });
    }
}

impl CommissionEngine<InMemoryCatalog> {
    /// Create an engine over an in-memory catalog, validating it first
    ///
    /// Issues are logged as warnings; with `strict_catalog` they are fatal.
    pub fn from_catalog(catalog: InMemoryCatalog, config: EngineConfig) -> Result<Self, EngineError> {
        if let Err(issues) = validate_catalog(&catalog) {
            if config.strict_catalog {
                return Err(CatalogError::Invalid(issues).into());
            }
            for issue in &issues {
                warn!(%issue, "catalog issue");
            }
        }
        Self::new(catalog, config)
    }
}

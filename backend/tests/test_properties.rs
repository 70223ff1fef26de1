//! Property tests for commission runs
//!
//! Invariants:
//! - `sql_queries.len() == 2 * agents.len()`, `statements` mirrors `sql_queries`
//! - matched + failed agents == input agents, in input order
//! - Derived figures follow the fixed formula
//! - Bound money values are already rounded to cents
//! - Repeat runs under a frozen clock are identical

use chrono::{TimeZone, Utc};
use commission_engine_core_rs::catalog::InMemoryCatalog;
use commission_engine_core_rs::engine::{CommissionEngine, EngineConfig, PRICE_SCALE};
use commission_engine_core_rs::statements::format::{format_money, round_money};
use commission_engine_core_rs::statements::SqlValue;
use commission_engine_core_rs::{Agent, DealInput, FixedClock};
use proptest::prelude::*;

const CATALOG_JSON: &str = r#"{
  "schemas": [
    {"id": "schema1", "name": "Standard", "account_type": "standard",
     "effective_from": "2024-01-01", "effective_to": "2024-12-31", "is_active": true},
    {"id": "schema2", "name": "Premium", "account_type": "premium",
     "effective_from": "2024-01-01", "effective_to": "2024-12-31", "is_active": true},
    {"id": "schema3", "name": "Enterprise", "account_type": "enterprise",
     "effective_from": "2024-01-01", "effective_to": "2024-12-31", "is_active": true}
  ],
  "policies": [
    {"id": "policy1", "commission_schema_id": "schema1", "min_price": 0, "max_price": 500000,
     "policy_type": "quarter", "commission": 2.5},
    {"id": "policy2", "commission_schema_id": "schema1", "min_price": 500001, "max_price": 1000000,
     "policy_type": "quarter", "commission": 3.0},
    {"id": "policy3", "commission_schema_id": "schema2", "min_price": 0, "max_price": 1000000,
     "policy_type": "quarter", "commission": 3.5},
    {"id": "policy4", "commission_schema_id": "schema3", "min_price": 0, "max_price": 2000000,
     "policy_type": "quarter", "commission": 4.0}
  ]
}"#;

fn create_engine() -> CommissionEngine<InMemoryCatalog> {
    CommissionEngine::new(
        InMemoryCatalog::from_json_str(CATALOG_JSON).unwrap(),
        EngineConfig::default(),
    )
    .unwrap()
    .with_clock(FixedClock::new(Utc.with_ymd_and_hms(2024, 9, 30, 18, 0, 0).unwrap()))
}

fn agent_strategy() -> impl Strategy<Value = Agent> {
    (
        "[A-Z]{2}-[0-9]{1,3}",
        prop::sample::select(vec!["standard", "premium", "enterprise", "gold"]),
        0.01f64..=100.0,
    )
        .prop_map(|(id, account_type, commission)| {
            Agent::new(id.clone(), format!("Agent {}", id), account_type, commission)
        })
}

fn deal_strategy() -> impl Strategy<Value = DealInput> {
    (1.0f64..3_000_000.0, prop::collection::vec(agent_strategy(), 0..8)).prop_map(
        |(unit_price, agents)| DealInput {
            deal_id: "D-P".to_string(),
            unit_price,
            project_id: "P".to_string(),
            developer_id: "X".to_string(),
            agents,
        },
    )
}

proptest! {
    #[test]
    fn prop_two_statements_per_matched_agent(deal in deal_strategy()) {
        let result = create_engine().calculate(&deal).unwrap();

        prop_assert_eq!(result.sql_queries.len(), 2 * result.agents.len());
        prop_assert_eq!(result.statements.len(), result.sql_queries.len());
        prop_assert_eq!(
            result.agents.len() + result.validation_errors.len(),
            deal.agents.len()
        );
        for pair in result.sql_queries.chunks(2) {
            prop_assert!(pair[0].starts_with("INSERT INTO deals_transactions"));
            prop_assert!(pair[1].starts_with("INSERT INTO agent_wallets"));
        }
    }

    #[test]
    fn prop_matched_agents_keep_input_order(deal in deal_strategy()) {
        let result = create_engine().calculate(&deal).unwrap();

        // Matched agents form a subsequence of the input
        let mut input = deal.agents.iter();
        for calc in &result.agents {
            prop_assert!(input.any(|a| a == &calc.agent_info));
        }
    }

    #[test]
    fn prop_figures_follow_formula(deal in deal_strategy()) {
        let result = create_engine().calculate(&deal).unwrap();

        for calc in &result.agents {
            let agent = &calc.agent_info;
            let policy_factor = calc.matched_policy.commission * agent.commission / 100.0;
            let factor = deal.unit_price / PRICE_SCALE;

            prop_assert_eq!(calc.policy_factor, policy_factor);
            prop_assert_eq!(calc.factor, factor);
            prop_assert_eq!(calc.policy_amount, policy_factor * factor);
            prop_assert_eq!(calc.net_profit, deal.unit_price * (agent.commission / 100.0));
            prop_assert!(calc.matched_policy.covers(deal.unit_price));
            prop_assert_eq!(&calc.matched_schema.account_type, &agent.account_type);

            let rendered_net = format_money(calc.net_profit);
            prop_assert!(result.sql_queries.iter().any(|sql| sql.contains(&rendered_net)));
        }
    }

    #[test]
    fn prop_bound_money_is_whole_cents(deal in deal_strategy()) {
        let result = create_engine().calculate(&deal).unwrap();

        for statement in &result.statements {
            for param in &statement.params {
                if let SqlValue::Money(v) = param {
                    prop_assert_eq!(round_money(*v), *v);
                }
            }
        }
    }

    #[test]
    fn prop_frozen_clock_runs_identical(deal in deal_strategy()) {
        let engine = create_engine();
        let first = engine.calculate(&deal).unwrap();
        let second = engine.calculate(&deal).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_unknown_account_type_always_fails(unit_price in 1.0f64..3_000_000.0, count in 1usize..6) {
        let agents: Vec<Agent> = (0..count)
            .map(|i| Agent::new(format!("G-{}", i), format!("Gold {}", i), "gold", 10.0))
            .collect();
        let deal = DealInput {
            deal_id: "D".to_string(),
            unit_price,
            project_id: "P".to_string(),
            developer_id: "X".to_string(),
            agents,
        };

        let result = create_engine().calculate(&deal).unwrap();
        prop_assert!(result.agents.is_empty());
        prop_assert_eq!(result.validation_errors.len(), count);
        for (i, error) in result.validation_errors.iter().enumerate() {
            let expected = format!("No active schema found for agent Gold {} (G-{}) with account type gold", i, i);
            prop_assert_eq!(error, &expected);
        }
    }
}

//! The two persistence statements produced per matched agent
//!
//! Column lists and upsert semantics are a durable contract with the
//! ledger schema; do not reorder.

use super::builder::{InsertBuilder, SqlValue, Statement};
use super::format::round_money;
use crate::core::clock::RunClock;
use crate::engine::CommissionFigures;
use crate::models::{Agent, CommissionPolicy, CommissionSchema, DealInput};

/// Columns of the deal transaction insert, in order
pub const TRANSACTION_COLUMNS: [&str; 17] = [
    "agent_id",
    "deal_id",
    "unit_price",
    "commission_schema_id",
    "policy_id",
    "policy_percentage",
    "crm_percentage",
    "policy_amount",
    "account_type",
    "status",
    "action",
    "created_at",
    "updated_at",
    "deleted_at",
    "net_profit",
    "project_id",
    "developer_id",
];

/// Columns of the agent wallet upsert, in order
pub const WALLET_COLUMNS: [&str; 16] = [
    "agent_id",
    "month",
    "year",
    "quarter_number",
    "total",
    "amount",
    "policy_id",
    "commission_schema_id",
    "unit_prices",
    "net_profit",
    "latest",
    "paid",
    "remaining",
    "created_at",
    "updated_at",
    "deleted_at",
];

/// Wallet rows are unique per agent and calendar month
pub const WALLET_CONFLICT_KEYS: [&str; 3] = ["agent_id", "month", "year"];

/// Everything a statement needs to know about one matched agent
///
/// Money figures are bound already rounded to cents, so executing the
/// parameterized form persists the same amounts the rendered form shows.
#[derive(Debug, Clone, Copy)]
pub struct StatementInputs<'a> {
    pub deal: &'a DealInput,
    pub agent: &'a Agent,
    pub schema: &'a CommissionSchema,
    pub policy: &'a CommissionPolicy,
    pub figures: &'a CommissionFigures,
    pub clock: &'a RunClock,
}

/// Insert recording the calculated commission for one agent on one deal
pub fn transaction_statement(table: &str, inputs: &StatementInputs<'_>) -> Statement {
    let timestamp = inputs.clock.timestamp();

    InsertBuilder::new(table)
        .bind("agent_id", SqlValue::Text(inputs.agent.id.clone()))
        .bind("deal_id", SqlValue::Text(inputs.deal.deal_id.clone()))
        .bind("unit_price", SqlValue::Quantity(inputs.deal.unit_price))
        .bind("commission_schema_id", SqlValue::Text(inputs.schema.id.clone()))
        .bind("policy_id", SqlValue::Text(inputs.policy.id.clone()))
        .bind("policy_percentage", SqlValue::Number(inputs.policy.commission))
        .bind("crm_percentage", SqlValue::Number(inputs.agent.commission))
        .bind("policy_amount", SqlValue::Money(round_money(inputs.figures.policy_amount)))
        .bind("account_type", SqlValue::Text(inputs.agent.account_type.clone()))
        .literal("status", "'pending'")
        .literal("action", "'commission_calculated'")
        .bind("created_at", SqlValue::Timestamp(timestamp.clone()))
        .bind("updated_at", SqlValue::Timestamp(timestamp))
        .literal("deleted_at", "NULL")
        .bind("net_profit", SqlValue::Money(round_money(inputs.figures.net_profit)))
        .bind("project_id", SqlValue::Text(inputs.deal.project_id.clone()))
        .bind("developer_id", SqlValue::Text(inputs.deal.developer_id.clone()))
        .build()
}

/// Upsert folding this calculation into the agent's monthly wallet row
///
/// On conflict `total`, `amount`, `unit_prices` and `net_profit` are
/// incremented by this row's values and `updated_at` is refreshed.
/// `unit_prices` accumulates as a numeric sum, like `total`.
pub fn wallet_statement(table: &str, inputs: &StatementInputs<'_>) -> Statement {
    let timestamp = inputs.clock.timestamp();
    let unit_price = inputs.deal.unit_price;

    InsertBuilder::new(table)
        .bind("agent_id", SqlValue::Text(inputs.agent.id.clone()))
        .bind("month", SqlValue::Integer(i64::from(inputs.clock.month())))
        .bind("year", SqlValue::Integer(i64::from(inputs.clock.year())))
        .bind("quarter_number", SqlValue::Integer(i64::from(inputs.clock.quarter())))
        .bind("total", SqlValue::Quantity(unit_price))
        .bind("amount", SqlValue::Money(round_money(inputs.figures.policy_amount)))
        .bind("policy_id", SqlValue::Text(inputs.policy.id.clone()))
        .bind("commission_schema_id", SqlValue::Text(inputs.schema.id.clone()))
        .bind("unit_prices", SqlValue::Quantity(unit_price))
        .bind("net_profit", SqlValue::Money(round_money(inputs.figures.net_profit)))
        .literal("latest", "true")
        .literal("paid", "0")
        .literal("remaining", "0")
        .bind("created_at", SqlValue::Timestamp(timestamp.clone()))
        .bind("updated_at", SqlValue::Timestamp(timestamp))
        .literal("deleted_at", "NULL")
        .on_conflict(&WALLET_CONFLICT_KEYS)
        .increment("total")
        .increment("amount")
        .increment("unit_prices")
        .increment("net_profit")
        .replace("updated_at")
        .build()
}

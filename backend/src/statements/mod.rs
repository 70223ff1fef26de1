//! Persistence statement generation
//!
//! Statements are generated, never executed. Each matched agent yields a
//! deal-transaction insert followed by an agent-wallet upsert.

pub mod builder;
pub mod format;
pub mod templates;

pub use builder::{InsertBuilder, SqlValue, Statement};
pub use templates::{
    transaction_statement, wallet_statement, StatementInputs, TRANSACTION_COLUMNS,
    WALLET_COLUMNS, WALLET_CONFLICT_KEYS,
};

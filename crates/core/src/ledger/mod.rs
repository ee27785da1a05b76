//! Append-only balance ledger.
//!
//! The ledger is the single source of truth for how much a person can
//! withdraw from a project. Balances are mutated only through
//! transaction postings; each posting records the available balance
//! before and after, forming a strict chain per balance.

pub mod error;
pub mod posting;
pub mod store;
pub mod types;

#[cfg(test)]
mod store_props;

pub use error::LedgerError;
pub use posting::{PostingEffect, compute_effect};
pub use store::{BalanceLedger, BalanceTotals};
pub use types::{Balance, BalanceKey, BalanceTransaction, Reference, TransactionKind};

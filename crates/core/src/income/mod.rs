//! Gross income registration and deduction math.
//!
//! An income entry arrives as a VAT-inclusive gross amount. The
//! calculator extracts VAT, applies withholding, takes the TTO
//! commission, and leaves the distributable amount for academic staff.
//! Derived amounts are computed once at registration and stored
//! immutably; only `collected_amount` changes afterwards.

pub mod calculator;
pub mod error;
pub mod store;
pub mod types;

#[cfg(test)]
mod calculator_props;

pub use calculator::compute_income_amounts;
pub use error::IncomeError;
pub use store::IncomeStore;
pub use types::{Income, IncomeAmounts, IncomeType, RegisterIncomeInput};

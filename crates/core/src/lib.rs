//! Core business logic for Tahsis.
//!
//! This crate contains pure business logic with ZERO web dependencies.
//! All domain types, calculation rules, and the balance ledger live here.
//!
//! # Modules
//!
//! - `income` - Gross income registration, VAT/withholding/commission math
//! - `distribution` - Share-based allocation of distributable amounts
//! - `ledger` - Append-only per-person per-project balance ledger
//! - `payment` - Payment instructions drawing down available balances
//! - `project` - Project records and derived financial summaries

pub mod distribution;
pub mod income;
pub mod ledger;
pub mod payment;
pub mod project;

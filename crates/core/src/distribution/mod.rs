//! Income distribution allocation.
//!
//! Splits an income's distributable amount across project
//! representatives by share percentage and credits each recipient's
//! balance. The split must account for every cent: per-recipient
//! rounding residue is reconciled onto the project leader.

pub mod allocator;
pub mod error;
pub mod types;

#[cfg(test)]
mod allocator_props;

pub use allocator::{DistributionService, allocate};
pub use error::DistributionError;
pub use types::{Distribution, Representative, Role};

//! Payment error types.

use rust_decimal::Decimal;
use tahsis_shared::types::{InstructionId, Person};
use thiserror::Error;

use super::types::InstructionStatus;
use crate::ledger::LedgerError;

/// Errors that can occur while building or driving payment
/// instructions.
#[derive(Debug, Error)]
pub enum PaymentError {
    /// The payee has no IBAN on file; nothing is mutated.
    #[error("No IBAN on file for {0}")]
    MissingIban(Person),

    /// An instruction needs at least one item.
    #[error("Payment instruction requires at least one item")]
    NoItems,

    /// Every item amount must be positive.
    #[error("Item amount must be positive, got {0}")]
    NonPositiveItemAmount(Decimal),

    /// Instruction not found.
    #[error("Payment instruction not found: {0}")]
    InstructionNotFound(InstructionId),

    /// The requested status change is not on the lifecycle path.
    #[error("Invalid status transition: {from:?} -> {to:?}")]
    InvalidTransition {
        /// Current status.
        from: InstructionStatus,
        /// Requested status.
        to: InstructionStatus,
    },

    /// The balance posting backing the instruction failed.
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

impl PaymentError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::MissingIban(_) => "MISSING_IBAN",
            Self::NoItems => "NO_INSTRUCTION_ITEMS",
            Self::NonPositiveItemAmount(_) => "NON_POSITIVE_ITEM_AMOUNT",
            Self::InstructionNotFound(_) => "INSTRUCTION_NOT_FOUND",
            Self::InvalidTransition { .. } => "INVALID_STATUS_TRANSITION",
            Self::Ledger(err) => err.error_code(),
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            Self::MissingIban(_) => 422,
            Self::NoItems | Self::NonPositiveItemAmount(_) => 400,
            Self::InstructionNotFound(_) => 404,
            Self::InvalidTransition { .. } => 409,
            Self::Ledger(err) => err.http_status_code(),
        }
    }
}

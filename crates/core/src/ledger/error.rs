//! Ledger error types.

use rust_decimal::Decimal;
use tahsis_shared::types::BalanceId;
use thiserror::Error;

/// Errors that can occur during ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Posting amount must be positive for income, payment, and debt.
    #[error("Posting amount must be positive, got {0}")]
    NonPositiveAmount(Decimal),

    /// Adjustment amount must not be zero.
    #[error("Adjustment amount must not be zero")]
    ZeroAdjustment,

    /// Manual adjustments require a description for the audit trail.
    #[error("Adjustment requires a description")]
    AdjustmentRequiresDescription,

    /// Payment would overdraw the available balance.
    #[error("Insufficient balance: requested {requested}, available {available}")]
    InsufficientBalance {
        /// The requested draw-down amount.
        requested: Decimal,
        /// The available amount at posting time.
        available: Decimal,
    },

    /// A reservation release exceeds the currently reserved amount.
    #[error("Reservation underflow: requested {requested}, reserved {reserved}")]
    ReservationUnderflow {
        /// The requested release amount.
        requested: Decimal,
        /// The reserved amount at posting time.
        reserved: Decimal,
    },

    /// Balance not found.
    #[error("Balance not found: {0}")]
    BalanceNotFound(BalanceId),

    /// Concurrent posting conflict; the operation was not applied.
    #[error("Concurrent posting conflict, please retry")]
    ConcurrencyConflict,
}

impl LedgerError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NonPositiveAmount(_) => "NON_POSITIVE_AMOUNT",
            Self::ZeroAdjustment => "ZERO_ADJUSTMENT",
            Self::AdjustmentRequiresDescription => "ADJUSTMENT_REQUIRES_DESCRIPTION",
            Self::InsufficientBalance { .. } => "INSUFFICIENT_BALANCE",
            Self::ReservationUnderflow { .. } => "RESERVATION_UNDERFLOW",
            Self::BalanceNotFound(_) => "BALANCE_NOT_FOUND",
            Self::ConcurrencyConflict => "CONCURRENCY_CONFLICT",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            Self::NonPositiveAmount(_)
            | Self::ZeroAdjustment
            | Self::AdjustmentRequiresDescription => 400,
            Self::InsufficientBalance { .. } | Self::ReservationUnderflow { .. } => 422,
            Self::BalanceNotFound(_) => 404,
            Self::ConcurrencyConflict => 409,
        }
    }

    /// Returns true if this error is retryable.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::ConcurrencyConflict)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            LedgerError::NonPositiveAmount(dec!(0)).error_code(),
            "NON_POSITIVE_AMOUNT"
        );
        assert_eq!(
            LedgerError::InsufficientBalance {
                requested: dec!(6000),
                available: dec!(5000),
            }
            .error_code(),
            "INSUFFICIENT_BALANCE"
        );
        assert_eq!(
            LedgerError::ConcurrencyConflict.error_code(),
            "CONCURRENCY_CONFLICT"
        );
    }

    #[test]
    fn test_http_status_codes() {
        assert_eq!(LedgerError::ZeroAdjustment.http_status_code(), 400);
        assert_eq!(
            LedgerError::InsufficientBalance {
                requested: dec!(1),
                available: dec!(0),
            }
            .http_status_code(),
            422
        );
        assert_eq!(
            LedgerError::BalanceNotFound(BalanceId::new()).http_status_code(),
            404
        );
        assert_eq!(LedgerError::ConcurrencyConflict.http_status_code(), 409);
    }

    #[test]
    fn test_retryable() {
        assert!(LedgerError::ConcurrencyConflict.is_retryable());
        assert!(!LedgerError::ZeroAdjustment.is_retryable());
    }

    #[test]
    fn test_display() {
        let err = LedgerError::InsufficientBalance {
            requested: dec!(6000),
            available: dec!(5000),
        };
        assert_eq!(
            err.to_string(),
            "Insufficient balance: requested 6000, available 5000"
        );
    }
}

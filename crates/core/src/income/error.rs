//! Income error types.

use rust_decimal::Decimal;
use tahsis_shared::types::IncomeId;
use thiserror::Error;

/// Errors that can occur during income operations.
#[derive(Debug, Error)]
pub enum IncomeError {
    /// Gross amount must be positive.
    #[error("Gross amount must be positive, got {0}")]
    NonPositiveGrossAmount(Decimal),

    /// A percentage rate is outside the valid range.
    #[error("Rate '{name}' must be between 0 and 100, got {value}")]
    RateOutOfRange {
        /// Which rate was invalid.
        name: &'static str,
        /// The offending value.
        value: Decimal,
    },

    /// Collection amount must be positive.
    #[error("Collection amount must be positive, got {0}")]
    NonPositiveCollection(Decimal),

    /// Collection would exceed the outstanding amount.
    #[error("Collection of {requested} exceeds outstanding amount {outstanding}")]
    CollectionExceedsOutstanding {
        /// The requested collection amount.
        requested: Decimal,
        /// The remaining uncollected amount.
        outstanding: Decimal,
    },

    /// Income record not found.
    #[error("Income not found: {0}")]
    IncomeNotFound(IncomeId),
}

impl IncomeError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NonPositiveGrossAmount(_) => "NON_POSITIVE_GROSS_AMOUNT",
            Self::RateOutOfRange { .. } => "RATE_OUT_OF_RANGE",
            Self::NonPositiveCollection(_) => "NON_POSITIVE_COLLECTION",
            Self::CollectionExceedsOutstanding { .. } => "COLLECTION_EXCEEDS_OUTSTANDING",
            Self::IncomeNotFound(_) => "INCOME_NOT_FOUND",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            Self::NonPositiveGrossAmount(_)
            | Self::RateOutOfRange { .. }
            | Self::NonPositiveCollection(_) => 400,
            Self::CollectionExceedsOutstanding { .. } => 422,
            Self::IncomeNotFound(_) => 404,
        }
    }
}

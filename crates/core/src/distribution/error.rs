//! Distribution error types.

use rust_decimal::Decimal;
use tahsis_shared::types::IncomeId;
use thiserror::Error;

use crate::ledger::LedgerError;

/// Errors that can occur during income distribution.
#[derive(Debug, Error)]
pub enum DistributionError {
    /// At least one representative is required.
    #[error("Distribution requires at least one representative")]
    NoRepresentatives,

    /// Share percentages must sum to exactly 100.
    #[error("Share percentages must sum to 100, got {0}")]
    SharesMustSumTo100(Decimal),

    /// Exactly one representative must carry the leader role.
    #[error("Distribution requires exactly one project leader")]
    LeaderRequired,

    /// More than one representative carries the leader role.
    #[error("Distribution must not have more than one project leader")]
    MultipleLeaders,

    /// Every share percentage must be positive.
    #[error("Share percentage must be positive, got {0}")]
    NonPositiveShare(Decimal),

    /// The rounding residual exceeded the reconciliation tolerance.
    #[error("Allocation residual {residual} exceeds tolerance {tolerance}")]
    Reconciliation {
        /// The signed residual after per-recipient rounding.
        residual: Decimal,
        /// The accepted bound (one cent per recipient).
        tolerance: Decimal,
    },

    /// The income was already distributed.
    #[error("Income already distributed: {0}")]
    AlreadyDistributed(IncomeId),

    /// Crediting a recipient's balance failed.
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

impl DistributionError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NoRepresentatives => "NO_REPRESENTATIVES",
            Self::SharesMustSumTo100(_) => "SHARES_MUST_SUM_TO_100",
            Self::LeaderRequired => "LEADER_REQUIRED",
            Self::MultipleLeaders => "MULTIPLE_LEADERS",
            Self::NonPositiveShare(_) => "NON_POSITIVE_SHARE",
            Self::Reconciliation { .. } => "ALLOCATION_RECONCILIATION_FAILED",
            Self::AlreadyDistributed(_) => "INCOME_ALREADY_DISTRIBUTED",
            Self::Ledger(err) => err.error_code(),
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            Self::NoRepresentatives
            | Self::SharesMustSumTo100(_)
            | Self::LeaderRequired
            | Self::MultipleLeaders
            | Self::NonPositiveShare(_) => 400,
            Self::Reconciliation { .. } => 422,
            Self::AlreadyDistributed(_) => 409,
            Self::Ledger(err) => err.http_status_code(),
        }
    }
}

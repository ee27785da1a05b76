//! Pure posting effect computation.
//!
//! Given the current balance state and a posting, this module decides
//! how the available, debt, and reserved buckets change. Keeping this
//! logic free of locking and storage makes the balance policy directly
//! unit-testable.

use rust_decimal::Decimal;

use super::error::LedgerError;
use super::types::{Balance, TransactionKind};

/// The per-bucket deltas a posting applies to a balance.
///
/// `available_delta` is also the signed amount recorded on the
/// transaction row; the running before/after chain covers the
/// available bucket only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PostingEffect {
    /// Signed change to the available amount.
    pub available_delta: Decimal,
    /// Signed change to the debt amount.
    pub debt_delta: Decimal,
    /// Signed change to the reserved amount.
    pub reserved_delta: Decimal,
}

impl PostingEffect {
    /// An effect touching only the available bucket.
    #[must_use]
    pub const fn available_only(delta: Decimal) -> Self {
        Self {
            available_delta: delta,
            debt_delta: Decimal::ZERO,
            reserved_delta: Decimal::ZERO,
        }
    }
}

/// Computes the effect of a standard posting against `balance`.
///
/// Policy per kind:
/// - `Income`: available += amount.
/// - `Payment`: fails if amount exceeds available (no overdraft);
///   otherwise moves the amount from available into reserved until the
///   instruction settles or is rejected.
/// - `Debt`: records the full amount as debt; available absorbs only
///   what it can (never goes negative). Debt never blocks.
/// - `Adjustment`: signed delta applied directly to available.
///
/// # Errors
///
/// Returns `LedgerError` for non-positive amounts (income, payment,
/// debt), zero adjustments, or an overdrawing payment.
pub fn compute_effect(
    balance: &Balance,
    kind: TransactionKind,
    amount: Decimal,
) -> Result<PostingEffect, LedgerError> {
    match kind {
        TransactionKind::Income => {
            require_positive(amount)?;
            Ok(PostingEffect::available_only(amount))
        }
        TransactionKind::Payment => {
            require_positive(amount)?;
            if amount > balance.available_amount {
                return Err(LedgerError::InsufficientBalance {
                    requested: amount,
                    available: balance.available_amount,
                });
            }
            Ok(PostingEffect {
                available_delta: -amount,
                debt_delta: Decimal::ZERO,
                reserved_delta: amount,
            })
        }
        TransactionKind::Debt => {
            require_positive(amount)?;
            let covered = amount.min(balance.available_amount);
            Ok(PostingEffect {
                available_delta: -covered,
                debt_delta: amount,
                reserved_delta: Decimal::ZERO,
            })
        }
        TransactionKind::Adjustment => {
            if amount == Decimal::ZERO {
                return Err(LedgerError::ZeroAdjustment);
            }
            Ok(PostingEffect::available_only(amount))
        }
    }
}

/// Computes the effect of reversing a rejected payment instruction:
/// the held amount moves from reserved back to available.
///
/// # Errors
///
/// Returns `LedgerError::ReservationUnderflow` if the balance holds
/// less than `amount` in reserve.
pub fn reversal_effect(balance: &Balance, amount: Decimal) -> Result<PostingEffect, LedgerError> {
    require_positive(amount)?;
    require_reserved(balance, amount)?;
    Ok(PostingEffect {
        available_delta: amount,
        debt_delta: Decimal::ZERO,
        reserved_delta: -amount,
    })
}

/// Computes the effect of settling a completed payment instruction:
/// the reservation is released with no change to available (the funds
/// have left the system).
///
/// # Errors
///
/// Returns `LedgerError::ReservationUnderflow` if the balance holds
/// less than `amount` in reserve.
pub fn settlement_effect(balance: &Balance, amount: Decimal) -> Result<PostingEffect, LedgerError> {
    require_positive(amount)?;
    require_reserved(balance, amount)?;
    Ok(PostingEffect {
        available_delta: Decimal::ZERO,
        debt_delta: Decimal::ZERO,
        reserved_delta: -amount,
    })
}

fn require_positive(amount: Decimal) -> Result<(), LedgerError> {
    if amount <= Decimal::ZERO {
        return Err(LedgerError::NonPositiveAmount(amount));
    }
    Ok(())
}

fn require_reserved(balance: &Balance, amount: Decimal) -> Result<(), LedgerError> {
    if amount > balance.reserved_amount {
        return Err(LedgerError::ReservationUnderflow {
            requested: amount,
            reserved: balance.reserved_amount,
        });
    }
    Ok(())
}

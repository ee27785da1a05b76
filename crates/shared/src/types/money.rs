//! Money rounding helpers with decimal precision.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! All amounts are `rust_decimal::Decimal`; intermediate results keep
//! full precision and only final stored amounts are rounded.

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of fractional digits for stored monetary amounts.
pub const AMOUNT_SCALE: u32 = 2;

/// Rounds a final monetary amount to 2 decimal places.
///
/// Uses round-half-up (midpoint away from zero), the convention for
/// stored financial amounts in this system. Intermediate calculation
/// results must NOT be passed through this function; rounding happens
/// once, at the end of a calculation chain.
///
/// The result always carries exactly 2 fractional digits so stored and
/// serialized amounts have a uniform scale (`"90000.00"`, not
/// `"90000"`).
#[must_use]
pub fn round_amount(amount: Decimal) -> Decimal {
    let mut rounded =
        amount.round_dp_with_strategy(AMOUNT_SCALE, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(AMOUNT_SCALE);
    rounded
}

/// Returns true if the value is a valid percentage rate in `[0, 100]`.
#[must_use]
pub fn is_valid_rate(rate: Decimal) -> bool {
    rate >= Decimal::ZERO && rate <= Decimal::ONE_HUNDRED
}

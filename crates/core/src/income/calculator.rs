//! Tax and commission deduction chain.
//!
//! The gross amount is VAT-inclusive, so VAT is extracted with
//! `gross * rate / (100 + rate)` rather than added on top. All
//! intermediate results keep full decimal precision; only the final
//! stored amounts are rounded (half-up, 2 decimal places) to avoid
//! compounding rounding error through the chain.

use rust_decimal::Decimal;
use tahsis_shared::types::{is_valid_rate, round_amount};

use super::error::IncomeError;
use super::types::IncomeAmounts;

/// Computes all derived amounts for a gross income entry.
///
/// The chain, in order:
/// 1. `full_vat_amount = gross * vat_rate / (100 + vat_rate)`
/// 2. `withholding_tax_amount = full_vat * withholding_rate / 100` (if applicable)
/// 3. `paid_vat_amount = full_vat - withholding`
/// 4. `net_amount = gross - paid_vat`
/// 5. `company_amount = net * company_rate / 100`
/// 6. `distributable_amount = net - company`
///
/// This function is pure: identical inputs always yield identical
/// outputs, and nothing is persisted here.
///
/// # Errors
///
/// Returns `IncomeError::NonPositiveGrossAmount` if `gross_amount <= 0`,
/// or `IncomeError::RateOutOfRange` if any rate is outside `[0, 100]`.
pub fn compute_income_amounts(
    gross_amount: Decimal,
    vat_rate: Decimal,
    company_rate: Decimal,
    has_withholding_tax: bool,
    withholding_tax_rate: Decimal,
) -> Result<IncomeAmounts, IncomeError> {
    if gross_amount <= Decimal::ZERO {
        return Err(IncomeError::NonPositiveGrossAmount(gross_amount));
    }
    validate_rate("vat_rate", vat_rate)?;
    validate_rate("company_rate", company_rate)?;
    if has_withholding_tax {
        validate_rate("withholding_tax_rate", withholding_tax_rate)?;
    }

    let hundred = Decimal::ONE_HUNDRED;

    // VAT extracted from the VAT-inclusive gross
    let full_vat_amount = gross_amount * vat_rate / (hundred + vat_rate);

    let withholding_tax_amount = if has_withholding_tax {
        full_vat_amount * withholding_tax_rate / hundred
    } else {
        Decimal::ZERO
    };

    let paid_vat_amount = full_vat_amount - withholding_tax_amount;
    let net_amount = gross_amount - paid_vat_amount;
    let company_amount = net_amount * company_rate / hundred;
    let distributable_amount = net_amount - company_amount;

    Ok(IncomeAmounts {
        full_vat_amount: round_amount(full_vat_amount),
        withholding_tax_amount: round_amount(withholding_tax_amount),
        paid_vat_amount: round_amount(paid_vat_amount),
        net_amount: round_amount(net_amount),
        company_amount: round_amount(company_amount),
        distributable_amount: round_amount(distributable_amount),
    })
}

fn validate_rate(name: &'static str, value: Decimal) -> Result<(), IncomeError> {
    if is_valid_rate(value) {
        Ok(())
    } else {
        Err(IncomeError::RateOutOfRange { name, value })
    }
}

//! Property tests for the income deduction chain.

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::calculator::compute_income_amounts;

/// Strategy for positive gross amounts with 2 decimal places.
fn gross_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000_000i64).prop_map(|n| Decimal::new(n, 2))
}

/// Strategy for percentage rates in [0, 100] with 2 decimal places.
fn rate_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..=10_000i64).prop_map(|n| Decimal::new(n, 2))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// VAT plus net reconstructs the gross amount within a cent.
    #[test]
    fn prop_vat_plus_net_equals_gross(
        gross in gross_strategy(),
        vat_rate in rate_strategy(),
    ) {
        let amounts = compute_income_amounts(gross, vat_rate, dec!(0), false, dec!(0))
            .expect("valid inputs");

        let reconstructed = amounts.full_vat_amount + amounts.net_amount;
        let diff = (reconstructed - gross).abs();
        prop_assert!(
            diff <= dec!(0.01),
            "full_vat + net = {reconstructed} should equal gross {gross}"
        );
    }

    /// Deduction chain reconciles: net = company + distributable, exactly
    /// within rounding tolerance of the final amounts.
    #[test]
    fn prop_net_splits_into_company_and_distributable(
        gross in gross_strategy(),
        vat_rate in rate_strategy(),
        company_rate in rate_strategy(),
    ) {
        let amounts = compute_income_amounts(gross, vat_rate, company_rate, false, dec!(0))
            .expect("valid inputs");

        let recombined = amounts.company_amount + amounts.distributable_amount;
        let diff = (recombined - amounts.net_amount).abs();
        prop_assert!(diff <= dec!(0.01));
    }

    /// Withholding never exceeds the full VAT, and paid VAT is the rest.
    #[test]
    fn prop_withholding_bounded_by_vat(
        gross in gross_strategy(),
        vat_rate in rate_strategy(),
        withholding_rate in rate_strategy(),
    ) {
        let amounts = compute_income_amounts(gross, vat_rate, dec!(0), true, withholding_rate)
            .expect("valid inputs");

        prop_assert!(amounts.withholding_tax_amount >= Decimal::ZERO);
        prop_assert!(amounts.withholding_tax_amount <= amounts.full_vat_amount + dec!(0.01));
        let diff = (amounts.full_vat_amount
            - amounts.withholding_tax_amount
            - amounts.paid_vat_amount)
            .abs();
        prop_assert!(diff <= dec!(0.01));
    }

    /// The calculator is a pure function: replaying identical inputs
    /// yields identical output.
    #[test]
    fn prop_idempotent(
        gross in gross_strategy(),
        vat_rate in rate_strategy(),
        company_rate in rate_strategy(),
        withholding_rate in rate_strategy(),
        has_withholding in any::<bool>(),
    ) {
        let first = compute_income_amounts(
            gross, vat_rate, company_rate, has_withholding, withholding_rate,
        ).expect("valid inputs");
        let second = compute_income_amounts(
            gross, vat_rate, company_rate, has_withholding, withholding_rate,
        ).expect("valid inputs");

        prop_assert_eq!(first, second);
    }

    /// All derived amounts are non-negative and scaled to 2 decimals.
    #[test]
    fn prop_amounts_non_negative_and_scaled(
        gross in gross_strategy(),
        vat_rate in rate_strategy(),
        company_rate in rate_strategy(),
    ) {
        let amounts = compute_income_amounts(gross, vat_rate, company_rate, false, dec!(0))
            .expect("valid inputs");

        for amount in [
            amounts.full_vat_amount,
            amounts.withholding_tax_amount,
            amounts.paid_vat_amount,
            amounts.net_amount,
            amounts.company_amount,
            amounts.distributable_amount,
        ] {
            prop_assert!(amount >= Decimal::ZERO);
            prop_assert!(amount.scale() <= 2, "amount {amount} has scale > 2");
        }
    }
}

//! Property-based tests for share allocation.

use proptest::prelude::*;
use rust_decimal::Decimal;
use tahsis_shared::types::{IncomeId, Person, UserId, round_amount};

use super::allocator::allocate;
use super::types::{Representative, Role};

/// Generates share lists with 2 decimal places that sum to exactly
/// 100.00: random cut points in basis-of-100 cents, differenced into
/// positive parts.
fn shares_strategy() -> impl Strategy<Value = Vec<Decimal>> {
    prop::collection::btree_set(1u32..10_000, 1..8).prop_map(|cuts| {
        let mut bounds: Vec<u32> = cuts.into_iter().collect();
        bounds.push(10_000);
        let mut prev = 0u32;
        bounds
            .iter()
            .map(|&bound| {
                let part = bound - prev;
                prev = bound;
                Decimal::new(i64::from(part), 2)
            })
            .collect()
    })
}

fn distributable_strategy() -> impl Strategy<Value = Decimal> {
    // 0.01 .. 10_000_000.00
    (1i64..1_000_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

fn representatives(shares: &[Decimal]) -> Vec<Representative> {
    shares
        .iter()
        .enumerate()
        .map(|(i, &share)| Representative {
            person: Person::User(UserId::new()),
            role: if i == 0 { Role::Leader } else { Role::Researcher },
            share_percentage: share,
        })
        .collect()
}

proptest! {
    /// After reconciliation the allocated amounts sum to the
    /// distributable amount exactly, whatever the share split.
    #[test]
    fn prop_allocation_sums_exactly(
        shares in shares_strategy(),
        distributable in distributable_strategy(),
    ) {
        let reps = representatives(&shares);
        let distributions = allocate(IncomeId::new(), distributable, &reps)
            .expect("valid shares allocate");

        let total: Decimal = distributions.iter().map(|d| d.amount).sum();
        prop_assert_eq!(total, round_amount(distributable));
    }

    /// Non-leader amounts are the plainly rounded share; only the
    /// leader's amount may deviate, and by at most one cent per
    /// recipient.
    #[test]
    fn prop_only_leader_absorbs_residual(
        shares in shares_strategy(),
        distributable in distributable_strategy(),
    ) {
        let reps = representatives(&shares);
        let distributions = allocate(IncomeId::new(), distributable, &reps)
            .expect("valid shares allocate");
        let tolerance = Decimal::new(reps.len() as i64, 2);

        for dist in &distributions {
            let unreconciled =
                round_amount(distributable * dist.share_percentage / Decimal::ONE_HUNDRED);
            match dist.role {
                Role::Researcher => prop_assert_eq!(dist.amount, unreconciled),
                Role::Leader => {
                    prop_assert!((dist.amount - unreconciled).abs() <= tolerance);
                }
            }
        }
    }

    /// Allocation is deterministic: the same inputs produce the same
    /// amounts.
    #[test]
    fn prop_allocation_deterministic(
        shares in shares_strategy(),
        distributable in distributable_strategy(),
    ) {
        let reps = representatives(&shares);
        let first = allocate(IncomeId::new(), distributable, &reps)
            .expect("valid shares allocate");
        let second = allocate(IncomeId::new(), distributable, &reps)
            .expect("valid shares allocate");

        for (a, b) in first.iter().zip(second.iter()) {
            prop_assert_eq!(a.amount, b.amount);
        }
    }
}

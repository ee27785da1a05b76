//! Property-based tests for the balance ledger.

use proptest::prelude::*;
use rust_decimal::Decimal;
use tahsis_shared::types::{PageRequest, Person, ProjectId, UserId};

use super::store::BalanceLedger;
use super::types::{BalanceKey, Reference, TransactionKind};

/// One randomly generated posting attempt.
#[derive(Debug, Clone)]
enum Posting {
    Income(Decimal),
    Payment(Decimal),
    Debt(Decimal),
    Adjustment(Decimal),
}

fn amount_strategy() -> impl Strategy<Value = Decimal> {
    // Positive amounts up to 10_000.00 with 2 decimal places.
    (1i64..1_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

fn posting_strategy() -> impl Strategy<Value = Posting> {
    prop_oneof![
        amount_strategy().prop_map(Posting::Income),
        amount_strategy().prop_map(Posting::Payment),
        amount_strategy().prop_map(Posting::Debt),
        amount_strategy().prop_map(|a| Posting::Adjustment(-a)),
        amount_strategy().prop_map(Posting::Adjustment),
    ]
}

proptest! {
    /// The available balance always equals the sum of the signed
    /// transaction amounts in commit order, each row chains onto the
    /// previous one, and the version counts exactly the applied
    /// postings. Rejected postings leave no trace.
    #[test]
    fn prop_available_equals_signed_sum(postings in prop::collection::vec(posting_strategy(), 1..60)) {
        let ledger = BalanceLedger::new();
        let key = BalanceKey::project_scoped(Person::User(UserId::new()), ProjectId::new());

        let mut applied = 0i64;
        for posting in postings {
            let result = match posting {
                Posting::Income(amount) => {
                    ledger.post(key, TransactionKind::Income, amount, Reference::Manual, None)
                }
                Posting::Payment(amount) => {
                    ledger.post(key, TransactionKind::Payment, amount, Reference::Manual, None)
                }
                Posting::Debt(amount) => {
                    ledger.post(key, TransactionKind::Debt, amount, Reference::Manual, None)
                }
                Posting::Adjustment(amount) => ledger.post(
                    key,
                    TransactionKind::Adjustment,
                    amount,
                    Reference::Manual,
                    Some("Generated adjustment".to_string()),
                ),
            };
            if result.is_ok() {
                applied += 1;
            }
        }

        // The account is created on the first posting attempt even if
        // that posting is rejected.
        let balance = ledger.balance(key).expect("account created on first attempt");
        prop_assert_eq!(balance.version, applied);

        let history = ledger
            .history(balance.id, PageRequest { page: 1, per_page: 1000 })
            .expect("balance exists");
        prop_assert_eq!(history.meta.total as i64, applied);

        let mut running = Decimal::ZERO;
        for row in &history.data {
            prop_assert_eq!(row.balance_before, running);
            running += row.amount;
            prop_assert_eq!(row.balance_after, running);
        }
        prop_assert_eq!(balance.available_amount, running);
    }

    /// Payments never drive the available balance negative, whatever
    /// the posting order.
    #[test]
    fn prop_available_never_overdrawn(postings in prop::collection::vec(posting_strategy(), 1..60)) {
        let ledger = BalanceLedger::new();
        let key = BalanceKey::project_scoped(Person::User(UserId::new()), ProjectId::new());

        for posting in postings {
            match posting {
                Posting::Income(amount) => {
                    let _ = ledger.post(key, TransactionKind::Income, amount, Reference::Manual, None);
                }
                Posting::Payment(amount) => {
                    let _ = ledger.post(key, TransactionKind::Payment, amount, Reference::Manual, None);
                }
                // Debt and adjustments may legitimately take available
                // below zero; only payments are overdraft-guarded.
                Posting::Debt(_) | Posting::Adjustment(_) => {}
            }

            if let Some(balance) = ledger.balance(key) {
                prop_assert!(balance.available_amount >= Decimal::ZERO);
                prop_assert!(balance.reserved_amount >= Decimal::ZERO);
            }
        }
    }
}

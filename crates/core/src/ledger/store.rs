//! The balance ledger store.
//!
//! Postings to one balance key are serialized through a per-key mutex;
//! postings to different keys proceed in parallel. A failed posting
//! appends nothing.

use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;
use dashmap::DashMap;
use rust_decimal::Decimal;
use serde::Serialize;
use tahsis_shared::types::{
    BalanceId, BalanceTransactionId, PageRequest, PageResponse, Person, round_amount,
};
use tracing::debug;

use super::error::LedgerError;
use super::posting::{self, PostingEffect};
use super::types::{Balance, BalanceKey, BalanceTransaction, Reference, TransactionKind};

/// Default bound on lock acquisition attempts before surfacing a
/// concurrency conflict.
const DEFAULT_MAX_POST_ATTEMPTS: u32 = 3;

/// One balance account together with its append-only transaction log.
#[derive(Debug)]
struct Account {
    balance: Balance,
    transactions: Vec<BalanceTransaction>,
}

impl Account {
    fn new(key: BalanceKey) -> Self {
        Self {
            balance: Balance::new(key),
            transactions: Vec::new(),
        }
    }
}

/// Aggregated balance totals for a person across projects.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct BalanceTotals {
    /// Sum of available amounts.
    pub available_amount: Decimal,
    /// Sum of debt amounts.
    pub debt_amount: Decimal,
    /// Sum of reserved amounts.
    pub reserved_amount: Decimal,
}

/// The single source of truth for person×project balances.
///
/// Balances are created lazily on first posting and mutated only by
/// appending transactions.
#[derive(Debug, Default)]
pub struct BalanceLedger {
    accounts: DashMap<BalanceKey, Arc<Mutex<Account>>>,
    index: DashMap<BalanceId, BalanceKey>,
    max_post_attempts: u32,
}

impl BalanceLedger {
    /// Creates an empty ledger with the default retry bound.
    #[must_use]
    pub fn new() -> Self {
        Self::with_max_attempts(DEFAULT_MAX_POST_ATTEMPTS)
    }

    /// Creates an empty ledger with a custom lock-attempt bound.
    #[must_use]
    pub fn with_max_attempts(max_post_attempts: u32) -> Self {
        Self {
            accounts: DashMap::new(),
            index: DashMap::new(),
            max_post_attempts: max_post_attempts.max(1),
        }
    }

    /// Posts a standard transaction to the balance for `key`.
    ///
    /// The posting is atomic: either the balance is updated and the
    /// transaction appended, or neither happens.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError` for invalid amounts, overdrawing payments,
    /// adjustments without a description, or an unresolvable lock
    /// conflict.
    pub fn post(
        &self,
        key: BalanceKey,
        kind: TransactionKind,
        amount: Decimal,
        reference: Reference,
        description: Option<String>,
    ) -> Result<BalanceTransaction, LedgerError> {
        if kind == TransactionKind::Adjustment
            && description.as_deref().is_none_or(|d| d.trim().is_empty())
        {
            return Err(LedgerError::AdjustmentRequiresDescription);
        }

        // Ledger amounts are final 2dp values.
        let amount = round_amount(amount);
        self.apply(key, kind, reference, description, |balance| {
            posting::compute_effect(balance, kind, amount)
        })
    }

    /// Posts the compensating adjustment for a rejected payment
    /// instruction: the held amount moves from reserved back to
    /// available.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError` if the reservation does not cover `amount`.
    pub fn reverse_payment(
        &self,
        key: BalanceKey,
        amount: Decimal,
        reference: Reference,
        description: String,
    ) -> Result<BalanceTransaction, LedgerError> {
        let amount = round_amount(amount);
        self.apply(
            key,
            TransactionKind::Adjustment,
            reference,
            Some(description),
            |balance| posting::reversal_effect(balance, amount),
        )
    }

    /// Releases the reservation for a completed payment instruction.
    /// The available amount is unchanged; the row records the release.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError` if the reservation does not cover `amount`.
    pub fn settle_payment(
        &self,
        key: BalanceKey,
        amount: Decimal,
        reference: Reference,
        description: String,
    ) -> Result<BalanceTransaction, LedgerError> {
        let amount = round_amount(amount);
        self.apply(
            key,
            TransactionKind::Adjustment,
            reference,
            Some(description),
            |balance| posting::settlement_effect(balance, amount),
        )
    }

    /// Returns the balance for a key, if one has been created.
    #[must_use]
    pub fn balance(&self, key: BalanceKey) -> Option<Balance> {
        let cell = self.accounts.get(&key)?.clone();
        let guard = self.lock_account(&cell).ok()?;
        Some(guard.balance.clone())
    }

    /// Returns the balance with the given ID.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::BalanceNotFound` if no such balance exists.
    pub fn balance_by_id(&self, balance_id: BalanceId) -> Result<Balance, LedgerError> {
        let key = *self
            .index
            .get(&balance_id)
            .ok_or(LedgerError::BalanceNotFound(balance_id))?;
        self.balance(key)
            .ok_or(LedgerError::BalanceNotFound(balance_id))
    }

    /// Aggregates a person's balances across all projects (including
    /// the project-independent account, if any).
    #[must_use]
    pub fn aggregate(&self, person: Person) -> BalanceTotals {
        let mut totals = BalanceTotals {
            available_amount: Decimal::ZERO,
            debt_amount: Decimal::ZERO,
            reserved_amount: Decimal::ZERO,
        };

        for entry in &self.accounts {
            if entry.key().person != person {
                continue;
            }
            let cell = entry.value().clone();
            if let Ok(guard) = self.lock_account(&cell) {
                totals.available_amount += guard.balance.available_amount;
                totals.debt_amount += guard.balance.debt_amount;
                totals.reserved_amount += guard.balance.reserved_amount;
            }
        }

        totals
    }

    /// Returns one page of a balance's transaction history, ordered by
    /// commit order (which matches `created_at`).
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::BalanceNotFound` if no such balance exists.
    pub fn history(
        &self,
        balance_id: BalanceId,
        page: PageRequest,
    ) -> Result<PageResponse<BalanceTransaction>, LedgerError> {
        let key = *self
            .index
            .get(&balance_id)
            .ok_or(LedgerError::BalanceNotFound(balance_id))?;
        let cell = self
            .accounts
            .get(&key)
            .ok_or(LedgerError::BalanceNotFound(balance_id))?
            .clone();
        let guard = self
            .lock_account(&cell)
            .map_err(|_| LedgerError::ConcurrencyConflict)?;

        let total = guard.transactions.len() as u64;
        let data: Vec<BalanceTransaction> = guard
            .transactions
            .iter()
            .skip(page.offset())
            .take(page.limit())
            .cloned()
            .collect();

        Ok(PageResponse::new(data, page.page, page.per_page, total))
    }

    fn apply<F>(
        &self,
        key: BalanceKey,
        kind: TransactionKind,
        reference: Reference,
        description: Option<String>,
        build_effect: F,
    ) -> Result<BalanceTransaction, LedgerError>
    where
        F: FnOnce(&Balance) -> Result<PostingEffect, LedgerError>,
    {
        let cell = self.account_cell(key);
        let mut guard = self
            .lock_account(&cell)
            .map_err(|_| LedgerError::ConcurrencyConflict)?;

        // Nothing below this point may fail after the balance is
        // touched; compute first, then mutate.
        let effect = build_effect(&guard.balance)?;

        let now = Utc::now();
        let balance_before = guard.balance.available_amount;
        let balance_after = round_amount(balance_before + effect.available_delta);

        guard.balance.available_amount = balance_after;
        guard.balance.debt_amount = round_amount(guard.balance.debt_amount + effect.debt_delta);
        guard.balance.reserved_amount =
            round_amount(guard.balance.reserved_amount + effect.reserved_delta);
        guard.balance.version += 1;
        guard.balance.last_updated = now;

        let transaction = BalanceTransaction {
            id: BalanceTransactionId::new(),
            balance_id: guard.balance.id,
            kind,
            amount: effect.available_delta,
            balance_before,
            balance_after,
            reference,
            description,
            created_at: now,
        };
        guard.transactions.push(transaction.clone());

        debug!(
            balance_id = %transaction.balance_id,
            kind = ?kind,
            amount = %transaction.amount,
            balance_after = %balance_after,
            "Transaction posted"
        );

        Ok(transaction)
    }

    /// Fetches or lazily creates the account cell for a key.
    fn account_cell(&self, key: BalanceKey) -> Arc<Mutex<Account>> {
        match self.accounts.entry(key) {
            dashmap::Entry::Occupied(entry) => entry.get().clone(),
            dashmap::Entry::Vacant(entry) => {
                let account = Account::new(key);
                self.index.insert(account.balance.id, key);
                entry.insert(Arc::new(Mutex::new(account))).clone()
            }
        }
    }

    /// Acquires the account lock with a bounded number of attempts.
    ///
    /// A poisoned lock means a posting panicked mid-flight; the balance
    /// state is still consistent (mutation happens only after effect
    /// computation succeeds), but the conflict is surfaced rather than
    /// silently recovered beyond the configured attempts.
    fn lock_account<'a>(
        &self,
        cell: &'a Mutex<Account>,
    ) -> Result<MutexGuard<'a, Account>, LedgerError> {
        for _ in 0..self.max_post_attempts {
            match cell.lock() {
                Ok(guard) => return Ok(guard),
                Err(poisoned) => drop(poisoned),
            }
        }
        Err(LedgerError::ConcurrencyConflict)
    }
}

//! Ledger domain types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tahsis_shared::types::{
    BalanceId, BalanceTransactionId, IncomeId, InstructionId, Person, ProjectId, round_amount,
};

/// Identifies one balance account: a person within a project, or a
/// person's project-independent account when `project` is `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BalanceKey {
    /// The balance owner.
    pub person: Person,
    /// The project scope; `None` for a cross-project account.
    pub project: Option<ProjectId>,
}

impl BalanceKey {
    /// Creates a project-scoped balance key.
    #[must_use]
    pub const fn project_scoped(person: Person, project: ProjectId) -> Self {
        Self {
            person,
            project: Some(project),
        }
    }

    /// Creates a project-independent balance key.
    #[must_use]
    pub const fn global(person: Person) -> Self {
        Self {
            person,
            project: None,
        }
    }
}

/// Classification of a balance transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Distribution share credited from a registered income.
    Income,
    /// Draw-down for a payment instruction.
    Payment,
    /// Debt recorded against the person.
    Debt,
    /// Manual or compensating adjustment.
    Adjustment,
}

/// Polymorphic link from a transaction to the record that caused it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type", content = "id")]
pub enum Reference {
    /// A registered income entry.
    Income(IncomeId),
    /// A payment instruction.
    Instruction(InstructionId),
    /// A manual operation with no backing record.
    Manual,
}

/// A balance account for one [`BalanceKey`].
///
/// Created lazily on the first posting and mutated only through
/// transaction postings. Never hard-deleted.
#[derive(Debug, Clone, Serialize)]
pub struct Balance {
    /// Unique identifier.
    pub id: BalanceId,
    /// The (person, project) pair this balance belongs to.
    pub key: BalanceKey,
    /// Amount the person can currently withdraw.
    pub available_amount: Decimal,
    /// Recorded debt; informational, never blocks postings.
    pub debt_amount: Decimal,
    /// Amount held for payment instructions not yet settled.
    pub reserved_amount: Decimal,
    /// Number of postings applied; increases by exactly 1 per posting.
    pub version: i64,
    /// Timestamp of the most recent posting.
    pub last_updated: DateTime<Utc>,
}

impl Balance {
    /// Creates an empty balance for a key.
    #[must_use]
    pub fn new(key: BalanceKey) -> Self {
        // Zeroes at amount scale so serialized balances read "0.00".
        let zero = round_amount(Decimal::ZERO);
        Self {
            id: BalanceId::new(),
            key,
            available_amount: zero,
            debt_amount: zero,
            reserved_amount: zero,
            version: 0,
            last_updated: Utc::now(),
        }
    }
}

/// One immutable entry in the append-only ledger.
#[derive(Debug, Clone, Serialize)]
pub struct BalanceTransaction {
    /// Unique identifier.
    pub id: BalanceTransactionId,
    /// The balance this transaction belongs to.
    pub balance_id: BalanceId,
    /// Transaction classification.
    pub kind: TransactionKind,
    /// Signed effect on the available amount.
    pub amount: Decimal,
    /// Available amount before this posting.
    pub balance_before: Decimal,
    /// Available amount after this posting.
    pub balance_after: Decimal,
    /// Link to the causing record.
    pub reference: Reference,
    /// Human-readable description; mandatory for adjustments.
    pub description: Option<String>,
    /// Posting timestamp; history is ordered by this (commit order).
    pub created_at: DateTime<Utc>,
}

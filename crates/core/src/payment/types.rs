//! Payment instruction domain types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tahsis_shared::types::{DistributionId, InstructionId, Person, ProjectId};

/// Where a payout item's amount comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type", content = "id")]
pub enum ItemSource {
    /// An allocated income distribution.
    Distribution(DistributionId),
    /// A manually entered payout.
    Manual,
}

/// One payout line on an instruction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstructionItem {
    /// The record backing this payout.
    pub source: ItemSource,
    /// Payout amount (must be positive).
    pub amount: Decimal,
    /// Free-form line description.
    pub description: Option<String>,
}

/// Lifecycle state of a payment instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstructionStatus {
    /// Created, awaiting approval.
    Pending,
    /// Approved for processing.
    Approved,
    /// Handed over to the bank.
    Processing,
    /// Funds left the system; terminal.
    Completed,
    /// Rejected before processing; terminal, funds restored.
    Rejected,
}

impl InstructionStatus {
    /// Returns true if this status permits a transition to `to`.
    ///
    /// The forward path is pending → approved → processing → completed;
    /// rejection is possible from pending or approved only.
    #[must_use]
    pub const fn can_transition_to(self, to: Self) -> bool {
        matches!(
            (self, to),
            (Self::Pending, Self::Approved)
                | (Self::Approved, Self::Processing)
                | (Self::Processing, Self::Completed)
                | (Self::Pending | Self::Approved, Self::Rejected)
        )
    }

    /// Returns true for terminal states.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Rejected)
    }
}

/// Input for creating a payment instruction.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateInstructionInput {
    /// The person being paid.
    pub payee: Person,
    /// The project whose balance funds the payout.
    pub project_id: ProjectId,
    /// Payout lines; at least one, all positive.
    pub items: Vec<InstructionItem>,
}

/// A numbered payment instruction.
#[derive(Debug, Clone, Serialize)]
pub struct PaymentInstruction {
    /// Unique identifier.
    pub id: InstructionId,
    /// Human-readable instruction number, unique per year.
    pub number: String,
    /// The person being paid.
    pub payee: Person,
    /// The project whose balance funds the payout.
    pub project_id: ProjectId,
    /// The payee's IBAN at creation time.
    pub iban: String,
    /// Payout lines.
    pub items: Vec<InstructionItem>,
    /// Sum of the item amounts.
    pub total_amount: Decimal,
    /// Current lifecycle state.
    pub status: InstructionStatus,
    /// Reason recorded on rejection.
    pub status_reason: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Timestamp of the last status change.
    pub updated_at: DateTime<Utc>,
}

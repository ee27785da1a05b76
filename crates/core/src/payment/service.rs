//! Payment instruction lifecycle service.

use std::sync::Arc;

use chrono::{Datelike, Utc};
use dashmap::DashMap;
use rust_decimal::Decimal;
use tahsis_shared::types::{InstructionId, Person};
use tracing::{error, info};

use super::error::PaymentError;
use super::numbering::InstructionNumberer;
use super::types::{CreateInstructionInput, InstructionStatus, PaymentInstruction};
use crate::ledger::{BalanceKey, BalanceLedger, Reference, TransactionKind};

/// Builds payment instructions and drives their status lifecycle.
///
/// Instruction creation and the backing `payment` posting form one
/// all-or-nothing unit: if anything fails after the posting, the
/// posting is reversed and no instruction is stored.
#[derive(Debug)]
pub struct PaymentService {
    ledger: Arc<BalanceLedger>,
    numberer: InstructionNumberer,
    instructions: DashMap<InstructionId, PaymentInstruction>,
}

impl PaymentService {
    /// Creates a service drawing funds through `ledger` and numbering
    /// instructions with `prefix`.
    #[must_use]
    pub fn new(ledger: Arc<BalanceLedger>, prefix: impl Into<String>) -> Self {
        Self {
            ledger,
            numberer: InstructionNumberer::new(prefix),
            instructions: DashMap::new(),
        }
    }

    /// Creates a payment instruction for the payee.
    ///
    /// `iban_lookup` resolves the payee's IBAN; a payee without one is
    /// rejected before anything is mutated. The total of all items is
    /// drawn down from the payee's (person, project) balance, which
    /// enforces total ≤ available.
    ///
    /// # Errors
    ///
    /// Returns `PaymentError` for an empty or invalid item list, a
    /// missing IBAN, or a failed balance posting.
    pub fn create_instruction<L>(
        &self,
        input: CreateInstructionInput,
        iban_lookup: L,
    ) -> Result<PaymentInstruction, PaymentError>
    where
        L: Fn(Person) -> Option<String>,
    {
        self.create_with_hook(input, iban_lookup, || Ok(()))
    }

    /// Creation body with a fault-injection point between the balance
    /// posting and the instruction insert, used to verify rollback.
    fn create_with_hook<L, H>(
        &self,
        input: CreateInstructionInput,
        iban_lookup: L,
        after_post: H,
    ) -> Result<PaymentInstruction, PaymentError>
    where
        L: Fn(Person) -> Option<String>,
        H: FnOnce() -> Result<(), PaymentError>,
    {
        if input.items.is_empty() {
            return Err(PaymentError::NoItems);
        }
        for item in &input.items {
            if item.amount <= Decimal::ZERO {
                return Err(PaymentError::NonPositiveItemAmount(item.amount));
            }
        }

        let iban = iban_lookup(input.payee)
            .filter(|iban| !iban.trim().is_empty())
            .ok_or(PaymentError::MissingIban(input.payee))?;

        let id = InstructionId::new();
        let key = BalanceKey::project_scoped(input.payee, input.project_id);
        let total_amount: Decimal = input.items.iter().map(|item| item.amount).sum();

        self.ledger.post(
            key,
            TransactionKind::Payment,
            total_amount,
            Reference::Instruction(id),
            None,
        )?;

        if let Err(err) = after_post() {
            self.roll_back_draw_down(key, total_amount, id);
            return Err(err);
        }

        let now = Utc::now();
        let instruction = PaymentInstruction {
            id,
            number: self.numberer.next(now.year()),
            payee: input.payee,
            project_id: input.project_id,
            iban,
            items: input.items,
            total_amount,
            status: InstructionStatus::Pending,
            status_reason: None,
            created_at: now,
            updated_at: now,
        };

        info!(
            instruction_id = %instruction.id,
            number = %instruction.number,
            payee = %instruction.payee,
            total = %instruction.total_amount,
            "Payment instruction created"
        );

        self.instructions.insert(id, instruction.clone());
        Ok(instruction)
    }

    /// Moves an instruction to a new status.
    ///
    /// Rejection posts a compensating adjustment restoring the payee's
    /// available balance; completion settles the reservation without
    /// touching available.
    ///
    /// # Errors
    ///
    /// Returns `PaymentError` if the instruction does not exist, the
    /// transition is off the lifecycle path, or a ledger posting fails.
    pub fn transition(
        &self,
        id: InstructionId,
        to: InstructionStatus,
        reason: Option<String>,
    ) -> Result<PaymentInstruction, PaymentError> {
        let mut entry = self
            .instructions
            .get_mut(&id)
            .ok_or(PaymentError::InstructionNotFound(id))?;

        if !entry.status.can_transition_to(to) {
            return Err(PaymentError::InvalidTransition {
                from: entry.status,
                to,
            });
        }

        let key = BalanceKey::project_scoped(entry.payee, entry.project_id);
        match to {
            InstructionStatus::Rejected => {
                self.ledger.reverse_payment(
                    key,
                    entry.total_amount,
                    Reference::Instruction(id),
                    format!("Reversal of rejected instruction {}", entry.number),
                )?;
                entry.status_reason = reason;
            }
            InstructionStatus::Completed => {
                self.ledger.settle_payment(
                    key,
                    entry.total_amount,
                    Reference::Instruction(id),
                    format!("Settlement of completed instruction {}", entry.number),
                )?;
            }
            _ => {}
        }

        let from = entry.status;
        entry.status = to;
        entry.updated_at = Utc::now();

        info!(
            instruction_id = %id,
            from = ?from,
            to = ?to,
            "Instruction status changed"
        );

        Ok(entry.clone())
    }

    /// Looks up an instruction by ID.
    ///
    /// # Errors
    ///
    /// Returns `PaymentError::InstructionNotFound` if no such
    /// instruction exists.
    pub fn get(&self, id: InstructionId) -> Result<PaymentInstruction, PaymentError> {
        self.instructions
            .get(&id)
            .map(|entry| entry.clone())
            .ok_or(PaymentError::InstructionNotFound(id))
    }

    /// Reverses a draw-down after a failure between posting and
    /// instruction insert.
    fn roll_back_draw_down(&self, key: BalanceKey, amount: Decimal, id: InstructionId) {
        if let Err(err) = self.ledger.reverse_payment(
            key,
            amount,
            Reference::Instruction(id),
            "Rollback of failed instruction creation".to_string(),
        ) {
            error!(
                instruction_id = %id,
                error = %err,
                "Failed to roll back draw-down"
            );
        }
    }
}

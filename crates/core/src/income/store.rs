//! In-memory income store with collection tracking.

use chrono::Utc;
use dashmap::DashMap;
use rust_decimal::Decimal;
use tahsis_shared::types::{IncomeId, ProjectId};
use tracing::info;

use crate::project::Project;

use super::calculator::compute_income_amounts;
use super::error::IncomeError;
use super::types::{Income, RegisterIncomeInput};

/// Thread-safe store of income entries.
///
/// Derived amounts are computed exactly once at registration using the
/// project's rates and are never recomputed afterwards; only
/// `collected_amount` is mutated, through [`IncomeStore::record_collection`].
#[derive(Debug, Default)]
pub struct IncomeStore {
    incomes: DashMap<IncomeId, Income>,
}

impl IncomeStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new income entry against `project`.
    ///
    /// The income's VAT rate comes from the request (invoices may carry
    /// a different rate than the project default); commission and
    /// withholding settings come from the project.
    ///
    /// # Errors
    ///
    /// Returns `IncomeError` if the gross amount or any rate is invalid.
    pub fn register(
        &self,
        project: &Project,
        input: RegisterIncomeInput,
    ) -> Result<Income, IncomeError> {
        let amounts = compute_income_amounts(
            input.gross_amount,
            input.vat_rate,
            project.company_rate,
            project.has_withholding_tax,
            project.withholding_tax_rate,
        )?;

        let income = Income {
            id: IncomeId::new(),
            project_id: input.project_id,
            gross_amount: input.gross_amount,
            vat_rate: input.vat_rate,
            income_date: input.income_date,
            is_fsmh_income: input.is_fsmh_income,
            income_type: input.income_type,
            is_tto_income: input.is_tto_income,
            description: input.description,
            amounts,
            collected_amount: Decimal::ZERO,
            created_at: Utc::now(),
        };

        info!(
            income_id = %income.id,
            project_id = %income.project_id,
            gross = %income.gross_amount,
            distributable = %amounts.distributable_amount,
            "Income registered"
        );

        self.incomes.insert(income.id, income.clone());
        Ok(income)
    }

    /// Records a collection against an income entry.
    ///
    /// The invariant `collected_amount <= gross_amount` is enforced
    /// here; a collection that would breach it is rejected without
    /// mutating the record.
    ///
    /// # Errors
    ///
    /// Returns `IncomeError` if the income does not exist, the amount is
    /// not positive, or the collection exceeds the outstanding amount.
    pub fn record_collection(
        &self,
        income_id: IncomeId,
        amount: Decimal,
    ) -> Result<Income, IncomeError> {
        if amount <= Decimal::ZERO {
            return Err(IncomeError::NonPositiveCollection(amount));
        }

        let mut entry = self
            .incomes
            .get_mut(&income_id)
            .ok_or(IncomeError::IncomeNotFound(income_id))?;

        let outstanding = entry.outstanding();
        if amount > outstanding {
            return Err(IncomeError::CollectionExceedsOutstanding {
                requested: amount,
                outstanding,
            });
        }

        entry.collected_amount += amount;
        info!(
            income_id = %income_id,
            collected = %entry.collected_amount,
            outstanding = %entry.outstanding(),
            "Collection recorded"
        );
        Ok(entry.clone())
    }

    /// Looks up an income entry by ID.
    ///
    /// # Errors
    ///
    /// Returns `IncomeError::IncomeNotFound` if no such income exists.
    pub fn get(&self, income_id: IncomeId) -> Result<Income, IncomeError> {
        self.incomes
            .get(&income_id)
            .map(|entry| entry.clone())
            .ok_or(IncomeError::IncomeNotFound(income_id))
    }

    /// Returns all income entries for a project.
    #[must_use]
    pub fn list_by_project(&self, project_id: ProjectId) -> Vec<Income> {
        let mut incomes: Vec<Income> = self
            .incomes
            .iter()
            .filter(|entry| entry.project_id == project_id)
            .map(|entry| entry.clone())
            .collect();
        incomes.sort_by_key(|income| income.created_at);
        incomes
    }
}

//! Share allocation and balance crediting.

use std::sync::Arc;

use chrono::Utc;
use dashmap::DashMap;
use rust_decimal::Decimal;
use tahsis_shared::types::{DistributionId, IncomeId, round_amount};
use tracing::info;

use super::error::DistributionError;
use super::types::{Distribution, Representative, Role};
use crate::income::Income;
use crate::ledger::{BalanceKey, BalanceLedger, Reference, TransactionKind};

/// Splits `distributable` across the representatives by share
/// percentage.
///
/// Each recipient gets `distributable * share / 100`, rounded half-up
/// to 2 decimal places. The signed rounding residual is added to the
/// leader's amount so the allocated total equals the distributable
/// amount to the cent.
///
/// # Errors
///
/// Returns `DistributionError` when the representative list is empty,
/// a share is non-positive, the shares do not sum to exactly 100,
/// there is not exactly one leader, or the residual exceeds one cent
/// per recipient.
pub fn allocate(
    income_id: IncomeId,
    distributable: Decimal,
    representatives: &[Representative],
) -> Result<Vec<Distribution>, DistributionError> {
    validate_representatives(representatives)?;

    let now = Utc::now();
    let mut distributions: Vec<Distribution> = representatives
        .iter()
        .map(|rep| Distribution {
            id: DistributionId::new(),
            income_id,
            recipient: rep.person,
            role: rep.role,
            share_percentage: rep.share_percentage,
            amount: round_amount(
                distributable * rep.share_percentage / Decimal::ONE_HUNDRED,
            ),
            created_at: now,
        })
        .collect();

    let allocated: Decimal = distributions.iter().map(|d| d.amount).sum();
    let residual = round_amount(distributable) - allocated;
    let tolerance = Decimal::new(representatives.len() as i64, 2);
    if residual.abs() > tolerance {
        return Err(DistributionError::Reconciliation { residual, tolerance });
    }

    if residual != Decimal::ZERO {
        let leader = distributions
            .iter_mut()
            .find(|d| d.role == Role::Leader)
            .ok_or(DistributionError::LeaderRequired)?;
        leader.amount += residual;
    }

    Ok(distributions)
}

fn validate_representatives(
    representatives: &[Representative],
) -> Result<(), DistributionError> {
    if representatives.is_empty() {
        return Err(DistributionError::NoRepresentatives);
    }

    let mut share_sum = Decimal::ZERO;
    let mut leaders = 0usize;
    for rep in representatives {
        if rep.share_percentage <= Decimal::ZERO {
            return Err(DistributionError::NonPositiveShare(rep.share_percentage));
        }
        share_sum += rep.share_percentage;
        if rep.role == Role::Leader {
            leaders += 1;
        }
    }

    if share_sum != Decimal::ONE_HUNDRED {
        return Err(DistributionError::SharesMustSumTo100(share_sum));
    }
    match leaders {
        0 => Err(DistributionError::LeaderRequired),
        1 => Ok(()),
        _ => Err(DistributionError::MultipleLeaders),
    }
}

/// Allocates income distributions and credits recipient balances.
///
/// Keeps the allocation record per income; an income can only be
/// distributed once.
#[derive(Debug)]
pub struct DistributionService {
    ledger: Arc<BalanceLedger>,
    by_income: DashMap<IncomeId, Vec<Distribution>>,
}

impl DistributionService {
    /// Creates a service crediting balances through `ledger`.
    #[must_use]
    pub fn new(ledger: Arc<BalanceLedger>) -> Self {
        Self {
            ledger,
            by_income: DashMap::new(),
        }
    }

    /// Allocates `income`'s distributable amount across the
    /// representatives and posts one `income` transaction per
    /// recipient to their (person, project) balance.
    ///
    /// Shares that round to zero are recorded but not posted.
    ///
    /// # Errors
    ///
    /// Returns `DistributionError` for invalid representative lists,
    /// a previously distributed income, or a failed balance posting.
    pub fn allocate_and_post(
        &self,
        income: &Income,
        representatives: &[Representative],
    ) -> Result<Vec<Distribution>, DistributionError> {
        let entry = match self.by_income.entry(income.id) {
            dashmap::Entry::Occupied(_) => {
                return Err(DistributionError::AlreadyDistributed(income.id));
            }
            dashmap::Entry::Vacant(entry) => entry,
        };

        let distributions = allocate(
            income.id,
            income.amounts.distributable_amount,
            representatives,
        )?;

        for distribution in &distributions {
            if distribution.amount <= Decimal::ZERO {
                continue;
            }
            self.ledger.post(
                BalanceKey::project_scoped(distribution.recipient, income.project_id),
                TransactionKind::Income,
                distribution.amount,
                Reference::Income(income.id),
                None,
            )?;
        }

        info!(
            income_id = %income.id,
            recipients = distributions.len(),
            distributable = %income.amounts.distributable_amount,
            "Income distributed"
        );

        entry.insert(distributions.clone());
        Ok(distributions)
    }

    /// Returns the recorded distributions for an income, if any.
    #[must_use]
    pub fn for_income(&self, income_id: IncomeId) -> Option<Vec<Distribution>> {
        self.by_income.get(&income_id).map(|d| d.clone())
    }

    /// Looks up a single distribution by ID.
    #[must_use]
    pub fn get(&self, distribution_id: DistributionId) -> Option<Distribution> {
        self.by_income.iter().find_map(|entry| {
            entry
                .value()
                .iter()
                .find(|d| d.id == distribution_id)
                .cloned()
        })
    }
}

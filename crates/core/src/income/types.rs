//! Income domain types.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tahsis_shared::types::{IncomeId, ProjectId};

/// Income classification by paying party.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IncomeType {
    /// Income from a private-sector company.
    Ozel,
    /// Income from a public institution.
    Kamu,
}

/// Amounts derived from a gross income entry.
///
/// Computed once at registration by [`super::compute_income_amounts`]
/// and stored immutably on the income record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeAmounts {
    /// VAT extracted from the VAT-inclusive gross amount.
    pub full_vat_amount: Decimal,
    /// Portion of the VAT withheld (tevkifat); zero without withholding.
    pub withholding_tax_amount: Decimal,
    /// VAT actually paid through (full VAT minus withholding).
    pub paid_vat_amount: Decimal,
    /// Gross amount minus paid VAT.
    pub net_amount: Decimal,
    /// TTO commission taken from the net amount.
    pub company_amount: Decimal,
    /// Net amount remaining for academic staff after commission.
    pub distributable_amount: Decimal,
}

/// Input for registering a new income entry.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterIncomeInput {
    /// The project the income belongs to.
    pub project_id: ProjectId,
    /// VAT-inclusive gross amount (must be positive).
    pub gross_amount: Decimal,
    /// VAT rate in percent.
    pub vat_rate: Decimal,
    /// Date the income was invoiced.
    pub income_date: NaiveDate,
    /// Whether this income stems from intellectual property (FSMH).
    pub is_fsmh_income: bool,
    /// Income classification (private or public payer).
    pub income_type: IncomeType,
    /// Whether the income belongs to the TTO itself rather than a project team.
    pub is_tto_income: bool,
    /// Free-form description.
    pub description: String,
}

/// A registered income entry.
///
/// The derived amounts are immutable after registration; only
/// `collected_amount` changes as collections are recorded.
#[derive(Debug, Clone, Serialize)]
pub struct Income {
    /// Unique identifier.
    pub id: IncomeId,
    /// The project the income belongs to.
    pub project_id: ProjectId,
    /// VAT-inclusive gross amount.
    pub gross_amount: Decimal,
    /// VAT rate in percent at registration time.
    pub vat_rate: Decimal,
    /// Date the income was invoiced.
    pub income_date: NaiveDate,
    /// Whether this income stems from intellectual property (FSMH).
    pub is_fsmh_income: bool,
    /// Income classification (private or public payer).
    pub income_type: IncomeType,
    /// Whether the income belongs to the TTO itself.
    pub is_tto_income: bool,
    /// Free-form description.
    pub description: String,
    /// Derived deduction amounts, frozen at registration.
    pub amounts: IncomeAmounts,
    /// Amount collected so far (0 ..= gross_amount).
    pub collected_amount: Decimal,
    /// Registration timestamp.
    pub created_at: DateTime<Utc>,
}

impl Income {
    /// Returns the uncollected remainder of the gross amount.
    #[must_use]
    pub fn outstanding(&self) -> Decimal {
        self.gross_amount - self.collected_amount
    }

    /// Returns true if the full gross amount has been collected.
    #[must_use]
    pub fn is_fully_collected(&self) -> bool {
        self.collected_amount == self.gross_amount
    }
}

//! Derived project financials.
//!
//! Nothing here is stored: the summary is recomputed from the project's
//! income entries so it can never drift from the ledgered amounts.

use rust_decimal::Decimal;
use serde::Serialize;
use tahsis_shared::types::{ProjectId, round_amount};

use crate::income::Income;

use super::types::Project;

/// Financial summary for a project, derived from its income entries.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectFinancials {
    /// The project this summary belongs to.
    pub project_id: ProjectId,
    /// Contracted budget.
    pub budget: Decimal,
    /// Sum of gross income registered so far.
    pub total_gross_income: Decimal,
    /// Budget minus registered gross income. May go negative when a
    /// project over-invoices; reported as-is rather than blocked.
    pub remaining_budget: Decimal,
    /// Sum of TTO commission across all income entries.
    pub total_commission_due: Decimal,
    /// Commission considered collected, pro-rated by each income's
    /// collected/gross ratio.
    pub total_commission_collected: Decimal,
    /// Sum of uncollected gross amounts.
    pub total_outstanding: Decimal,
}

impl ProjectFinancials {
    /// Computes the summary for `project` over its income entries.
    ///
    /// Entries belonging to other projects are ignored, so callers may
    /// pass an unfiltered income list.
    #[must_use]
    pub fn compute(project: &Project, incomes: &[Income]) -> Self {
        let mut total_gross = Decimal::ZERO;
        let mut commission_due = Decimal::ZERO;
        let mut commission_collected = Decimal::ZERO;
        let mut outstanding = Decimal::ZERO;

        for income in incomes.iter().filter(|i| i.project_id == project.id) {
            total_gross += income.gross_amount;
            commission_due += income.amounts.company_amount;
            outstanding += income.outstanding();
            if income.gross_amount > Decimal::ZERO {
                commission_collected +=
                    income.amounts.company_amount * income.collected_amount / income.gross_amount;
            }
        }

        Self {
            project_id: project.id,
            budget: project.budget,
            total_gross_income: total_gross,
            remaining_budget: project.budget - total_gross,
            total_commission_due: commission_due,
            total_commission_collected: round_amount(commission_collected),
            total_outstanding: outstanding,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::income::{IncomeAmounts, IncomeType};
    use crate::project::types::ProjectStatus;
    use chrono::{NaiveDate, Utc};
    use rust_decimal_macros::dec;
    use tahsis_shared::types::IncomeId;

    fn sample_project() -> Project {
        Project {
            id: ProjectId::new(),
            code: "TTO-001".to_string(),
            budget: dec!(500000),
            company_rate: dec!(10),
            vat_rate: dec!(18),
            has_withholding_tax: false,
            withholding_tax_rate: dec!(0),
            status: ProjectStatus::Active,
        }
    }

    fn income_for(project_id: ProjectId, gross: Decimal, company: Decimal, collected: Decimal) -> Income {
        Income {
            id: IncomeId::new(),
            project_id,
            gross_amount: gross,
            vat_rate: dec!(18),
            income_date: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
            is_fsmh_income: false,
            income_type: IncomeType::Ozel,
            is_tto_income: false,
            description: String::new(),
            amounts: IncomeAmounts {
                full_vat_amount: dec!(0),
                withholding_tax_amount: dec!(0),
                paid_vat_amount: dec!(0),
                net_amount: gross,
                company_amount: company,
                distributable_amount: gross - company,
            },
            collected_amount: collected,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_empty_project() {
        let project = sample_project();
        let financials = ProjectFinancials::compute(&project, &[]);

        assert_eq!(financials.total_gross_income, dec!(0));
        assert_eq!(financials.remaining_budget, dec!(500000));
        assert_eq!(financials.total_commission_due, dec!(0));
        assert_eq!(financials.total_outstanding, dec!(0));
    }

    #[test]
    fn test_summary_over_incomes() {
        let project = sample_project();
        let incomes = vec![
            income_for(project.id, dec!(118000), dec!(10000), dec!(118000)),
            income_for(project.id, dec!(59000), dec!(5000), dec!(29500)),
        ];

        let financials = ProjectFinancials::compute(&project, &incomes);

        assert_eq!(financials.total_gross_income, dec!(177000));
        assert_eq!(financials.remaining_budget, dec!(323000));
        assert_eq!(financials.total_commission_due, dec!(15000));
        // 10000 fully collected + 5000 * 0.5
        assert_eq!(financials.total_commission_collected, dec!(12500.00));
        assert_eq!(financials.total_outstanding, dec!(29500));
    }

    #[test]
    fn test_other_projects_ignored() {
        let project = sample_project();
        let incomes = vec![income_for(ProjectId::new(), dec!(100000), dec!(10000), dec!(0))];

        let financials = ProjectFinancials::compute(&project, &incomes);
        assert_eq!(financials.total_gross_income, dec!(0));
    }

    #[test]
    fn test_remaining_budget_can_go_negative() {
        let mut project = sample_project();
        project.budget = dec!(100000);
        let incomes = vec![income_for(project.id, dec!(118000), dec!(10000), dec!(0))];

        let financials = ProjectFinancials::compute(&project, &incomes);
        assert_eq!(financials.remaining_budget, dec!(-18000));
    }
}

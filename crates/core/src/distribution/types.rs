//! Distribution domain types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tahsis_shared::types::{DistributionId, IncomeId, Person};

/// A representative's role on a project.
///
/// Exactly one representative per project carries the `Leader` role;
/// the leader absorbs the rounding residual during allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Project leader; receives the reconciliation residual.
    Leader,
    /// Regular researcher.
    Researcher,
}

/// One project representative with their distribution share.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Representative {
    /// The person receiving a share.
    pub person: Person,
    /// Role on the project.
    pub role: Role,
    /// Share of the distributable amount, as a percentage.
    pub share_percentage: Decimal,
}

/// One recipient's allocated share of an income.
#[derive(Debug, Clone, Serialize)]
pub struct Distribution {
    /// Unique identifier.
    pub id: DistributionId,
    /// The income this distribution splits.
    pub income_id: IncomeId,
    /// The recipient.
    pub recipient: Person,
    /// The recipient's role at allocation time.
    pub role: Role,
    /// The share percentage applied.
    pub share_percentage: Decimal,
    /// The allocated amount, reconciliation included.
    pub amount: Decimal,
    /// Allocation timestamp.
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_serde() {
        assert_eq!(serde_json::to_string(&Role::Leader).unwrap(), "\"leader\"");
        assert_eq!(
            serde_json::to_string(&Role::Researcher).unwrap(),
            "\"researcher\""
        );
    }
}

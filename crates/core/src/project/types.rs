//! Project domain types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tahsis_shared::types::{ProjectId, is_valid_rate};
use thiserror::Error;

/// Project lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    /// Project is running and can receive income.
    Active,
    /// Project has finished.
    Completed,
    /// Project was cancelled.
    Cancelled,
}

/// A technology-transfer project.
///
/// The commission and tax rates are frozen per project; income entries
/// snapshot them at registration time.
#[derive(Debug, Clone, Serialize)]
pub struct Project {
    /// Unique identifier.
    pub id: ProjectId,
    /// Unique human-readable project code.
    pub code: String,
    /// Total contracted budget.
    pub budget: Decimal,
    /// TTO commission rate in percent.
    pub company_rate: Decimal,
    /// VAT rate in percent applied to this project's income.
    pub vat_rate: Decimal,
    /// Whether VAT withholding (tevkifat) applies.
    pub has_withholding_tax: bool,
    /// Withholding rate in percent (portion of the VAT withheld).
    pub withholding_tax_rate: Decimal,
    /// Lifecycle status.
    pub status: ProjectStatus,
}

/// Errors that can occur during project operations.
#[derive(Debug, Error)]
pub enum ProjectError {
    /// Project code is already taken.
    #[error("Project code already exists: {0}")]
    DuplicateCode(String),

    /// A percentage rate is outside the valid range.
    #[error("Rate '{name}' must be between 0 and 100, got {value}")]
    RateOutOfRange {
        /// Which rate was invalid.
        name: &'static str,
        /// The offending value.
        value: Decimal,
    },

    /// Budget must not be negative.
    #[error("Budget must not be negative, got {0}")]
    NegativeBudget(Decimal),

    /// Project not found.
    #[error("Project not found: {0}")]
    ProjectNotFound(ProjectId),
}

impl ProjectError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::DuplicateCode(_) => "DUPLICATE_PROJECT_CODE",
            Self::RateOutOfRange { .. } => "RATE_OUT_OF_RANGE",
            Self::NegativeBudget(_) => "NEGATIVE_BUDGET",
            Self::ProjectNotFound(_) => "PROJECT_NOT_FOUND",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            Self::DuplicateCode(_) => 409,
            Self::RateOutOfRange { .. } | Self::NegativeBudget(_) => 400,
            Self::ProjectNotFound(_) => 404,
        }
    }
}

impl Project {
    /// Validates the project's rates and budget.
    ///
    /// # Errors
    ///
    /// Returns `ProjectError` if the budget is negative or a rate falls
    /// outside `[0, 100]`.
    pub fn validate(&self) -> Result<(), ProjectError> {
        if self.budget < Decimal::ZERO {
            return Err(ProjectError::NegativeBudget(self.budget));
        }
        for (name, value) in [
            ("company_rate", self.company_rate),
            ("vat_rate", self.vat_rate),
            ("withholding_tax_rate", self.withholding_tax_rate),
        ] {
            if !is_valid_rate(value) {
                return Err(ProjectError::RateOutOfRange { name, value });
            }
        }
        Ok(())
    }
}

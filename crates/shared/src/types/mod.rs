//! Shared domain types.

pub mod id;
pub mod money;
pub mod pagination;
pub mod person;

pub use id::{
    BalanceId, BalanceTransactionId, DistributionId, IncomeId, InstructionId, PersonnelId,
    ProjectId, UserId,
};
pub use money::{AMOUNT_SCALE, is_valid_rate, round_amount};
pub use pagination::{PageMeta, PageRequest, PageResponse};
pub use person::Person;

//! The `Person` sum type: a payment recipient is either a system user
//! or external academic personnel, never both and never neither.
//!
//! Modeling this as an enum instead of two nullable foreign keys makes
//! the "both set" and "neither set" states unrepresentable.

use serde::{Deserialize, Serialize};

use super::id::{PersonnelId, UserId};

/// A recipient of income distributions and payment instructions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "id")]
pub enum Person {
    /// A registered system user.
    User(UserId),
    /// External academic personnel without a system account.
    Personnel(PersonnelId),
}

impl Person {
    /// Returns the user ID if this person is a system user.
    #[must_use]
    pub const fn user_id(&self) -> Option<UserId> {
        match self {
            Self::User(id) => Some(*id),
            Self::Personnel(_) => None,
        }
    }

    /// Returns the personnel ID if this person is external personnel.
    #[must_use]
    pub const fn personnel_id(&self) -> Option<PersonnelId> {
        match self {
            Self::User(_) => None,
            Self::Personnel(id) => Some(*id),
        }
    }
}

impl std::fmt::Display for Person {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::User(id) => write!(f, "user:{id}"),
            Self::Personnel(id) => write!(f, "personnel:{id}"),
        }
    }
}

//! Project records and derived financial summaries.

pub mod registry;
pub mod summary;
pub mod types;

pub use registry::ProjectRegistry;
pub use summary::ProjectFinancials;
pub use types::{Project, ProjectError, ProjectStatus};

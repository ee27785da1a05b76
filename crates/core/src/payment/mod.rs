//! Payment instructions.
//!
//! A payment instruction bundles one or more payout items for a payee
//! into a numbered document, draws the total down from the payee's
//! balance on creation, and walks a fixed status lifecycle. Rejection
//! posts a compensating adjustment; completion settles the held funds.

pub mod error;
pub mod numbering;
pub mod service;
pub mod types;

pub use error::PaymentError;
pub use numbering::InstructionNumberer;
pub use service::PaymentService;
pub use types::{
    CreateInstructionInput, InstructionItem, InstructionStatus, ItemSource, PaymentInstruction,
};

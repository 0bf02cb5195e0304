//! Transaction ledger: domain types plus the persisted CRUD owner.

pub mod category;
#[allow(clippy::module_inception)]
pub mod ledger;
pub mod transaction;

pub use category::{Category, CategoryLabel};
pub use ledger::{Ledger, DEFAULT_SAVINGS_GOAL};
pub use transaction::{EntryDate, Transaction, TransactionDraft, TransactionKind};

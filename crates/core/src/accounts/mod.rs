//! Accounts module - ledger models, the ledger trait, and the in-memory ledger.

mod accounts_constants;
mod accounts_model;
mod accounts_traits;
mod ledger;


// Re-export the public interface
pub use accounts_constants::*;
pub use accounts_model::{
    Account, AccountKind, AccountOverview, LedgerSeed, LedgerTransaction, TransactionDirection,
};
pub use accounts_traits::LedgerTrait;
pub use ledger::InMemoryLedger;

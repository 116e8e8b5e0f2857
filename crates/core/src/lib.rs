//! eBanking Core - transfer wizard, ledger, and login collaborators.
//!
//! This crate contains the business logic of the online banking mock.
//! Everything is in-memory: the ledger is seeded from configuration and
//! network round-trips are simulated with fixed delays.

pub mod accounts;
pub mod auth;
pub mod config;
pub mod constants;
pub mod dashboard;
pub mod errors;
pub mod notifications;
pub mod scheduler;
pub mod transfers;
pub mod utils;

pub use config::BankConfig;

// Re-export error types
pub use errors::Error;
pub use errors::Result;

//! Core error types for the eBanking mock.
//!
//! Field-level validation problems are not errors of the operation itself:
//! they are collected in [`crate::transfers::FieldErrors`] and stored on the
//! wizard. The types here describe operations that could not be carried out
//! at all.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::transfers::WizardStep;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the banking core.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Transfer wizard error: {0}")]
    Wizard(#[from] WizardError),

    #[error("Transfer submission failed: {0}")]
    Submission(String),

    #[error("Authentication failed: {0}")]
    Auth(#[from] AuthError),

    #[error("Ledger operation failed: {0}")]
    Ledger(#[from] LedgerError),

    #[error("Invalid configuration value: {0}")]
    InvalidConfigValue(String),
}

/// Validation errors for user input and data parsing.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Refused wizard actions. None of them change the wizard state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WizardError {
    #[error("Cannot {action} from step '{from}'")]
    InvalidTransition { from: WizardStep, action: &'static str },

    #[error("A transfer is already being submitted")]
    SubmissionInProgress,

    #[error("The transfer wizard is closed")]
    Closed,

    #[error("Field '{field}' cannot be edited on step '{step}'")]
    FieldNotEditable { field: String, step: WizardStep },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Username and password are required")]
    MissingCredentials,

    #[error("Invalid username or password")]
    InvalidCredentials,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Account '{0}' not found")]
    AccountNotFound(String),

    #[error("Insufficient funds on account '{account_id}': available {available}, requested {requested}")]
    InsufficientFunds {
        account_id: String,
        available: Decimal,
        requested: Decimal,
    },

    #[error("Transaction '{0}' was already recorded")]
    DuplicateTransaction(String),
}

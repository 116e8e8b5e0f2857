//! Transfers module - draft model, validation, and the transfer wizard.

mod transfers_gateway;
mod transfers_model;
mod transfers_traits;
mod transfers_validation;
mod transfers_wizard;

#[cfg(test)]
mod transfers_validation_tests;

// Re-export the public interface
pub use transfers_gateway::MockTransferGateway;
pub use transfers_model::{
    generate_transaction_id, DraftEdit, TransferDraft, TransferField, TransferRecord,
    TransferRequest, Urgency,
};
pub use transfers_traits::{TransferGatewayTrait, TransferListenerTrait};
pub use transfers_validation::{
    is_valid_swiss_iban, parse_amount, validate_beneficiary, validate_details,
    validate_details_on, FieldError, FieldErrors, SWISS_IBAN_LENGTH,
};
pub use transfers_wizard::{CloseReason, TransferWizard, WizardSnapshot, WizardStep};

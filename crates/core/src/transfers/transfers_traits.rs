//! Transfer collaborator traits.
//!
//! The wizard only drives the workflow. Executing a transfer and booking it
//! are delegated to the implementations of these traits.

use async_trait::async_trait;

use super::transfers_model::{TransferRecord, TransferRequest};
use crate::errors::Result;

/// Executes validated transfers against the bank.
///
/// Returning an error keeps the wizard on the confirmation step with the
/// draft intact, so the user can retry or go back and edit.
#[async_trait]
pub trait TransferGatewayTrait: Send + Sync {
    async fn submit(&self, request: &TransferRequest) -> Result<()>;
}

/// Receives executed transfers (the account ledger in practice).
pub trait TransferListenerTrait: Send + Sync {
    /// Called once per executed transfer, before the wizard closes.
    ///
    /// An error here is treated like a failed submission.
    fn on_transfer_executed(&self, record: &TransferRecord) -> Result<()>;
}

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info};

use super::transfers_model::TransferRequest;
use super::transfers_traits::TransferGatewayTrait;
use crate::errors::Result;
use crate::utils::format::format_chf;

/// Gateway that simulates bank processing time and always succeeds.
#[derive(Debug, Clone)]
pub struct MockTransferGateway {
    processing_delay: Duration,
}

impl MockTransferGateway {
    pub fn new(processing_delay: Duration) -> Self {
        Self { processing_delay }
    }

    pub fn processing_delay(&self) -> Duration {
        self.processing_delay
    }
}

#[async_trait]
impl TransferGatewayTrait for MockTransferGateway {
    async fn submit(&self, request: &TransferRequest) -> Result<()> {
        debug!(
            "Submitting {} transfer of {} to {}, simulated processing {:?}",
            request.urgency,
            format_chf(request.amount),
            request.beneficiary_iban,
            self.processing_delay
        );

        tokio::time::sleep(self.processing_delay).await;

        info!(
            "Transfer of {} to {} processed",
            format_chf(request.amount),
            request.beneficiary_name
        );
        Ok(())
    }
}

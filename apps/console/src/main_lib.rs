use std::sync::Arc;

use ebanking_core::dashboard::BankServices;
use ebanking_core::notifications::LogNotificationSink;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::Config;

/// Logs go to stderr so they do not interleave with the terminal form.
pub fn init_tracing(log_format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .without_time()
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

pub fn build_services(config: &Config) -> anyhow::Result<BankServices> {
    let services = BankServices::from_config(&config.bank, Arc::new(LogNotificationSink))?;
    tracing::info!(
        "Services ready: processing delay {:?}, login delay {:?}",
        config.bank.transfer_processing_delay(),
        config.bank.login_delay()
    );
    Ok(services)
}

//! Injected configuration.
//!
//! Credentials, balances and simulated delays are passed in through
//! [`BankConfig`] instead of living as constants in the services.

use std::time::Duration;

use serde::Deserialize;

use crate::accounts::LedgerSeed;
use crate::auth::Credentials;
use crate::constants::{
    DEFAULT_CLOCK_TICK_MS, DEFAULT_LOGIN_DELAY_MS, DEFAULT_TRANSFER_PROCESSING_MS,
};
use crate::errors::{Error, Result};

#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BankConfig {
    /// Simulated bank processing time of a confirmed transfer
    pub transfer_processing_ms: u64,
    /// Simulated login round-trip
    pub login_delay_ms: u64,
    /// Refresh period of the dashboard clock
    pub clock_tick_ms: u64,
    /// Accepted login; any non-empty pair is accepted when unset
    pub credentials: Option<Credentials>,
    pub ledger: LedgerSeed,
}

impl Default for BankConfig {
    fn default() -> Self {
        Self {
            transfer_processing_ms: DEFAULT_TRANSFER_PROCESSING_MS,
            login_delay_ms: DEFAULT_LOGIN_DELAY_MS,
            clock_tick_ms: DEFAULT_CLOCK_TICK_MS,
            credentials: None,
            ledger: LedgerSeed::default(),
        }
    }
}

impl BankConfig {
    pub fn transfer_processing_delay(&self) -> Duration {
        Duration::from_millis(self.transfer_processing_ms)
    }

    pub fn login_delay(&self) -> Duration {
        Duration::from_millis(self.login_delay_ms)
    }

    pub fn clock_tick(&self) -> Duration {
        Duration::from_millis(self.clock_tick_ms)
    }

    /// Rejects values the services cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.clock_tick_ms == 0 {
            return Err(Error::InvalidConfigValue(
                "clock tick must be greater than zero".to_string(),
            ));
        }
        if let Some(credentials) = &self.credentials {
            if credentials.username.trim().is_empty() || credentials.password.is_empty() {
                return Err(Error::InvalidConfigValue(
                    "configured credentials must have a username and a password".to_string(),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BankConfig::default();
        assert_eq!(config.transfer_processing_delay(), Duration::from_secs(3));
        assert_eq!(config.login_delay(), Duration::from_millis(1500));
        assert_eq!(config.clock_tick(), Duration::from_secs(1));
        assert!(config.credentials.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: BankConfig = serde_json::from_str(
            r#"{"transferProcessingMs":0,"credentials":{"username":"monicka","password":"pw"}}"#,
        )
        .unwrap();
        assert_eq!(config.transfer_processing_delay(), Duration::ZERO);
        assert_eq!(config.login_delay_ms, DEFAULT_LOGIN_DELAY_MS);
        assert_eq!(config.credentials.unwrap().username, "monicka");
        assert_eq!(config.ledger.accounts.len(), 3);
    }

    #[test]
    fn test_validate_rejects_zero_tick() {
        let config = BankConfig {
            clock_tick_ms: 0,
            ..BankConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(Error::InvalidConfigValue(_))
        ));
    }

    #[test]
    fn test_validate_rejects_blank_credentials() {
        let config = BankConfig {
            credentials: Some(Credentials::new(" ", "pw")),
            ..BankConfig::default()
        };
        assert!(config.validate().is_err());
    }
}

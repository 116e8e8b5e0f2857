use std::path::PathBuf;

use anyhow::Context;
use ebanking_core::auth::Credentials;
use ebanking_core::BankConfig;

pub struct Config {
    pub bank: BankConfig,
    pub log_format: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from `lookup`, which resolves `EB_*`
    /// variable names.
    ///
    /// `EB_CONFIG_FILE` points to a JSON [`BankConfig`]; the other variables
    /// override individual values on top of it.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let mut bank = match lookup("EB_CONFIG_FILE") {
            Some(path) => {
                let path = PathBuf::from(path);
                let raw = std::fs::read_to_string(&path)
                    .with_context(|| format!("Cannot read {}", path.display()))?;
                serde_json::from_str::<BankConfig>(&raw)
                    .with_context(|| format!("Invalid bank configuration in {}", path.display()))?
            }
            None => BankConfig::default(),
        };

        if let Some(ms) = parse_ms(&lookup, "EB_PROCESSING_DELAY_MS")? {
            bank.transfer_processing_ms = ms;
        }
        if let Some(ms) = parse_ms(&lookup, "EB_LOGIN_DELAY_MS")? {
            bank.login_delay_ms = ms;
        }
        if let Some(ms) = parse_ms(&lookup, "EB_CLOCK_TICK_MS")? {
            bank.clock_tick_ms = ms;
        }
        match (lookup("EB_LOGIN_USERNAME"), lookup("EB_LOGIN_PASSWORD")) {
            (Some(username), Some(password)) => {
                bank.credentials = Some(Credentials::new(username, password));
            }
            (None, None) => {}
            _ => anyhow::bail!("EB_LOGIN_USERNAME and EB_LOGIN_PASSWORD must be set together"),
        }

        let log_format = lookup("EB_LOG_FORMAT").unwrap_or_else(|| "text".to_string());

        Ok(Self { bank, log_format })
    }
}

fn parse_ms(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> anyhow::Result<Option<u64>> {
    lookup(key)
        .map(|value| {
            value
                .trim()
                .parse::<u64>()
                .with_context(|| format!("Invalid {}: '{}'", key, value))
        })
        .transpose()
}

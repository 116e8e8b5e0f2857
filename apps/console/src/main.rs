mod config;
mod console;
mod main_lib;

use config::Config;
use console::Console;
use main_lib::{build_services, init_tracing};
use tokio::io::BufReader;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    init_tracing(&config.log_format);
    let services = build_services(&config)?;

    let mut console = Console::new(BufReader::new(tokio::io::stdin()), std::io::stdout());
    console.run(&services).await?;
    tracing::info!("Session ended");
    Ok(())
}

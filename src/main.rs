use anyhow::{bail, Context, Result};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use glitch::config::Config;
use glitch::ProblemClient;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,glitch=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting glitch-check v{}", env!("CARGO_PKG_VERSION"));

    let config = Config::from_env().context("Failed to load configuration")?;
    info!("Configuration loaded successfully");

    let client = ProblemClient::new(config.problem.clone())?;
    let check = &config.check;

    let valid = client
        .check(&check.url, &check.expected_code, check.expected_status)
        .await?;

    if !valid {
        warn!(
            url = %check.url,
            expected_code = %check.expected_code,
            expected_status = check.expected_status,
            "Response did not carry the expected problem"
        );
        bail!(
            "expected problem [{} - {}] from {}",
            check.expected_status,
            check.expected_code,
            check.url
        );
    }

    info!("Response carried the expected problem");
    Ok(())
}

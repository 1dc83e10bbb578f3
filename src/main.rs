use flomo_mcp::{config::Config, logging, stdio, AppState};
use tokio::io::{stdin, stdout, BufReader};
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_logging();

    let config = Config::load().inspect_err(|err| {
        error!(error = %err, "invalid configuration");
    })?;

    if config.is_configured() {
        info!(flomo_api_url = %config.redacted_api_url(), "server starting");
    } else {
        warn!("flomo api url is not configured; write_note calls will fail");
    }

    let state = AppState::from_config(config);
    stdio::serve(state, BufReader::new(stdin()), stdout())
        .await
        .inspect_err(|err| {
            error!(error = %err, "stdio transport failed");
        })?;

    Ok(())
}

//! Verus Rosetta Gateway - Entrypoint
//!
//! Startup order: load `.env`, resolve the typed configuration, initialize
//! logging, build the daemon client, then serve the Rosetta routes until the
//! process is stopped.
//!
//! Required environment:
//!   ROSETTA_RPC_URL    Verus daemon JSON-RPC endpoint
//!   ROSETTA_RPC_USER   RPC basic-auth user
//!   ROSETTA_RPC_PASS   RPC basic-auth password

use std::sync::Arc;

use verus_rosetta::api::{start_server, AppState};
use verus_rosetta::config::Config;
use verus_rosetta::daemon::DaemonClient;
use verus_rosetta::logging;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("configuration error: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = logging::init_from_config(&config) {
        eprintln!("logging error: {}", e);
        std::process::exit(1);
    }

    config.log_summary();

    let daemon = match DaemonClient::from_config(&config) {
        Ok(client) => Arc::new(client),
        Err(e) => {
            tracing::error!(error = %e, "failed to build daemon client");
            std::process::exit(1);
        }
    };

    let state = AppState::new(daemon, &config);

    if let Err(e) = start_server(state, config.api_port).await {
        tracing::error!(error = %e, "server exited");
        std::process::exit(1);
    }
}

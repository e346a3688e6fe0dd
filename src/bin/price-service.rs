//! contract-lens price service
//!
//! Standalone deployment of the price lookup with a `GET /` liveness banner.

use contract_lens::config::AppConfig;
use contract_lens::core::http::{start_server, ServiceKind};
use contract_lens::logging;
use dotenvy::dotenv;
use tokio::signal;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    let config = AppConfig::from_env();
    logging::init_logging(&config);

    info!(port = config.port, environment = %config.environment, "Starting contract-lens price service");

    let server_handle = tokio::spawn(async move {
        if let Err(e) = start_server(config, ServiceKind::Price).await {
            error!(error = %e, "HTTP server error");
        }
    });

    tokio::select! {
        _ = signal::ctrl_c() => {
            info!("Shutting down price service...");
        }
        _ = server_handle => {
            error!("HTTP server stopped");
        }
    }

    Ok(())
}

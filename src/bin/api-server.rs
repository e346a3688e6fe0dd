//! contract-lens API Server
//!
//! Serves `POST /analyze` and `GET /price/{symbol}` from one process.
//! Stateless; can be horizontally scaled.

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

    info!(
        environment = %config.environment,
        port = config.port,
        language_model = config.language_model.is_some(),
        "Starting contract-lens API server"
    );

    let server_handle = tokio::spawn(async move {
        if let Err(e) = start_server(config, ServiceKind::Analysis).await {
            error!(error = %e, "HTTP server error");
        }
    });

    tokio::select! {
        _ = signal::ctrl_c() => {
            info!("Shutting down API server...");
        }
        _ = server_handle => {
            error!("HTTP server stopped");
        }
    }

    Ok(())
}

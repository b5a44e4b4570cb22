//! Payroll engine server entry point.
//!
//! Loads the configuration and withholding table, then serves the HTTP API.
//! `PAYROLL_BIND_ADDR` (default `0.0.0.0:8080`) and `PAYROLL_CONFIG_DIR`
//! (default `./config/kr2025`) override the defaults; `RUST_LOG` controls
//! log filtering.

use payroll_engine::api::{AppState, create_router};
use payroll_engine::config::ConfigLoader;
use tracing_subscriber::EnvFilter;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_CONFIG_DIR: &str = "./config/kr2025";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let bind_addr =
        std::env::var("PAYROLL_BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
    let config_dir =
        std::env::var("PAYROLL_CONFIG_DIR").unwrap_or_else(|_| DEFAULT_CONFIG_DIR.to_string());

    let config = ConfigLoader::load(&config_dir)?;
    let state = AppState::new(config);
    if let Some(table) = state.tax_table().table() {
        tracing::info!(rows = table.len(), "withholding table ready");
    } else {
        tracing::warn!(
            "withholding table unavailable, income tax below the threshold resolves to zero"
        );
    }

    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

    tracing::info!(addr = %bind_addr, "payroll engine listening");

    axum::serve(listener, app).await?;
    Ok(())
}

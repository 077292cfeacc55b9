//! hrstat static data server
//!
//! Run with: cargo run --bin hrstat-server
//!
//! Serves `status.json` at `/api/status` and the static folder under
//! `/static`, which is what the HTTP loader expects.
//!
//! # Configuration
//!
//! Config file lookup as for the CLI, then environment variables:
//! - `HRSTAT_HOST`: Host to bind to (default: 0.0.0.0)
//! - `HRSTAT_PORT`: Port to listen on (default: 5000)
//! - `HRSTAT_STATIC_DIR`: Static folder (default: ./static)
//! - `HRSTAT_LOG_LEVEL` / `HRSTAT_LOG_FORMAT`, or `RUST_LOG`

use hrstat::api::{serve, AppState};
use hrstat::config::Config;
use hrstat::logging::init_logging;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_default();
    init_logging(&config.logging)?;

    tracing::info!("Starting hrstat server v{}", env!("CARGO_PKG_VERSION"));

    let state = AppState::from_config(&config.server);
    if !state.static_dir().exists() {
        tracing::warn!(
            "Static folder {:?} does not exist; only health routes will succeed",
            state.static_dir()
        );
    }

    serve(state, &config.server).await?;

    tracing::info!("hrstat server stopped");
    Ok(())
}

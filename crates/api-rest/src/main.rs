//! Standalone REST API server binary.
//!
//! ## Purpose
//! Runs the REST API server on its own, without loading a `.env` file.
//!
//! ## Intended use
//! Useful for development and debugging. The workspace's main `safekeep-run` binary is the
//! normal entry point.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::RestConfig;

/// Main entry point for the Safekeep REST API server
///
/// # Environment Variables
/// - `SAFEKEEP_REST_ADDR`: Server address (default: "0.0.0.0:3000")
/// - `SAFEKEEP_DATA_DIR`: Directory holding `uploads/` and `backup/` (default: ".")
/// - `SAFEKEEP_MAX_UPLOAD_BYTES`: Upload size limit (default: 10 MiB)
/// - `SAFEKEEP_SESSION_IDLE_SECS`: Idle seconds before a session ends (default: 3600)
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - the configuration is invalid, or
/// - the server fails to start or while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cfg = RestConfig::from_env()?;
    api_rest::serve(cfg).await
}

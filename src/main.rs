use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::RestConfig;

/// Main entry point for Safekeep
///
/// Loads `.env` if present, initialises logging, resolves configuration once and serves the
/// REST API (upload, delete, recover, list) with Swagger UI at `/swagger-ui`.
///
/// # Environment Variables
/// - `SAFEKEEP_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `SAFEKEEP_DATA_DIR`: Directory holding `uploads/` and `backup/` (default: ".")
/// - `SAFEKEEP_MAX_UPLOAD_BYTES`: Upload size limit in bytes (default: 10 MiB)
/// - `RUST_LOG`: Extra tracing directives
///
/// # Returns
/// * `Ok(())` - If the server starts and runs successfully
/// * `Err(anyhow::Error)` - If configuration, startup or the server fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("safekeep_run=info".parse()?)
                .add_directive("api_rest=info".parse()?)
                .add_directive("safekeep_vault=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cfg = RestConfig::from_env()?;
    tracing::info!("++ Starting Safekeep REST on {}", cfg.addr);

    api_rest::serve(cfg).await
}

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use endo_core::ServerConfig;

/// Main entry point for the Endo application
///
/// Resolves configuration once from the environment (and `.env`, if present) and starts the
/// REST server with Swagger UI.
///
/// # Environment Variables
/// - `ENDO_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `ENDO_CORS_PERMISSIVE`: Apply a permissive CORS layer (default: "true")
///
/// # Returns
/// * `Ok(())` - If the server starts and runs successfully
/// * `Err(anyhow::Error)` - If configuration, startup or the server itself fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive("endo=info".parse()?))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env_values(
        std::env::var("ENDO_REST_ADDR").ok(),
        std::env::var("ENDO_CORS_PERMISSIVE").ok(),
    )?;

    tracing::info!(cors_permissive = config.cors_permissive(), "++ Starting Endo");

    api_rest::serve(config).await
}

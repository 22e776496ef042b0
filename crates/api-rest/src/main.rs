//! Standalone REST API server binary.
//!
//! ## Purpose
//! Runs the endodontic diagnosis REST API (with OpenAPI/Swagger UI) on its own. The workspace's
//! `endo-run` binary boots the same server.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use endo_core::ServerConfig;

/// Main entry point for the Endo REST API server
///
/// # Environment Variables
/// - `ENDO_REST_ADDR`: Server address (default: "0.0.0.0:3000")
/// - `ENDO_CORS_PERMISSIVE`: Apply a permissive CORS layer (default: "true")
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - the configuration values are invalid,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env_values(
        std::env::var("ENDO_REST_ADDR").ok(),
        std::env::var("ENDO_CORS_PERMISSIVE").ok(),
    )?;

    api_rest::serve(config).await
}

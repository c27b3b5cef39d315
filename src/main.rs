//! SHSF development host
//!
//! Serves the bundled functions over HTTP for local experimentation.

use shsf::functions;
use shsf::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Starting SHSF development host...");

    let config = HostConfig::new().host("0.0.0.0").port(8080);
    let server = HostServer::new(config);

    for function in functions::bundled()? {
        server.register_function(function).await?;
    }

    tracing::info!("Try: curl -X POST -d '{{\"username\":\"alice\"}}' http://localhost:8080/routing/login");
    tracing::info!("Try: curl -d '{{\"type\":\"permanent\"}}' http://localhost:8080/redirects");
    tracing::info!("Try: curl http://localhost:8080/custom-responses");
    tracing::info!("Functions: curl http://localhost:8080/_functions");

    server.run().await
}

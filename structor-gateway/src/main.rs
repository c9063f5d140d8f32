//! Entry point for the `structor-gateway` HTTP server.

use std::sync::Arc;

use structor_gateway::{config::GatewayConfig, routes::create_router};
use structor_sandbox::{Collaborators, RemoteCollaborators, SandboxFacade};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = GatewayConfig::from_env();

    let remote = match RemoteCollaborators::new(&config.backend_url) {
        Ok(r) => Arc::new(r),
        Err(e) => {
            tracing::error!(backend = %config.backend_url, error = %e, "invalid backend");
            std::process::exit(1);
        }
    };

    let facade = Arc::new(SandboxFacade::new(
        config.sandbox.clone(),
        Collaborators::from_single(remote),
    ));
    let app = create_router(facade);

    let listener = match tokio::net::TcpListener::bind(&config.listen_addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!(addr = %config.listen_addr, error = %e, "failed to bind");
            std::process::exit(1);
        }
    };

    info!(
        addr = %config.listen_addr,
        sandbox = %config.sandbox.sandbox_dir().display(),
        backend = %config.backend_url,
        "structor-gateway listening"
    );

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error = %e, "server error");
        std::process::exit(1);
    }
}

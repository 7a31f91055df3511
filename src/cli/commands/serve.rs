use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing::{debug, error, info, trace};

use crate::config::initialize_app_state_with_url;
use crate::router::create_router;

/// Run the HTTP server until it exits.
pub async fn serve(database_url: &str, bind_address: &str) -> Result<()> {
    trace!("Entering serve function");

    let backend = if database_url.starts_with("postgres") {
        "postgresql"
    } else {
        "sqlite"
    };
    info!("Gastor starting up ({} backend)", backend);
    debug!("Database URL: {}", database_url);

    let state = initialize_app_state_with_url(database_url)
        .await
        .context("Failed to initialize application state")?;
    debug!("Application state initialized");

    let app = create_router(state);

    trace!("Binding TCP listener on {}", bind_address);
    let listener = match TcpListener::bind(bind_address).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind to {}: {}", bind_address, e);
            return Err(e.into());
        }
    };

    info!("Gastor API listening on http://{}", bind_address);
    info!("Swagger UI at http://{}/swagger-ui", bind_address);
    info!("Prometheus metrics at http://{}/metrics", bind_address);

    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {}", e);
        return Err(e.into());
    }

    info!("Server shutdown gracefully");
    Ok(())
}

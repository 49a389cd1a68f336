use anyhow::Result;
use tokio::net::TcpListener;
use tracing::{debug, error, info, trace, warn};

use crate::router::create_router;
use crate::schemas::AppState;

pub async fn serve(bind_address: &str, assets_dir: &str) -> Result<()> {
    trace!("Entering serve function");
    info!("SmartFin frontend host starting up");
    debug!("Assets directory: {}", assets_dir);
    debug!("Bind address: {}", bind_address);

    let state = AppState::new(assets_dir);
    if !state.has_index() {
        warn!(
            "No index.html in {}; build the frontend first (trunk build in workspace/frontend)",
            assets_dir
        );
    }

    // Create router
    trace!("Creating application router");
    let app = create_router(state);
    debug!("Router created successfully");

    // Start server
    info!("Starting server on {}", bind_address);
    let listener = match TcpListener::bind(bind_address).await {
        Ok(listener) => {
            debug!("Successfully bound to address: {}", bind_address);
            listener
        }
        Err(e) => {
            error!("Failed to bind to address {}: {}", bind_address, e);
            return Err(e.into());
        }
    };

    info!("SmartFin frontend available on http://{}", bind_address);

    trace!("Starting axum server");
    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {}", e);
        return Err(e.into());
    }

    info!("Server shutdown gracefully");
    Ok(())
}

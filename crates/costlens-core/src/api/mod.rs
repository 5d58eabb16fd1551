//! REST API implementation
//!
//! This module provides the read-only HTTP API over a loaded event set.

pub mod handlers;
pub mod routes;

pub use handlers::AppState;
pub use routes::create_router;

use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::engine::CostModel;
use crate::error::Result;
use crate::models::EventRecord;

/// HTTP API server
pub struct HttpServer {
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server
    pub fn new(events: Vec<EventRecord>, cost: CostModel) -> Self {
        Self {
            state: AppState {
                events: Arc::new(events),
                cost: Arc::new(cost),
            },
        }
    }

    /// Start the HTTP server and run until Ctrl+C
    pub async fn serve(self, addr: &str) -> Result<()> {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        let app = create_router(self.state)
            .layer(TraceLayer::new_for_http())
            .layer(CompressionLayer::new())
            .layer(cors);

        let listener = TcpListener::bind(addr).await?;

        info!("HTTP server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = tokio::signal::ctrl_c().await;
                info!("Ctrl+C received, shutting down...");
            })
            .await?;

        Ok(())
    }
}

//! HTTP/JSON transport for the staymap server
//!
//! # Endpoints
//!
//! - `GET /api/search_rectangle` - available listings in a box, filtered
//! - `GET /api/stats`            - count and average rating in a box
//! - `GET /api/nearest_higher/{id}` - closest listing rated above `id`
//! - `GET /api/listings`         - listing preview, `?limit=N`
//!
//! # Example
//!
//! ```ignore
//! use staymap_server::run_server;
//!
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:5000").await?;
//! run_server(listener, catalog, shutdown).await?;
//! ```

use crate::handler;
use crate::reader::Reader;
use axum::Router;
use axum::routing::get;
use staymap::Catalog;
use std::future::Future;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Build the API router over `catalog`.
pub fn router(catalog: Arc<Catalog>) -> Router {
    Router::new()
        .route("/api/search_rectangle", get(handler::search_rectangle))
        .route("/api/stats", get(handler::stats))
        .route("/api/nearest_higher/:id", get(handler::nearest_higher))
        .route("/api/listings", get(handler::listings))
        .fallback(handler::no_route)
        .method_not_allowed_fallback(handler::method_not_allowed)
        .layer(TraceLayer::new_for_http())
        .with_state(Reader::new(catalog))
}

/// Serve the API on `listener` until `shutdown` resolves.
pub async fn run_server(
    listener: tokio::net::TcpListener,
    catalog: Arc<Catalog>,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> anyhow::Result<()> {
    info!(
        "staymap HTTP server listening on {} ({} listings)",
        listener.local_addr()?,
        catalog.len()
    );

    axum::serve(listener, router(catalog))
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("Shutdown signal received, server stopped");
    Ok(())
}

//! HTTP server setup.
//!
//! # Responsibilities
//! - Create the Axum Router with the single download route
//! - Wire up middleware (tracing)
//! - Decide per request whether the session should end
//!
//! Anything off the route falls through to Axum's default 404 and leaves the
//! session running.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::Request,
    response::Response,
    routing::get,
    Router,
};
use tower_http::trace::TraceLayer;

use crate::http::response::{serve_download, with_guard, DownloadGuard};
use crate::http::route::DownloadTarget;
use crate::lifecycle::Shutdown;

/// State injected into the download handler.
#[derive(Clone)]
pub struct DownloadState {
    pub target: Arc<DownloadTarget>,
    pub keep: bool,
    pub shutdown: Shutdown,
}

/// Build the router for one session.
///
/// The returned router must be served with
/// `into_make_service_with_connect_info::<SocketAddr>()`.
pub fn build_router(target: DownloadTarget, keep: bool, shutdown: Shutdown) -> Router {
    let route = target.route();

    tracing::debug!(
        route = %route,
        file = %target.path().display(),
        "Registering download route"
    );

    let state = DownloadState {
        target: Arc::new(target),
        keep,
        shutdown,
    };

    Router::new()
        .route(&route, get(download_handler))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Serve the shared file and, unless `keep` is set, end the session once the
/// response is written, whatever its status.
async fn download_handler(
    State(state): State<DownloadState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    request: Request<Body>,
) -> Response {
    tracing::info!(peer = %peer, "Serving to {peer}");

    let method = request.method().clone();
    let response = serve_download(&state.target, request).await;

    tracing::debug!(
        peer = %peer,
        method = %method,
        status = %response.status(),
        "Download response ready"
    );

    if !state.keep {
        with_guard(response, DownloadGuard::new(state.shutdown.clone()))
    } else {
        response
    }
}

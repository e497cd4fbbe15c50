//! Download responses.
//!
//! # Responsibilities
//! - Stream the file through `ServeFile` (content type, ranges, 404)
//! - Mark the response as an attachment named after the file
//! - Fire the shutdown token once a one-shot response has been written
//!
//! # Design Decisions
//! - The token fires when the response body is dropped, i.e. after the last
//!   chunk went out or the client hung up mid-transfer

use axum::{
    body::Body,
    http::{header, HeaderValue, Request},
    response::Response,
};
use futures_util::StreamExt;
use tower::ServiceExt;
use tower_http::services::ServeFile;

use crate::http::route::DownloadTarget;
use crate::lifecycle::Shutdown;

/// `Content-Disposition` value for `file_name`.
///
/// Returns `None` if the name contains bytes a header cannot carry.
pub fn content_disposition(file_name: &str) -> Option<HeaderValue> {
    HeaderValue::from_str(&format!("attachment; filename={file_name}")).ok()
}

/// Serve the target file for `request`.
pub async fn serve_download(target: &DownloadTarget, request: Request<Body>) -> Response {
    let response = match ServeFile::new(target.path()).oneshot(request).await {
        Ok(response) => response,
        Err(never) => match never {},
    };
    let mut response = response.map(Body::new);

    match content_disposition(target.file_name()) {
        Some(value) => {
            response
                .headers_mut()
                .insert(header::CONTENT_DISPOSITION, value);
        }
        None => {
            tracing::warn!(
                file_name = %target.file_name(),
                "File name not representable in Content-Disposition, header omitted"
            );
        }
    }

    response
}

/// Triggers shutdown when dropped.
#[derive(Debug)]
pub struct DownloadGuard {
    shutdown: Shutdown,
}

impl DownloadGuard {
    pub fn new(shutdown: Shutdown) -> Self {
        Self { shutdown }
    }
}

impl Drop for DownloadGuard {
    fn drop(&mut self) {
        if self.shutdown.trigger() {
            tracing::info!("Keep not specified, shutting down...");
        }
    }
}

/// Tie `guard` to the lifetime of the response body.
pub fn with_guard(response: Response, guard: DownloadGuard) -> Response {
    let (parts, body) = response.into_parts();
    let stream = body.into_data_stream().map(move |chunk| {
        let _alive = &guard;
        chunk
    });
    Response::from_parts(parts, Body::from_stream(stream))
}

//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum router with the single download route)
//!     → route.rs (route segment derived from the file's base name)
//!     → response.rs (ServeFile + attachment header + completion guard)
//!     → Send to client
//! ```

pub mod response;
pub mod route;
pub mod server;

pub use route::{encode_segment, DownloadTarget};
pub use server::build_router;

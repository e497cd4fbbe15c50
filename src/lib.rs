//! Share one file over the local network behind a terminal QR code.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod net;
pub mod observability;
pub mod terminal;

pub use config::ServeConfig;
pub use lifecycle::{FileServer, ServeError, ServeHandle, SessionState, Shutdown};
pub use terminal::QrStyle;

//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! lifecycle, http, net
//!     → tracing events with structured fields
//!     → logging.rs (EnvFilter + fmt layer on stderr)
//! ```
//!
//! # Design Decisions
//! - stdout belongs to the URL and the QR code, logs go to stderr
//! - Verbosity comes from RUST_LOG, with a quiet-enough default

pub mod logging;

//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! command line (clap)
//!     → ServeConfig (schema.rs)
//!     → validation.rs (semantic checks)
//!     → ServeConfig (validated, immutable)
//!     → handed to the lifecycle and the QR presenter
//! ```
//!
//! # Design Decisions
//! - Config is immutable once built; there is no reload
//! - All fields have defaults so tests only set what they care about
//! - No config files: the command line is the only source

pub mod schema;
pub mod validation;

pub use schema::ServeConfig;
pub use validation::ValidationError;

//! Configuration validation.
//!
//! # Responsibilities
//! - Check that the target path names a file (has a base name)
//! - Check value ranges (shutdown grace > 0)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - A missing file is not an error here: the file server answers 404
//! - Runs before the listener is bound

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::config::schema::ServeConfig;

/// A semantic problem with a [`ServeConfig`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The path has no final component to derive a route from.
    #[error("{} has no file name to serve", .0.display())]
    NoFileName(PathBuf),

    /// Shutdown would be forced immediately.
    #[error("shutdown grace period must be positive, got {0:?}")]
    ZeroShutdownGrace(Duration),
}

/// Validate a serve config, collecting every problem found.
pub fn validate_config(config: &ServeConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.file.file_name().is_none() {
        errors.push(ValidationError::NoFileName(config.file.clone()));
    }

    if config.shutdown_grace.is_zero() {
        errors.push(ValidationError::ZeroShutdownGrace(config.shutdown_grace));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

impl ServeConfig {
    /// Validate this config. See [`validate_config`].
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        validate_config(self)
    }
}

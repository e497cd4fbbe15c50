//! Configuration schema definitions.
//!
//! One serve session is fully described by a [`ServeConfig`].

use std::path::PathBuf;
use std::time::Duration;

use crate::terminal::QrStyle;

/// How long in-flight downloads may keep running once shutdown starts.
pub const DEFAULT_SHUTDOWN_GRACE: Duration = Duration::from_secs(10);

/// Root configuration for a serve session.
#[derive(Debug, Clone)]
pub struct ServeConfig {
    /// File to share.
    pub file: PathBuf,

    /// Port to bind. `0` lets the OS pick an ephemeral port.
    pub port: u16,

    /// Keep serving after the first download.
    pub keep: bool,

    /// Render the QR code with one full block per module.
    pub big: bool,

    /// Upper bound on graceful shutdown before the accept loop is aborted.
    pub shutdown_grace: Duration,
}

impl ServeConfig {
    /// Create a config for `file` with every other field at its default.
    pub fn new(file: impl Into<PathBuf>) -> Self {
        Self {
            file: file.into(),
            ..Self::default()
        }
    }

    /// QR rendering mode selected by `big`.
    pub fn qr_style(&self) -> QrStyle {
        if self.big {
            QrStyle::Big
        } else {
            QrStyle::Compact
        }
    }
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            file: PathBuf::new(),
            port: 0,
            keep: false,
            big: false,
            shutdown_grace: DEFAULT_SHUTDOWN_GRACE,
        }
    }
}

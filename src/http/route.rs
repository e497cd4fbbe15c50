//! Route derivation for the shared file.
//!
//! The route is the file's base name with everything outside the RFC 3986
//! unreserved set percent-encoded, so it survives any client and decodes back
//! to the exact name.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use url::Url;

use crate::config::ValidationError;

/// Characters escaped in the route segment: everything but `A-Za-z0-9-_.~`.
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Percent-encode a file name for use as a single path segment.
pub fn encode_segment(name: &str) -> String {
    utf8_percent_encode(name, SEGMENT).to_string()
}

/// The file being shared and the route it is served on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadTarget {
    path: PathBuf,
    file_name: String,
    segment: String,
}

impl DownloadTarget {
    /// Derive the target for `path`. Fails if the path has no base name.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, ValidationError> {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .ok_or_else(|| ValidationError::NoFileName(path.to_path_buf()))?
            .to_string_lossy()
            .into_owned();
        let segment = encode_segment(&file_name);

        Ok(Self {
            path: path.to_path_buf(),
            file_name,
            segment,
        })
    }

    /// Path on disk.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Base name, as sent in `Content-Disposition`.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Encoded base name, without the leading slash.
    pub fn segment(&self) -> &str {
        &self.segment
    }

    /// Router path, e.g. `/my%20report.pdf`.
    pub fn route(&self) -> String {
        format!("/{}", self.segment)
    }

    /// Full URL for a listener bound at `addr`.
    pub fn public_url(&self, addr: SocketAddr) -> Result<Url, url::ParseError> {
        // SocketAddr's Display brackets IPv6 hosts.
        Url::parse(&format!("http://{addr}/{}", self.segment))
    }
}

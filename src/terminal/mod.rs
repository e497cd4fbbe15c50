//! Terminal presentation.
//!
//! Renders the download URL as a QR code made of block characters.

pub mod qr;

pub use qr::{render, render_to_string, QrStyle, RenderError};

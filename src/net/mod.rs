//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! Startup
//!     → address.rs (which local IP do LAN peers reach us on?)
//!     → listener.rs (bind ip:port, report the concrete bound address)
//!     → Hand off to HTTP layer
//! ```
//!
//! # Design Decisions
//! - Address discovery is a routing-table lookup, no packets leave the host
//! - Binding reports the real port so port 0 needs no follow-up query

pub mod address;
pub mod listener;

pub use address::{outbound_ip, outbound_ip_via, AddressError};
pub use listener::{Listener, ListenerError};

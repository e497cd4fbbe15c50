//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (session.rs):
//!     Derive route → Bind listener → Spawn accept loop + shutdown waiter
//!
//! Shutdown (shutdown.rs):
//!     Download finished / Ctrl+C → token fires → Stop accepting
//!     → Drain (bounded) → Completion outcome
//!
//! Signals (signals.rs):
//!     SIGINT → Trigger graceful shutdown
//! ```
//!
//! # Design Decisions
//! - One session, one route, one listener; shutdown is terminal
//! - Every signal between tasks is single-fire (oneshot / cancellation token)
//! - Shutdown has timeout: the accept loop is aborted after the grace period

pub mod session;
pub mod shutdown;
pub mod signals;
pub mod state;

pub use session::{FileServer, ServeError, ServeHandle};
pub use shutdown::Shutdown;
pub use state::SessionState;

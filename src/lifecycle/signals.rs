//! OS signal handling.
//!
//! # Responsibilities
//! - Wait for Ctrl+C (SIGINT)
//! - Leave the decision of what to do with it to the caller
//!
//! # Design Decisions
//! - Uses Tokio's signal handling (async-safe)
//! - Repeated Ctrl+C presses are harmless: shutdown is idempotent

/// Resolves on the next Ctrl+C.
///
/// If the handler cannot be installed this never resolves, leaving the
/// session to end through its own completion.
pub async fn interrupt() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Interrupt received");
}

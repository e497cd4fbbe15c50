//! Serve session: bind, serve, shut down, report.
//!
//! # Responsibilities
//! - Bind the listener and compute the public URL
//! - Run the accept loop on its own task
//! - Run a shutdown waiter that bounds graceful shutdown
//! - Deliver exactly one completion outcome
//!
//! # Design Decisions
//! - The router is built per session, never registered globally
//! - Completion travels over a oneshot, so it cannot be sent twice
//! - A timed-out drain aborts the accept loop and still reports

use std::io;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use thiserror::Error;
use tokio::sync::{oneshot, watch};
use tokio::task::{JoinError, JoinHandle};
use url::Url;

use crate::config::validation::validate_config;
use crate::config::{ServeConfig, ValidationError};
use crate::http::{build_router, DownloadTarget};
use crate::lifecycle::shutdown::Shutdown;
use crate::lifecycle::state::SessionState;
use crate::net::{AddressError, Listener, ListenerError};

/// Errors that can end or prevent a serve session.
#[derive(Debug, Error)]
pub enum ServeError {
    /// The target path cannot be served.
    #[error("invalid target: {0}")]
    InvalidTarget(#[from] ValidationError),

    /// The session config failed validation.
    #[error("invalid config: {}", join_errors(.0))]
    InvalidConfig(Vec<ValidationError>),

    /// No outbound address could be determined.
    #[error("failed to determine local ip address: {0}")]
    AddressResolution(#[from] AddressError),

    /// The listener could not be bound.
    #[error(transparent)]
    Bind(#[from] ListenerError),

    /// The bound address did not form a valid URL.
    #[error("invalid public url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The accept loop ended other than through a requested shutdown.
    #[error("server terminated abnormally: {0}")]
    AbnormalTermination(String),

    /// In-flight requests did not drain within the grace period.
    #[error("server did not shut down within {0:?}, connections were dropped")]
    ShutdownTimedOut(Duration),

    /// The shutdown waiter went away without reporting.
    #[error("server stopped without reporting an outcome")]
    CompletionLost,

    /// The outcome was already taken by an earlier call.
    #[error("server outcome already delivered")]
    AlreadyFinished,
}

/// Entry point for starting serve sessions.
pub struct FileServer;

impl FileServer {
    /// Start serving `config.file` on `bind_ip:config.port`.
    ///
    /// Returns once the listener is bound. The accept loop and the shutdown
    /// waiter keep running in the background; use [`ServeHandle::started`]
    /// and [`ServeHandle::finished`] to follow them.
    pub async fn start(bind_ip: IpAddr, config: &ServeConfig) -> Result<ServeHandle, ServeError> {
        validate_config(config).map_err(ServeError::InvalidConfig)?;
        let target = DownloadTarget::new(&config.file)?;

        let (state_tx, state_rx) = watch::channel(SessionState::Created);
        let state_tx = Arc::new(state_tx);

        let listener = Listener::bind(SocketAddr::new(bind_ip, config.port)).await?;
        let local_addr = listener.local_addr();
        let url = target.public_url(local_addr)?;
        advance(&state_tx, SessionState::Bound);

        tracing::info!(
            address = %local_addr,
            file = %config.file.display(),
            route = %target.route(),
            keep = config.keep,
            "Session bound"
        );

        let shutdown = Shutdown::new();
        let router = build_router(target, config.keep, shutdown.clone());

        let (started_tx, started_rx) = oneshot::channel();
        let (completion_tx, completion_rx) = oneshot::channel();

        let accept = tokio::spawn(accept_loop(
            listener,
            router,
            shutdown.clone(),
            started_tx,
            Arc::clone(&state_tx),
        ));
        tokio::spawn(shutdown_waiter(
            accept,
            shutdown.clone(),
            config.shutdown_grace,
            state_tx,
            completion_tx,
        ));

        Ok(ServeHandle {
            url,
            local_addr,
            shutdown,
            state: state_rx,
            started: Some(started_rx),
            completion: Some(completion_rx),
        })
    }
}

/// Handle to a running serve session.
#[derive(Debug)]
pub struct ServeHandle {
    url: Url,
    local_addr: SocketAddr,
    shutdown: Shutdown,
    state: watch::Receiver<SessionState>,
    started: Option<oneshot::Receiver<()>>,
    completion: Option<oneshot::Receiver<Result<(), ServeError>>>,
}

impl ServeHandle {
    /// URL other devices can download the file from.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Address the listener is bound to.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// A trigger for this session's shutdown.
    pub fn shutdown_handle(&self) -> Shutdown {
        self.shutdown.clone()
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        *self.state.borrow()
    }

    /// Watch lifecycle transitions.
    pub fn subscribe_state(&self) -> watch::Receiver<SessionState> {
        self.state.clone()
    }

    /// Wait until the accept loop is running.
    ///
    /// Returns immediately on later calls.
    pub async fn started(&mut self) {
        if let Some(started) = self.started.take() {
            // A dropped sender means the accept loop died first;
            // `finished` reports why.
            let _ = started.await;
        }
    }

    /// Wait for the session outcome.
    ///
    /// Cancel-safe, so it can sit in a `select!` loop. Once the outcome has
    /// been returned, further calls return [`ServeError::AlreadyFinished`].
    pub async fn finished(&mut self) -> Result<(), ServeError> {
        let Some(completion) = self.completion.as_mut() else {
            return Err(ServeError::AlreadyFinished);
        };
        let outcome = completion.await.unwrap_or(Err(ServeError::CompletionLost));
        self.completion = None;
        outcome
    }
}

/// Move the session forward, ignoring out-of-order or backward transitions.
fn advance(state: &watch::Sender<SessionState>, next: SessionState) {
    state.send_if_modified(|current| {
        if current.can_transition_to(next) {
            tracing::debug!(from = %current, to = %next, "Session state changed");
            *current = next;
            true
        } else {
            false
        }
    });
}

async fn accept_loop(
    listener: Listener,
    router: Router,
    shutdown: Shutdown,
    started: oneshot::Sender<()>,
    state: Arc<watch::Sender<SessionState>>,
) -> io::Result<()> {
    tracing::info!(address = %listener.local_addr(), "Serving...");
    advance(&state, SessionState::Serving);
    let _ = started.send(());

    let app = router.into_make_service_with_connect_info::<SocketAddr>();
    let result = axum::serve(listener.into_inner(), app)
        .with_graceful_shutdown(shutdown.triggered_owned())
        .await;

    tracing::info!("Server finished.");
    result
}

async fn shutdown_waiter(
    mut accept: JoinHandle<io::Result<()>>,
    shutdown: Shutdown,
    grace: Duration,
    state: Arc<watch::Sender<SessionState>>,
    completion: oneshot::Sender<Result<(), ServeError>>,
) {
    let stopped_early = tokio::select! {
        biased;
        _ = shutdown.triggered() => None,
        joined = &mut accept => Some(joined),
    };

    advance(&state, SessionState::ShuttingDown);

    let outcome = match stopped_early {
        // An idle server can drain before this task is polled again.
        Some(joined) if shutdown.is_triggered() => {
            tracing::info!("Shutting down...");
            joined_outcome(joined)
        }
        Some(joined) => {
            tracing::error!("Accept loop stopped without a shutdown request");
            match joined_outcome(joined) {
                Ok(()) => Err(ServeError::AbnormalTermination(
                    "accept loop stopped unexpectedly".to_string(),
                )),
                Err(e) => Err(e),
            }
        }
        None => {
            tracing::info!(grace_secs = grace.as_secs_f64(), "Shutting down...");
            match tokio::time::timeout(grace, &mut accept).await {
                Ok(joined) => joined_outcome(joined),
                Err(_) => {
                    tracing::warn!(
                        grace_secs = grace.as_secs_f64(),
                        "Graceful shutdown timed out, aborting accept loop"
                    );
                    accept.abort();
                    Err(ServeError::ShutdownTimedOut(grace))
                }
            }
        }
    };

    advance(&state, SessionState::Closed);
    match &outcome {
        Ok(()) => tracing::info!("Shut down."),
        Err(e) => tracing::warn!(error = %e, "Shut down."),
    }

    // The receiver may be gone if the handle was dropped.
    let _ = completion.send(outcome);
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn joined_outcome(joined: Result<io::Result<()>, JoinError>) -> Result<(), ServeError> {
    match joined {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => Err(ServeError::AbnormalTermination(e.to_string())),
        Err(e) => Err(ServeError::AbnormalTermination(e.to_string())),
    }
}

//! qrshare
//!
//! Serves a single file over HTTP on the local network and prints a QR code
//! of its URL, so a phone on the same network can download it.
//!
//! # Architecture Overview
//!
//! ```text
//!   outbound_ip() ──▶ FileServer::start ──▶ ServeHandle
//!                       │                     │ started()
//!                       │ accept loop         ▼
//!                       │ shutdown waiter   print URL + QR
//!                       ▼                     │
//!                    GET /<name> ──(no --keep)──▶ Shutdown ◀── Ctrl+C
//!                                                  │
//!                                                  ▼
//!                                            finished() ──▶ exit
//! ```

use std::io;
use std::path::PathBuf;

use clap::{CommandFactory, Parser};

use qrshare::config::ServeConfig;
use qrshare::lifecycle::{signals, FileServer, ServeError};
use qrshare::net::outbound_ip;
use qrshare::observability::logging;
use qrshare::terminal;

#[derive(Parser, Debug)]
#[command(name = "qrshare")]
#[command(about = "Share a file on the local network via a terminal QR code", long_about = None)]
struct Cli {
    /// Keep serving after the first download; stop with Ctrl+C
    #[arg(long)]
    keep: bool,

    /// Port to listen on (default: chosen by the OS)
    #[arg(long, value_name = "N", default_value_t = 0)]
    port: u16,

    /// Draw the QR code with bigger "pixels"
    #[arg(long)]
    big: bool,

    /// File to serve
    #[arg(value_name = "FILENAME")]
    files: Vec<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let file = match <[PathBuf; 1]>::try_from(cli.files) {
        Ok([file]) => file,
        Err(_) => {
            Cli::command().print_help()?;
            return Ok(());
        }
    };

    logging::init();

    let config = ServeConfig {
        file,
        port: cli.port,
        keep: cli.keep,
        big: cli.big,
        ..ServeConfig::default()
    };

    if let Err(e) = run(config).await {
        println!("{e}");
    }

    Ok(())
}

/// Everything that can stop `run` early, ready for printing.
#[derive(Debug, thiserror::Error)]
enum RunError {
    #[error("{}", join_errors(.0))]
    Config(Vec<qrshare::config::ValidationError>),

    #[error("failed to start server: {0}")]
    Start(ServeError),

    #[error(transparent)]
    Serve(ServeError),
}

fn join_errors(errors: &[qrshare::config::ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

async fn run(config: ServeConfig) -> Result<(), RunError> {
    config.validate().map_err(RunError::Config)?;

    let ip = outbound_ip()
        .map_err(|e| RunError::Start(ServeError::AddressResolution(e)))?;
    let mut handle = FileServer::start(ip, &config)
        .await
        .map_err(RunError::Start)?;

    handle.started().await;

    println!("{} served at {}", config.file.display(), handle.url());

    {
        let mut stdout = io::stdout().lock();
        if let Err(e) = terminal::render(handle.url().as_str(), config.qr_style(), &mut stdout) {
            tracing::warn!(error = %e, "Could not render QR code");
        }
    }

    let shutdown = handle.shutdown_handle();
    loop {
        tokio::select! {
            _ = signals::interrupt() => {
                shutdown.trigger();
            }
            outcome = handle.finished() => {
                return outcome.map_err(RunError::Serve);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_all_options() {
        let cli = Cli::try_parse_from(["qrshare", "--keep", "--port", "9000", "--big", "myreport.pdf"])
            .unwrap();
        assert!(cli.keep);
        assert!(cli.big);
        assert_eq!(cli.port, 9000);
        assert_eq!(cli.files, vec![PathBuf::from("myreport.pdf")]);
    }

    #[test]
    fn defaults_to_os_assigned_port() {
        let cli = Cli::try_parse_from(["qrshare", "file.txt"]).unwrap();
        assert!(!cli.keep);
        assert!(!cli.big);
        assert_eq!(cli.port, 0);
    }

    #[test]
    fn wrong_positional_count_still_parses() {
        // Usage is printed by `main`, not by clap.
        assert!(Cli::try_parse_from(["qrshare"]).unwrap().files.is_empty());
        assert_eq!(Cli::try_parse_from(["qrshare", "a", "b"]).unwrap().files.len(), 2);
    }

    #[test]
    fn config_errors_are_joined() {
        let err = RunError::Config(vec![
            qrshare::config::ValidationError::NoFileName(PathBuf::from("/")),
            qrshare::config::ValidationError::ZeroShutdownGrace(std::time::Duration::ZERO),
        ]);
        let text = err.to_string();
        assert!(text.contains("has no file name"));
        assert!(text.contains(", shutdown grace period"));
    }
}

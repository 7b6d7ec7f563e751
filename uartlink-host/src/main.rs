//! uartlink binary
//!
//! Reads one message, frames it, sends it across a loopback UART, decodes
//! it on the far side and echoes it back.

use std::io::{self, BufRead};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};
use uartlink_host::session::trim_line;
use uartlink_host::{HostConfig, Outcome, Overrides};
use uartlink_protocol::MAX_PAYLOAD_SIZE;

/// UART link packet demo
#[derive(Parser, Debug)]
#[command(name = "uartlink")]
#[command(about = "Frame, send, decode and echo one packet over a simulated UART")]
#[command(version)]
struct Args {
    /// Message to send; read one line from stdin when omitted
    message: Option<String>,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Reject frames shorter than 4 bytes, like the reference receiver
    #[arg(long)]
    legacy_min_len: bool,

    /// Do not echo the received packet
    #[arg(long)]
    no_echo: bool,
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    match run(args) {
        Ok(Outcome::Accepted(_)) => ExitCode::SUCCESS,
        Ok(Outcome::Rejected(_)) => ExitCode::FAILURE,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> uartlink_host::Result<Outcome> {
    if let Some(path) = &args.config {
        tracing::info!("Loading config from {}", path.display());
    }
    let overrides = Overrides {
        legacy_min_len: args.legacy_min_len,
        no_echo: args.no_echo,
    };
    let config = HostConfig::resolve(args.config.as_deref(), overrides)?;
    tracing::debug!(?config, "effective configuration");

    let message = match args.message {
        Some(message) => message,
        None => {
            eprint!("Enter data to send (max {} chars): ", MAX_PAYLOAD_SIZE);
            let mut line = String::new();
            io::stdin().lock().read_line(&mut line)?;
            trim_line(&line).to_owned()
        }
    };

    let stdout = io::stdout();
    let exchange = uartlink_host::run(message.as_bytes(), &config, &mut stdout.lock())?;
    Ok(exchange.outcome)
}

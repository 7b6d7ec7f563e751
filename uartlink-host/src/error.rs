//! Error types for the host side of the link

use std::path::PathBuf;

use thiserror::Error;
use uartlink_protocol::{DecodeError, PacketError};

/// Result type alias using HostError
pub type Result<T> = std::result::Result<T, HostError>;

/// Configuration loading failures
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Failures while moving a packet over the UART
#[derive(Debug, Error)]
pub enum LinkError {
    #[error("UART error: {0}")]
    Uart(String),

    #[error("incomplete frame: expected {expected} more bytes, line gave {got}")]
    Incomplete { expected: usize, got: usize },

    #[error("invalid packet: {0}")]
    Decode(#[from] DecodeError),
}

/// Top-level error for the host binary
#[derive(Debug, Error)]
pub enum HostError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Link(#[from] LinkError),

    #[error("packet error: {0}")]
    Packet(#[from] PacketError),
}

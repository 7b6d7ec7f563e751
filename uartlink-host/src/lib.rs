//! Host side of the UART link
//!
//! Wires the packet codec from `uartlink-protocol` to a UART from
//! `uartlink-hal`:
//!
//! - [`config`] - TOML configuration
//! - [`link`] - send / receive / echo of single packets
//! - [`session`] - the build, send, receive, echo exchange run by the binary

pub mod config;
pub mod error;
pub mod link;
pub mod session;

pub use config::{HostConfig, Overrides};
pub use error::{ConfigError, HostError, LinkError, Result};
pub use link::PacketLink;
pub use session::{run, Exchange, Outcome};

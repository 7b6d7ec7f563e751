//! Configuration for the host link
//!
//! Loaded from an optional TOML file; every key has a default.
//!
//! ```toml
//! [uart]
//! baudrate = 115200
//! data_bits = "eight"
//! parity = "none"
//! stop_bits = "one"
//!
//! [decode]
//! min_frame_len = 3
//!
//! [link]
//! echo = true
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;
use uartlink_hal::UartConfig;
use uartlink_protocol::{DecodeConfig, LEGACY_MIN_FRAME_SIZE, MIN_FRAME_SIZE};

use crate::error::ConfigError;

/// Main configuration for the host link
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HostConfig {
    /// Serial line settings
    pub uart: UartConfig,
    /// Receiver validation settings
    pub decode: DecodeSection,
    /// Link behaviour
    pub link: LinkSection,
}

/// `[decode]` table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DecodeSection {
    /// Shortest buffer the receiver will look at
    pub min_frame_len: usize,
}

impl Default for DecodeSection {
    fn default() -> Self {
        Self {
            min_frame_len: MIN_FRAME_SIZE,
        }
    }
}

/// `[link]` table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LinkSection {
    /// Send each received packet back to the peer
    pub echo: bool,
}

impl Default for LinkSection {
    fn default() -> Self {
        Self { echo: true }
    }
}

/// Command-line switches layered over the file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Overrides {
    /// Force the 4-byte minimum frame length
    pub legacy_min_len: bool,
    /// Turn echo off
    pub no_echo: bool,
}

impl HostConfig {
    /// Load `path` if given, else use defaults, then apply `overrides`
    pub fn resolve(path: Option<&Path>, overrides: Overrides) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        config.apply(overrides);
        Ok(config)
    }

    /// Apply command-line switches
    ///
    /// An unset switch leaves the file value alone.
    pub fn apply(&mut self, overrides: Overrides) {
        if overrides.legacy_min_len {
            self.decode.min_frame_len = LEGACY_MIN_FRAME_SIZE;
        }
        if overrides.no_echo {
            self.link.echo = false;
        }
    }

    /// Load and validate a config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse and validate config text
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: HostConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check values serde cannot
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.uart.baudrate == 0 {
            return Err(ConfigError::Invalid("uart.baudrate must be non-zero".into()));
        }
        if !(MIN_FRAME_SIZE..=LEGACY_MIN_FRAME_SIZE).contains(&self.decode.min_frame_len) {
            return Err(ConfigError::Invalid(format!(
                "decode.min_frame_len must be {} or {}, got {}",
                MIN_FRAME_SIZE, LEGACY_MIN_FRAME_SIZE, self.decode.min_frame_len
            )));
        }
        Ok(())
    }

    /// Decoder settings derived from the `[decode]` table
    pub fn decode_config(&self) -> DecodeConfig {
        DecodeConfig {
            min_frame_len: self.decode.min_frame_len,
        }
    }
}

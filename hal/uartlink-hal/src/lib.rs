//! UART Link Hardware Abstraction Layer
//!
//! Serial transport traits that a chip-specific HAL or a host-side port
//! implements, plus an in-memory loopback used to simulate the wire.
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (uartlink-host, firmware)  │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  uartlink-hal (this crate - traits)     │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │  chip UART    │       │ LoopbackUart  │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`uart::UartTx`], [`uart::UartRx`] - Serial communication

#![no_std]
#![deny(unsafe_code)]

pub mod loopback;
pub mod uart;

// Re-export key types at crate root for convenience
pub use loopback::{LoopbackError, LoopbackUart};
pub use uart::{DataBits, Parity, StopBits, Uart, UartConfig, UartRx, UartTx};

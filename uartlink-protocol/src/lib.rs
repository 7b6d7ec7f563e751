//! UART Link Packet Protocol
//!
//! This crate defines the single-frame packet format used on a point-to-point
//! serial link. Each frame is self-contained; there is no sequencing,
//! retransmission or reassembly.
//!
//! # Frame Format
//!
//! ```text
//! ┌───────┬──────┬──────────────┬──────────┐
//! │ START │ LEN  │ DATA         │ CHECKSUM │
//! │ 1B    │ 1B   │ 0–255B       │ 1B       │
//! └───────┴──────┴──────────────┴──────────┘
//! ```
//!
//! START is always `0xAA`. CHECKSUM is `(LEN + sum(DATA)) mod 256`.
//!
//! ```
//! use uartlink_protocol::{decode, encode};
//!
//! let frame = encode(&[0x41]).unwrap();
//! assert_eq!(&frame[..], &[0xAA, 0x01, 0x41, 0x42]);
//!
//! let packet = decode(&frame).unwrap();
//! assert_eq!(packet.data(), &[0x41]);
//! ```

#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![deny(unsafe_code)]

pub mod checksum;
pub mod decode;
pub mod hex;
pub mod packet;

pub use checksum::checksum;
pub use decode::{decode, decode_with, DecodeConfig, DecodeError, DecodeErrorKind};
pub use hex::{HexBytes, HexPacket};
pub use packet::{
    encode, FrameBytes, Packet, PacketError, FRAME_OVERHEAD, HEADER_SIZE, LEGACY_MIN_FRAME_SIZE,
    MAX_FRAME_SIZE, MAX_PAYLOAD_SIZE, MIN_FRAME_SIZE, START_BYTE, TRAILER_SIZE,
};

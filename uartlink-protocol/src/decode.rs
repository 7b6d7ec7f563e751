//! Frame decoding and validation.
//!
//! A buffer is checked in a fixed order and the first failing rule is
//! reported:
//!
//! 1. length below the configured minimum ([`DecodeError::TooShort`])
//! 2. first byte is not [`START_BYTE`] ([`DecodeError::BadStartByte`])
//! 3. fewer than `LEN + 3` bytes ([`DecodeError::Truncated`])
//! 4. checksum byte disagrees ([`DecodeError::ChecksumMismatch`])
//!
//! Bytes past the end of the frame are ignored.

use heapless::Vec;

use crate::checksum::checksum;
use crate::packet::{
    Packet, FRAME_OVERHEAD, HEADER_SIZE, LEGACY_MIN_FRAME_SIZE, MAX_PAYLOAD_SIZE, MIN_FRAME_SIZE,
    START_BYTE,
};

/// Reasons a buffer is rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DecodeError {
    /// Buffer is shorter than the minimum frame size
    TooShort { len: usize, min: usize },
    /// First byte is not the start marker
    BadStartByte { found: u8 },
    /// Declared payload does not fit in the buffer
    Truncated { declared: u8, available: usize },
    /// Checksum byte does not match the payload
    ChecksumMismatch { expected: u8, found: u8 },
}

/// Category of a [`DecodeError`], without detail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DecodeErrorKind {
    TooShort,
    BadStartByte,
    Truncated,
    ChecksumMismatch,
}

impl DecodeError {
    /// Which validation rule failed
    pub fn kind(&self) -> DecodeErrorKind {
        match self {
            DecodeError::TooShort { .. } => DecodeErrorKind::TooShort,
            DecodeError::BadStartByte { .. } => DecodeErrorKind::BadStartByte,
            DecodeError::Truncated { .. } => DecodeErrorKind::Truncated,
            DecodeError::ChecksumMismatch { .. } => DecodeErrorKind::ChecksumMismatch,
        }
    }
}

impl core::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            DecodeError::TooShort { len, min } => {
                write!(f, "frame too short: {} bytes, need at least {}", len, min)
            }
            DecodeError::BadStartByte { found } => {
                write!(f, "bad start byte: 0x{:02X}, expected 0x{:02X}", found, START_BYTE)
            }
            DecodeError::Truncated {
                declared,
                available,
            } => write!(
                f,
                "truncated frame: LEN {} needs {} bytes, got {}",
                declared,
                *declared as usize + FRAME_OVERHEAD,
                available
            ),
            DecodeError::ChecksumMismatch { expected, found } => write!(
                f,
                "checksum mismatch: computed 0x{:02X}, frame carries 0x{:02X}",
                expected, found
            ),
        }
    }
}

impl core::fmt::Display for DecodeErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            DecodeErrorKind::TooShort => "too short",
            DecodeErrorKind::BadStartByte => "bad start byte",
            DecodeErrorKind::Truncated => "truncated",
            DecodeErrorKind::ChecksumMismatch => "checksum mismatch",
        };
        f.write_str(name)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for DecodeError {}

/// Decoder settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DecodeConfig {
    /// Buffers shorter than this are rejected before any other check
    pub min_frame_len: usize,
}

impl DecodeConfig {
    /// Settings matching the reference receiver, which wants at least 4 bytes
    ///
    /// An empty-payload frame is then rejected as too short.
    pub const fn legacy() -> Self {
        Self {
            min_frame_len: LEGACY_MIN_FRAME_SIZE,
        }
    }
}

impl Default for DecodeConfig {
    fn default() -> Self {
        Self {
            min_frame_len: MIN_FRAME_SIZE,
        }
    }
}

// Any LEN byte must fit in a Packet payload
const _: () = assert!(MAX_PAYLOAD_SIZE >= u8::MAX as usize);

/// Decode one frame with default settings
pub fn decode(buf: &[u8]) -> Result<Packet, DecodeError> {
    decode_with(buf, &DecodeConfig::default())
}

/// Decode one frame
pub fn decode_with(buf: &[u8], config: &DecodeConfig) -> Result<Packet, DecodeError> {
    // A configured minimum below the header size would let the indexing
    // below run past the buffer.
    let min = config.min_frame_len.max(HEADER_SIZE);
    if buf.len() < min {
        return Err(DecodeError::TooShort {
            len: buf.len(),
            min,
        });
    }

    if buf[0] != START_BYTE {
        return Err(DecodeError::BadStartByte { found: buf[0] });
    }

    let len = buf[1];
    let payload_end = HEADER_SIZE + len as usize;
    if buf.len() < payload_end + 1 {
        return Err(DecodeError::Truncated {
            declared: len,
            available: buf.len(),
        });
    }

    let payload = &buf[HEADER_SIZE..payload_end];
    let found = buf[payload_end];
    let expected = checksum(len, payload);
    if found != expected {
        return Err(DecodeError::ChecksumMismatch { expected, found });
    }

    let mut data: Vec<u8, MAX_PAYLOAD_SIZE> = Vec::new();
    // LEN is a u8 and the capacity is MAX_PAYLOAD_SIZE (checked at compile
    // time below), so this never fails
    let _ = data.extend_from_slice(payload);

    Ok(Packet::from_validated(buf[0], data, found))
}

//! Packet type and frame encoding.
//!
//! Frame format:
//! - START (1 byte): 0xAA synchronization byte
//! - LEN (1 byte): payload length (0-255)
//! - DATA (LEN bytes): raw payload
//! - CHECKSUM (1 byte): (LEN + sum of DATA) mod 256

use heapless::Vec;

use crate::checksum::checksum;
use crate::hex::HexPacket;

/// Frame synchronization byte
pub const START_BYTE: u8 = 0xAA;

/// Maximum payload size in bytes
///
/// Bounded by the single-byte LEN field.
pub const MAX_PAYLOAD_SIZE: usize = u8::MAX as usize;

/// START + LEN
pub const HEADER_SIZE: usize = 2;

/// CHECKSUM
pub const TRAILER_SIZE: usize = 1;

/// Bytes a frame adds around its payload
pub const FRAME_OVERHEAD: usize = HEADER_SIZE + TRAILER_SIZE;

/// Maximum complete frame size (START + LEN + MAX_PAYLOAD + CHECKSUM)
pub const MAX_FRAME_SIZE: usize = MAX_PAYLOAD_SIZE + FRAME_OVERHEAD;

/// Smallest well-formed frame: an empty payload
pub const MIN_FRAME_SIZE: usize = FRAME_OVERHEAD;

/// Minimum buffer length accepted by the reference receiver
pub const LEGACY_MIN_FRAME_SIZE: usize = 4;

/// Encoded frame bytes
pub type FrameBytes = Vec<u8, MAX_FRAME_SIZE>;

/// Errors that can occur while building or encoding a packet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PacketError {
    /// Payload exceeds maximum allowed size
    PayloadTooLarge,
    /// Buffer too small for encoding
    BufferTooSmall,
}

impl core::fmt::Display for PacketError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            PacketError::PayloadTooLarge => {
                write!(f, "payload exceeds {} bytes", MAX_PAYLOAD_SIZE)
            }
            PacketError::BufferTooSmall => f.write_str("output buffer too small for frame"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for PacketError {}

/// A decoded or constructed packet
///
/// The length is always the payload length and the checksum always matches
/// the payload, so every `Packet` describes a valid frame.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Packet {
    start: u8,
    data: Vec<u8, MAX_PAYLOAD_SIZE>,
    checksum: u8,
}

impl Packet {
    /// Create a new packet carrying the given payload
    pub fn new(payload: &[u8]) -> Result<Self, PacketError> {
        if payload.len() > MAX_PAYLOAD_SIZE {
            return Err(PacketError::PayloadTooLarge);
        }

        let data = Vec::from_slice(payload).map_err(|_| PacketError::PayloadTooLarge)?;
        let checksum = checksum(payload.len() as u8, &data);

        Ok(Self {
            start: START_BYTE,
            data,
            checksum,
        })
    }

    /// Create a packet with no payload
    pub fn empty() -> Self {
        Self {
            start: START_BYTE,
            data: Vec::new(),
            checksum: 0,
        }
    }

    /// Build a packet from fields already validated by the decoder
    pub(crate) fn from_validated(start: u8, data: Vec<u8, MAX_PAYLOAD_SIZE>, checksum: u8) -> Self {
        Self {
            start,
            data,
            checksum,
        }
    }

    /// Start marker
    pub fn start(&self) -> u8 {
        self.start
    }

    /// Payload length, as carried in the LEN byte
    pub fn len(&self) -> u8 {
        self.data.len() as u8
    }

    /// True if the payload is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Payload bytes
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Checksum byte
    pub fn checksum(&self) -> u8 {
        self.checksum
    }

    /// Size of this packet on the wire
    pub fn frame_len(&self) -> usize {
        self.data.len() + FRAME_OVERHEAD
    }

    /// Encode this packet into a byte buffer
    ///
    /// Returns the number of bytes written
    pub fn encode(&self, buffer: &mut [u8]) -> Result<usize, PacketError> {
        let frame_len = self.frame_len();
        if buffer.len() < frame_len {
            return Err(PacketError::BufferTooSmall);
        }

        let len = self.data.len();
        buffer[0] = self.start;
        buffer[1] = len as u8;
        buffer[HEADER_SIZE..HEADER_SIZE + len].copy_from_slice(&self.data);
        buffer[HEADER_SIZE + len] = self.checksum;

        Ok(frame_len)
    }

    /// Encode this packet into a heapless Vec
    pub fn to_frame(&self) -> FrameBytes {
        let mut frame = FrameBytes::new();
        // Capacity is MAX_FRAME_SIZE and the payload is at most MAX_PAYLOAD_SIZE,
        // so none of these pushes can fail.
        let _ = frame.push(self.start);
        let _ = frame.push(self.len());
        let _ = frame.extend_from_slice(&self.data);
        let _ = frame.push(self.checksum);
        frame
    }

    /// Hex view of the frame this packet encodes to
    pub fn hex(&self) -> HexPacket<'_> {
        HexPacket(self)
    }
}

impl Default for Packet {
    fn default() -> Self {
        Self::empty()
    }
}

/// Encode raw application bytes into a frame
pub fn encode(payload: &[u8]) -> Result<FrameBytes, PacketError> {
    Packet::new(payload).map(|packet| packet.to_frame())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_empty_payload() {
        let frame = encode(&[]).unwrap();
        assert_eq!(&frame[..], &[START_BYTE, 0x00, 0x00]);
    }

    #[test]
    fn test_encode_single_byte() {
        let frame = encode(&[0x41]).unwrap();
        assert_eq!(&frame[..], &[0xAA, 0x01, 0x41, 0x42]);
    }

    #[test]
    fn test_encode_into_buffer() {
        let packet = Packet::new(b"Hi").unwrap();
        let mut buffer = [0u8; 10];
        let len = packet.encode(&mut buffer).unwrap();

        assert_eq!(len, 5);
        assert_eq!(buffer[0], START_BYTE);
        assert_eq!(buffer[1], 2); // length
        assert_eq!(&buffer[2..4], b"Hi");
        assert_eq!(buffer[4], (2u16 + b'H' as u16 + b'i' as u16) as u8);
        // Untouched tail
        assert_eq!(&buffer[5..], &[0u8; 5]);
    }

    #[test]
    fn test_encode_buffer_too_small() {
        let packet = Packet::new(&[1, 2, 3]).unwrap();
        let mut buffer = [0u8; 5];
        assert_eq!(packet.encode(&mut buffer), Err(PacketError::BufferTooSmall));

        let mut exact = [0u8; 6];
        assert_eq!(packet.encode(&mut exact), Ok(6));
    }

    #[test]
    fn test_payload_too_large() {
        let large_payload = [0u8; MAX_PAYLOAD_SIZE + 1];
        assert_eq!(Packet::new(&large_payload), Err(PacketError::PayloadTooLarge));
        assert_eq!(encode(&large_payload), Err(PacketError::PayloadTooLarge));
    }

    #[test]
    fn test_max_payload_frame() {
        let payload = [0xFFu8; MAX_PAYLOAD_SIZE];
        let packet = Packet::new(&payload).unwrap();
        let frame = packet.to_frame();

        assert_eq!(frame.len(), MAX_FRAME_SIZE);
        assert_eq!(frame[1], 0xFF);
        // 255 + 255 * 255 = 65280, low byte 0x00
        assert_eq!(frame[MAX_FRAME_SIZE - 1], 0x00);
        assert_eq!(packet.checksum(), 0x00);
    }

    #[test]
    fn test_packet_accessors() {
        let packet = Packet::new(&[0x41]).unwrap();
        assert_eq!(packet.start(), START_BYTE);
        assert_eq!(packet.len(), 1);
        assert!(!packet.is_empty());
        assert_eq!(packet.data(), &[0x41]);
        assert_eq!(packet.checksum(), 0x42);
        assert_eq!(packet.frame_len(), 4);

        let empty = Packet::default();
        assert!(empty.is_empty());
        assert_eq!(empty.len(), 0);
        assert_eq!(empty.checksum(), 0);
        assert_eq!(empty, Packet::new(&[]).unwrap());
    }

    #[test]
    fn test_encode_matches_to_frame() {
        let packet = Packet::new(b"hello, uart").unwrap();
        let mut buffer = [0u8; MAX_FRAME_SIZE];
        let len = packet.encode(&mut buffer).unwrap();
        assert_eq!(&buffer[..len], &packet.to_frame()[..]);
    }
}

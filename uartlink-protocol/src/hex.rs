//! Hex rendering of frames and packets
//!
//! Bytes are written as uppercase two-digit hex separated by single spaces,
//! e.g. `AA 01 41 42`.

use core::fmt;

use crate::packet::Packet;

/// Displays a byte slice as hex
#[derive(Debug, Clone, Copy)]
pub struct HexBytes<'a>(pub &'a [u8]);

impl fmt::Display for HexBytes<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_hex(f, self.0.iter().copied())
    }
}

/// Displays a packet as the frame it encodes to
#[derive(Debug, Clone, Copy)]
pub struct HexPacket<'a>(pub &'a Packet);

impl fmt::Display for HexPacket<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let packet = self.0;
        let bytes = [packet.start(), packet.len()]
            .into_iter()
            .chain(packet.data().iter().copied())
            .chain(core::iter::once(packet.checksum()));
        write_hex(f, bytes)
    }
}

fn write_hex(f: &mut fmt::Formatter<'_>, bytes: impl Iterator<Item = u8>) -> fmt::Result {
    for (i, byte) in bytes.enumerate() {
        if i > 0 {
            f.write_str(" ")?;
        }
        write!(f, "{:02X}", byte)?;
    }
    Ok(())
}

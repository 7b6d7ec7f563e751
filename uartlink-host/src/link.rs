//! Packet link over a UART
//!
//! Moves one packet at a time across any [`Uart`] implementation. A receive
//! reads exactly one frame: the two header bytes, then the declared payload
//! and the checksum. There is no resynchronisation; a corrupt frame is
//! consumed and reported.

use std::fmt::Debug;

use tracing::{debug, warn};
use uartlink_hal::{Uart, UartConfig, UartRx, UartTx};
use uartlink_protocol::{
    decode_with, DecodeConfig, HexBytes, Packet, FRAME_OVERHEAD, HEADER_SIZE, MAX_FRAME_SIZE,
};

use crate::error::LinkError;

/// One end of a point-to-point packet link
#[derive(Debug)]
pub struct PacketLink<U> {
    uart: U,
    decode: DecodeConfig,
    line: UartConfig,
    bytes_sent: usize,
}

impl<U> PacketLink<U>
where
    U: Uart,
    <U as UartTx>::Error: Debug,
    <U as UartRx>::Error: Debug,
{
    pub fn new(uart: U, decode: DecodeConfig) -> Self {
        Self {
            uart,
            decode,
            line: UartConfig::default(),
            bytes_sent: 0,
        }
    }

    /// Use `line` to account for time on the wire
    pub fn with_line(mut self, line: UartConfig) -> Self {
        self.line = line;
        self
    }

    /// Give back the underlying UART
    pub fn into_inner(self) -> U {
        self.uart
    }

    /// Mutable access to the UART, e.g. to inject raw bytes
    pub fn uart_mut(&mut self) -> &mut U {
        &mut self.uart
    }

    /// Bytes transmitted so far
    pub fn bytes_sent(&self) -> usize {
        self.bytes_sent
    }

    /// Time the transmitted bytes occupy the line, in microseconds
    pub fn wire_time_us(&self) -> u64 {
        self.line.transfer_time_us(self.bytes_sent)
    }

    /// Encode and transmit a packet
    ///
    /// Returns the number of bytes put on the wire.
    pub fn send(&mut self, packet: &Packet) -> Result<usize, LinkError> {
        let frame = packet.to_frame();
        self.uart.write_blocking(&frame).map_err(uart_error)?;
        self.uart.flush().map_err(uart_error)?;
        self.bytes_sent += frame.len();

        debug!(
            len = frame.len(),
            wire_us = self.line.transfer_time_us(frame.len()),
            frame = %HexBytes(&frame),
            "sent frame"
        );
        Ok(frame.len())
    }

    /// Read and decode one frame
    pub fn receive(&mut self) -> Result<Packet, LinkError> {
        let mut frame = [0u8; MAX_FRAME_SIZE];

        self.read_into(&mut frame[..HEADER_SIZE])?;
        let total = FRAME_OVERHEAD + frame[1] as usize;
        self.read_into(&mut frame[HEADER_SIZE..total])?;

        let frame = &frame[..total];
        match decode_with(frame, &self.decode) {
            Ok(packet) => {
                debug!(len = packet.len(), frame = %HexBytes(frame), "received frame");
                Ok(packet)
            }
            Err(e) => {
                warn!(error = %e, frame = %HexBytes(frame), "rejected frame");
                Err(e.into())
            }
        }
    }

    /// Send a received packet back unchanged
    pub fn echo(&mut self, packet: &Packet) -> Result<usize, LinkError> {
        debug!(len = packet.len(), "echoing packet");
        self.send(packet)
    }

    fn read_into(&mut self, buf: &mut [u8]) -> Result<(), LinkError> {
        let got = self.uart.read_full(buf).map_err(uart_error)?;
        if got < buf.len() {
            return Err(LinkError::Incomplete {
                expected: buf.len(),
                got,
            });
        }
        Ok(())
    }
}

fn uart_error<E: Debug>(e: E) -> LinkError {
    LinkError::Uart(format!("{:?}", e))
}

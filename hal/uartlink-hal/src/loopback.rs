//! In-memory loopback UART
//!
//! Bytes written to the transmitter are queued and handed back by the
//! receiver in the same order, as if TX were wired to RX.

use heapless::Deque;

use crate::uart::{UartRx, UartTx};

/// Error from loopback operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LoopbackError {
    /// FIFO full, write rejected
    Overflow,
    /// Read requested with nothing queued
    Empty,
}

impl core::fmt::Display for LoopbackError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            LoopbackError::Overflow => f.write_str("loopback FIFO overflow"),
            LoopbackError::Empty => f.write_str("loopback FIFO empty"),
        }
    }
}

/// Loopback UART with an `N`-byte FIFO
#[derive(Debug, Default)]
pub struct LoopbackUart<const N: usize> {
    fifo: Deque<u8, N>,
}

impl<const N: usize> LoopbackUart<N> {
    /// Create an empty loopback
    pub const fn new() -> Self {
        Self { fifo: Deque::new() }
    }

    /// Number of bytes waiting to be read
    pub fn pending(&self) -> usize {
        self.fifo.len()
    }

    /// Drop all queued bytes
    pub fn clear(&mut self) {
        self.fifo.clear();
    }
}

impl<const N: usize> UartTx for LoopbackUart<N> {
    type Error = LoopbackError;

    /// Queue `data` for reading
    ///
    /// The write is all-or-nothing: if `data` does not fit, nothing is queued.
    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        if N - self.fifo.len() < data.len() {
            return Err(LoopbackError::Overflow);
        }
        for &byte in data {
            self.fifo
                .push_back(byte)
                .map_err(|_| LoopbackError::Overflow)?;
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl<const N: usize> UartRx for LoopbackUart<N> {
    type Error = LoopbackError;

    fn read_blocking(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        if buf.is_empty() {
            return Ok(0);
        }
        if self.fifo.is_empty() {
            return Err(LoopbackError::Empty);
        }

        let mut n = 0;
        while n < buf.len() {
            match self.fifo.pop_front() {
                Some(byte) => {
                    buf[n] = byte;
                    n += 1;
                }
                None => break,
            }
        }
        Ok(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bytes_come_back_in_order() {
        let mut uart = LoopbackUart::<8>::new();
        uart.write_blocking(&[1, 2, 3]).unwrap();
        uart.flush().unwrap();
        assert_eq!(uart.pending(), 3);

        let mut buf = [0u8; 2];
        assert_eq!(uart.read_blocking(&mut buf), Ok(2));
        assert_eq!(buf, [1, 2]);
        assert_eq!(uart.read_byte(), Ok(3));
        assert_eq!(uart.pending(), 0);
    }

    #[test]
    fn test_read_empty() {
        let mut uart = LoopbackUart::<4>::new();
        assert_eq!(uart.read_byte(), Err(LoopbackError::Empty));
        assert_eq!(uart.read_blocking(&mut []), Ok(0));
    }

    #[test]
    fn test_overflow_is_all_or_nothing() {
        let mut uart = LoopbackUart::<4>::new();
        uart.write_blocking(&[1, 2, 3]).unwrap();
        assert_eq!(uart.write_blocking(&[4, 5]), Err(LoopbackError::Overflow));
        assert_eq!(uart.pending(), 3);

        uart.write_blocking(&[4]).unwrap();
        assert_eq!(uart.pending(), 4);
    }

    #[test]
    fn test_read_full() {
        let mut uart = LoopbackUart::<8>::new();
        uart.write_blocking(&[9, 8, 7, 6]).unwrap();

        let mut buf = [0u8; 3];
        assert_eq!(uart.read_full(&mut buf), Ok(3));
        assert_eq!(buf, [9, 8, 7]);

        let mut too_many = [0u8; 2];
        assert_eq!(uart.read_full(&mut too_many), Err(LoopbackError::Empty));
    }

    #[test]
    fn test_clear() {
        let mut uart = LoopbackUart::<8>::new();
        uart.write_blocking(&[1, 2]).unwrap();
        uart.clear();
        assert_eq!(uart.pending(), 0);
    }
}

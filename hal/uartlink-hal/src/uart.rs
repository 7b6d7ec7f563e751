//! UART serial communication abstractions
//!
//! Provides blocking traits for serial communication that can be
//! implemented by chip-specific HALs or host serial ports.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// UART transmitter
pub trait UartTx {
    /// Error type for transmit operations
    type Error;

    /// Write data to the UART
    ///
    /// Blocks until all data has been written or an error occurs.
    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error>;

    /// Flush any buffered data
    fn flush(&mut self) -> Result<(), Self::Error>;
}

/// UART receiver
pub trait UartRx {
    /// Error type for receive operations
    type Error;

    /// Read data from the UART
    ///
    /// Returns the number of bytes read, at least one unless `buf` is empty.
    fn read_blocking(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error>;

    /// Read a single byte from the UART
    fn read_byte(&mut self) -> Result<u8, Self::Error> {
        let mut buf = [0u8; 1];
        self.read_blocking(&mut buf)?;
        Ok(buf[0])
    }

    /// Read until `buf` is full
    ///
    /// Stops early if a read returns no bytes. Returns how many bytes were
    /// filled, which is less than `buf.len()` only in that case.
    fn read_full(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        let mut filled = 0;
        while filled < buf.len() {
            let n = self.read_blocking(&mut buf[filled..])?;
            if n == 0 {
                break;
            }
            filled += n;
        }
        Ok(filled)
    }
}

/// Combined UART interface
///
/// For UARTs that provide both TX and RX on a single peripheral.
pub trait Uart: UartTx + UartRx {}

// Blanket implementation
impl<T: UartTx + UartRx> Uart for T {}

/// UART configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct UartConfig {
    /// Baud rate in bits per second
    pub baudrate: u32,
    /// Number of data bits (typically 8)
    pub data_bits: DataBits,
    /// Parity mode
    pub parity: Parity,
    /// Number of stop bits
    pub stop_bits: StopBits,
}

impl Default for UartConfig {
    fn default() -> Self {
        Self {
            baudrate: 115200,
            data_bits: DataBits::Eight,
            parity: Parity::None,
            stop_bits: StopBits::One,
        }
    }
}

impl UartConfig {
    /// Bits on the line per transmitted byte, including start and stop bits
    pub fn bits_per_byte(&self) -> u32 {
        let data = match self.data_bits {
            DataBits::Seven => 7,
            DataBits::Eight => 8,
            DataBits::Nine => 9,
        };
        let parity = match self.parity {
            Parity::None => 0,
            Parity::Even | Parity::Odd => 1,
        };
        let stop = match self.stop_bits {
            StopBits::One => 1,
            StopBits::Two => 2,
        };
        1 + data + parity + stop
    }

    /// Time on the wire for `bytes` bytes, in microseconds
    pub fn transfer_time_us(&self, bytes: usize) -> u64 {
        if self.baudrate == 0 {
            return 0;
        }
        let bits = bytes as u64 * self.bits_per_byte() as u64;
        bits * 1_000_000 / self.baudrate as u64
    }
}

/// Number of data bits per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DataBits {
    Seven,
    Eight,
    Nine,
}

/// Parity mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Parity {
    None,
    Even,
    Odd,
}

/// Number of stop bits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum StopBits {
    One,
    Two,
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Receiver that hands out one byte per read, then goes quiet
    struct Trickle<'a> {
        bytes: &'a [u8],
    }

    impl UartRx for Trickle<'_> {
        type Error = ();

        fn read_blocking(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
            match (self.bytes.split_first(), buf.first_mut()) {
                (Some((&byte, rest)), Some(slot)) => {
                    *slot = byte;
                    self.bytes = rest;
                    Ok(1)
                }
                _ => Ok(0),
            }
        }
    }

    #[test]
    fn test_read_full_across_short_reads() {
        let mut rx = Trickle { bytes: &[1, 2, 3] };
        let mut buf = [0u8; 3];
        assert_eq!(rx.read_full(&mut buf), Ok(3));
        assert_eq!(buf, [1, 2, 3]);
    }

    #[test]
    fn test_read_full_stops_on_zero_length_read() {
        let mut rx = Trickle { bytes: &[7, 8] };
        let mut buf = [0u8; 5];
        assert_eq!(rx.read_full(&mut buf), Ok(2));
        assert_eq!(&buf[..2], &[7, 8]);
    }

    #[test]
    fn test_default_is_115200_8n1() {
        let config = UartConfig::default();
        assert_eq!(config.baudrate, 115200);
        assert_eq!(config.bits_per_byte(), 10);
    }

    #[test]
    fn test_bits_per_byte_with_parity() {
        let config = UartConfig {
            parity: Parity::Even,
            stop_bits: StopBits::Two,
            ..UartConfig::default()
        };
        assert_eq!(config.bits_per_byte(), 12);
    }

    #[test]
    fn test_transfer_time() {
        let config = UartConfig {
            baudrate: 10_000,
            ..UartConfig::default()
        };
        // 4 bytes * 10 bits at 10 kbaud = 4 ms
        assert_eq!(config.transfer_time_us(4), 4_000);

        let stalled = UartConfig {
            baudrate: 0,
            ..UartConfig::default()
        };
        assert_eq!(stalled.transfer_time_us(4), 0);
    }
}

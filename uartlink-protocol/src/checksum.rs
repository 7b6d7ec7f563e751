//! Frame checksum
//!
//! Additive checksum over the LEN byte and the payload, reduced to 8 bits.

/// Compute the checksum for a frame with the given length and payload
///
/// Only the first `len` bytes of `data` are summed.
pub fn checksum(len: u8, data: &[u8]) -> u8 {
    let end = (len as usize).min(data.len());
    // Worst case 255 + 255 * 255 fits in u16
    let sum = data[..end]
        .iter()
        .fold(len as u16, |acc, &byte| acc.wrapping_add(byte as u16));
    (sum & 0xFF) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_checksum_empty() {
        assert_eq!(checksum(0, &[]), 0);
    }

    #[test]
    fn test_checksum_single_byte() {
        // 1 + 0x41 = 0x42
        assert_eq!(checksum(1, &[0x41]), 0x42);
    }

    #[test]
    fn test_checksum_wraps() {
        // 2 + 0xFF + 0x01 = 0x102
        assert_eq!(checksum(2, &[0xFF, 0x01]), 0x02);
    }

    #[test]
    fn test_checksum_ignores_bytes_past_len() {
        assert_eq!(checksum(1, &[0x41, 0x99, 0x99]), 0x42);
    }

    proptest! {
        #[test]
        fn prop_checksum_is_deterministic(data in prop::collection::vec(any::<u8>(), 0..=255)) {
            let len = data.len() as u8;
            prop_assert_eq!(checksum(len, &data), checksum(len, &data));
        }

        #[test]
        fn prop_checksum_matches_modular_sum(data in prop::collection::vec(any::<u8>(), 0..=255)) {
            let len = data.len() as u8;
            let expected = data.iter().map(|&b| b as u32).sum::<u32>() + len as u32;
            prop_assert_eq!(checksum(len, &data) as u32, expected % 256);
        }
    }
}

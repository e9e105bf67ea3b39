//! CRC-16 checksum for link frames.
//!
//! Uses CRC-16/CCITT-FALSE (catalogued as CRC-16/IBM-3740): polynomial
//! `0x1021`, initial value `0xFFFF`, MSB-first, no final XOR. Both ends of
//! the link must agree on this bit-for-bit.

use crc::{Crc, CRC_16_IBM_3740};

/// CRC-16/CCITT-FALSE calculator with 256-entry lookup table.
const CRC16: Crc<u16> = Crc::<u16>::new(&CRC_16_IBM_3740);

/// Calculate the CRC-16 checksum of a byte slice.
#[inline]
#[must_use]
pub fn calculate_crc16(data: &[u8]) -> u16 {
    CRC16.checksum(data)
}

/// CRC-16 digest for incremental calculation.
///
/// Used when the checksummed bytes are not contiguous, e.g. the version byte
/// followed by a payload that lives in another buffer.
pub struct Crc16Digest {
    digest: crc::Digest<'static, u16>,
}

impl Crc16Digest {
    /// Create a new CRC-16 digest.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            digest: CRC16.digest(),
        }
    }

    /// Update the digest with a single byte.
    #[inline]
    pub fn update(&mut self, byte: u8) {
        self.digest.update(&[byte]);
    }

    /// Update the digest with a byte slice.
    #[inline]
    pub fn update_slice(&mut self, data: &[u8]) {
        self.digest.update(data);
    }

    /// Finalize and return the checksum value.
    #[inline]
    #[must_use]
    pub fn finalize(self) -> u16 {
        self.digest.finalize()
    }
}

impl Default for Crc16Digest {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Bit-serial reference implementation, kept to pin the table variant.
    fn crc16_bitwise(data: &[u8]) -> u16 {
        let mut crc: u16 = 0xFFFF;
        for &byte in data {
            crc ^= u16::from(byte) << 8;
            for _ in 0..8 {
                crc = if crc & 0x8000 != 0 {
                    (crc << 1) ^ 0x1021
                } else {
                    crc << 1
                };
            }
        }
        crc
    }

    #[test]
    fn test_crc16_check_value() {
        assert_eq!(calculate_crc16(b"123456789"), 0x29B1);
    }

    #[test]
    fn test_crc16_empty() {
        assert_eq!(calculate_crc16(&[]), 0xFFFF);
    }

    #[test]
    fn test_crc16_matches_bitwise() {
        let samples: [&[u8]; 4] = [
            &[0x00],
            &[0x01, 0x00, 0x00, 0xFF],
            b"padlink",
            &[0xAA; 40],
        ];
        for data in samples {
            assert_eq!(calculate_crc16(data), crc16_bitwise(data));
        }
    }

    #[test]
    fn test_crc16_digest_matches_batch() {
        let data = [0x01, 0x21, 0xFF, 0xFF, 0x80, 0x0A];
        let batch_crc = calculate_crc16(&data);

        let mut digest = Crc16Digest::new();
        digest.update(data[0]);
        digest.update_slice(&data[1..]);

        assert_eq!(digest.finalize(), batch_crc);
    }
}

//! Versioned, checksummed frame envelope.
//!
//! # Wire Format
//!
//! ```text
//! COBS( [version][payload ...][crc16_lo][crc16_hi] ) 0x00
//! ```
//!
//! - `version` - [`PROTOCOL_VERSION`], bumped on any incompatible layout change
//! - `payload` - a serialized Status or Command record, at most [`MAX_PAYLOAD_SIZE`] bytes
//! - `crc16` - CRC-16/CCITT-FALSE over `version ‖ payload`, little-endian
//! - `0x00` - frame delimiter, never present inside the COBS block

use crate::cobs::{self, CobsError};
use crate::crc::{calculate_crc16, Crc16Digest};

/// Protocol version carried in every frame.
pub const PROTOCOL_VERSION: u8 = 1;

/// Byte that terminates every encoded frame.
pub const FRAME_DELIMITER: u8 = 0x00;

/// Largest payload a frame may carry.
pub const MAX_PAYLOAD_SIZE: usize = 64;

/// Version byte plus CRC-16.
const ENVELOPE_OVERHEAD: usize = 1 + 2;

/// Largest unencoded packet: version + payload + CRC.
pub const MAX_PACKET_SIZE: usize = ENVELOPE_OVERHEAD + MAX_PAYLOAD_SIZE;

/// Largest COBS block for a [`MAX_PACKET_SIZE`] packet, without delimiter.
pub const MAX_ENCODED_SIZE: usize = cobs::max_encoded_len(MAX_PACKET_SIZE);

/// Largest frame on the wire, delimiter included.
pub const MAX_FRAME_SIZE: usize = MAX_ENCODED_SIZE + 1;

/// Error type for frame encoding and decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Payload is larger than [`MAX_PAYLOAD_SIZE`].
    PayloadTooLarge,
    /// COBS encoding or decoding failed.
    Cobs(CobsError),
    /// Decoded packet is shorter than the envelope itself.
    TooShort,
    /// Version byte does not match [`PROTOCOL_VERSION`].
    Version(u8),
    /// Checksum mismatch.
    Checksum {
        /// CRC carried in the frame.
        received: u16,
        /// CRC computed over the received bytes.
        computed: u16,
    },
}

impl From<CobsError> for FrameError {
    fn from(err: CobsError) -> Self {
        Self::Cobs(err)
    }
}

impl core::fmt::Display for FrameError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::PayloadTooLarge => write!(f, "payload too large"),
            Self::Cobs(err) => write!(f, "cobs: {err}"),
            Self::TooShort => write!(f, "frame too short"),
            Self::Version(v) => write!(f, "unsupported protocol version {v}"),
            Self::Checksum { received, computed } => write!(
                f,
                "checksum mismatch (received {received:#06x}, computed {computed:#06x})"
            ),
        }
    }
}

/// Wrap `payload` in an envelope and write the encoded frame to `out`.
///
/// The written bytes include the trailing [`FRAME_DELIMITER`], so the result
/// can be handed to the transport as is.
///
/// # Errors
///
/// - [`FrameError::PayloadTooLarge`] if `payload` exceeds [`MAX_PAYLOAD_SIZE`]
/// - [`FrameError::Cobs`] with [`CobsError::BufferTooSmall`] if `out` is too small
///
/// # Example
///
/// ```
/// use padlink_proto::frame::{decode_frame, encode_frame, MAX_FRAME_SIZE, MAX_PACKET_SIZE};
///
/// let mut wire = [0u8; MAX_FRAME_SIZE];
/// let len = encode_frame(&[0x22, 0xFF, 0xFF], &mut wire).unwrap();
/// assert_eq!(wire[len - 1], 0x00);
///
/// let mut packet = [0u8; MAX_PACKET_SIZE];
/// let payload = decode_frame(&wire[..len - 1], &mut packet).unwrap();
/// assert_eq!(payload, &[0x22, 0xFF, 0xFF]);
/// ```
pub fn encode_frame(payload: &[u8], out: &mut [u8]) -> Result<usize, FrameError> {
    if payload.len() > MAX_PAYLOAD_SIZE {
        return Err(FrameError::PayloadTooLarge);
    }

    let mut packet = [0u8; MAX_PACKET_SIZE];
    let packet_len = payload.len() + ENVELOPE_OVERHEAD;

    packet[0] = PROTOCOL_VERSION;
    packet[1..=payload.len()].copy_from_slice(payload);

    let mut digest = Crc16Digest::new();
    digest.update(PROTOCOL_VERSION);
    digest.update_slice(payload);
    let crc = digest.finalize();
    packet[packet_len - 2..packet_len].copy_from_slice(&crc.to_le_bytes());

    let encoded_len = cobs::encode(&packet[..packet_len], out)?;
    let slot = out
        .get_mut(encoded_len)
        .ok_or(FrameError::Cobs(CobsError::BufferTooSmall))?;
    *slot = FRAME_DELIMITER;

    Ok(encoded_len + 1)
}

/// Decode one COBS block (delimiter already stripped) and verify its envelope.
///
/// `packet` is scratch space for the decoded bytes; [`MAX_PACKET_SIZE`] is
/// always enough. On success the returned slice is the payload inside it.
///
/// # Errors
///
/// - [`FrameError::Cobs`] if the block is not valid COBS or does not fit `packet`
/// - [`FrameError::TooShort`] if there is no room for version and CRC
/// - [`FrameError::Checksum`] on CRC mismatch
/// - [`FrameError::Version`] on a version other than [`PROTOCOL_VERSION`]
pub fn decode_frame<'a>(encoded: &[u8], packet: &'a mut [u8]) -> Result<&'a [u8], FrameError> {
    let len = cobs::decode(encoded, packet)?;
    if len < ENVELOPE_OVERHEAD {
        return Err(FrameError::TooShort);
    }

    let packet = &packet[..len];
    let (body, crc_bytes) = packet.split_at(len - 2);
    let received = u16::from_le_bytes([crc_bytes[0], crc_bytes[1]]);
    let computed = calculate_crc16(body);
    if received != computed {
        return Err(FrameError::Checksum { received, computed });
    }

    // Checked after the CRC so a garbled version byte reports as corruption.
    if body[0] != PROTOCOL_VERSION {
        return Err(FrameError::Version(body[0]));
    }

    Ok(&body[1..])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cobs;

    fn encode(payload: &[u8]) -> ([u8; MAX_FRAME_SIZE], usize) {
        let mut wire = [0u8; MAX_FRAME_SIZE];
        let len = encode_frame(payload, &mut wire).unwrap();
        (wire, len)
    }

    #[test]
    fn test_frame_round_trip() {
        let payload = [0x00, 0x01, 0x00, 0x00, 0xDC, 0x05];
        let (wire, len) = encode(&payload);

        assert_eq!(wire[len - 1], FRAME_DELIMITER);
        assert!(!wire[..len - 1].contains(&FRAME_DELIMITER));

        let mut packet = [0u8; MAX_PACKET_SIZE];
        assert_eq!(decode_frame(&wire[..len - 1], &mut packet), Ok(&payload[..]));
    }

    #[test]
    fn test_frame_layout() {
        let (wire, len) = encode(&[0x22, 0x01, 0x02]);

        let mut packet = [0u8; MAX_PACKET_SIZE];
        let plen = cobs::decode(&wire[..len - 1], &mut packet).unwrap();
        assert_eq!(plen, 6);
        assert_eq!(packet[0], PROTOCOL_VERSION);
        assert_eq!(&packet[1..4], &[0x22, 0x01, 0x02]);

        let crc = calculate_crc16(&packet[..4]);
        assert_eq!(&packet[4..6], &crc.to_le_bytes());
    }

    #[test]
    fn test_frame_max_payload() {
        let payload = [0xA5; MAX_PAYLOAD_SIZE];
        let (wire, len) = encode(&payload);
        assert!(len <= MAX_FRAME_SIZE);

        let mut packet = [0u8; MAX_PACKET_SIZE];
        assert_eq!(decode_frame(&wire[..len - 1], &mut packet), Ok(&payload[..]));
    }

    #[test]
    fn test_frame_payload_too_large() {
        let payload = [0x01; MAX_PAYLOAD_SIZE + 1];
        let mut wire = [0u8; 128];
        assert_eq!(
            encode_frame(&payload, &mut wire),
            Err(FrameError::PayloadTooLarge)
        );
    }

    #[test]
    fn test_frame_output_too_small() {
        let mut wire = [0u8; 4];
        assert_eq!(
            encode_frame(&[1, 2, 3], &mut wire),
            Err(FrameError::Cobs(CobsError::BufferTooSmall))
        );

        // Room for the COBS block but not the delimiter.
        let mut wire = [0u8; 7];
        assert_eq!(
            encode_frame(&[1, 2, 3], &mut wire),
            Err(FrameError::Cobs(CobsError::BufferTooSmall))
        );
    }

    #[test]
    fn test_frame_corrupted_crc() {
        // No zeros before the CRC, so wire[3] is a data byte inside the first block.
        let (mut wire, len) = encode(&[0x21, 0x05, 0x07, 0x80, 0x0A]);
        wire[3] ^= 0x40;

        let mut packet = [0u8; MAX_PACKET_SIZE];
        assert!(matches!(
            decode_frame(&wire[..len - 1], &mut packet),
            Err(FrameError::Checksum { .. })
        ));
    }

    #[test]
    fn test_frame_wrong_version() {
        let mut packet = [0x02, 0x22, 0xFF, 0xFF, 0, 0];
        let crc = calculate_crc16(&packet[..4]);
        packet[4..6].copy_from_slice(&crc.to_le_bytes());

        let mut encoded = [0u8; 16];
        let len = cobs::encode(&packet, &mut encoded).unwrap();

        let mut scratch = [0u8; MAX_PACKET_SIZE];
        assert_eq!(
            decode_frame(&encoded[..len], &mut scratch),
            Err(FrameError::Version(2))
        );
    }

    #[test]
    fn test_frame_too_short() {
        let mut encoded = [0u8; 8];
        let len = cobs::encode(&[0x01, 0x02], &mut encoded).unwrap();

        let mut scratch = [0u8; MAX_PACKET_SIZE];
        assert_eq!(
            decode_frame(&encoded[..len], &mut scratch),
            Err(FrameError::TooShort)
        );
    }

    #[test]
    fn test_frame_oversized_block() {
        let big = [0x11; MAX_PACKET_SIZE + 8];
        let mut encoded = [0u8; 128];
        let len = cobs::encode(&big, &mut encoded).unwrap();

        let mut scratch = [0u8; MAX_PACKET_SIZE];
        assert_eq!(
            decode_frame(&encoded[..len], &mut scratch),
            Err(FrameError::Cobs(CobsError::BufferTooSmall))
        );
    }
}

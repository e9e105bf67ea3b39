//! Consistent Overhead Byte Stuffing.
//!
//! Thin wrapper over the [`cobs`](https://docs.rs/cobs) crate that keeps the
//! codec's failures inside this crate's error types. COBS rewrites a byte
//! sequence so it contains no `0x00`, leaving `0x00` free to act as the frame
//! delimiter on the wire.
//!
//! # Example
//!
//! ```
//! use padlink_proto::cobs;
//!
//! let mut encoded = [0u8; 8];
//! let len = cobs::encode(&[0x11, 0x00, 0x22], &mut encoded).unwrap();
//! assert_eq!(&encoded[..len], &[0x02, 0x11, 0x02, 0x22]);
//!
//! let mut decoded = [0u8; 8];
//! let len = cobs::decode(&encoded[..len], &mut decoded).unwrap();
//! assert_eq!(&decoded[..len], &[0x11, 0x00, 0x22]);
//! ```

/// Upper bound on the encoded size of `len` input bytes, delimiter excluded.
#[inline]
#[must_use]
pub const fn max_encoded_len(len: usize) -> usize {
    ::cobs::max_encoding_length(len)
}

/// Error type for COBS operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CobsError {
    /// The output buffer cannot hold the result.
    BufferTooSmall,
    /// The input is not a valid COBS block (empty, truncated or holding a zero).
    Malformed,
}

impl core::fmt::Display for CobsError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::BufferTooSmall => write!(f, "buffer too small"),
            Self::Malformed => write!(f, "malformed cobs block"),
        }
    }
}

impl From<::cobs::DestBufTooSmallError> for CobsError {
    fn from(_: ::cobs::DestBufTooSmallError) -> Self {
        Self::BufferTooSmall
    }
}

impl From<::cobs::DecodeError> for CobsError {
    fn from(err: ::cobs::DecodeError) -> Self {
        match err {
            ::cobs::DecodeError::TargetBufTooSmall => Self::BufferTooSmall,
            _ => Self::Malformed,
        }
    }
}

/// Encode `input` into `output`, returning the number of bytes written.
///
/// The result never contains `0x00`; the caller appends the frame delimiter.
///
/// # Errors
///
/// Returns [`CobsError::BufferTooSmall`] if `output` cannot hold the encoded
/// bytes.
pub fn encode(input: &[u8], output: &mut [u8]) -> Result<usize, CobsError> {
    Ok(::cobs::try_encode(input, output)?)
}

/// Decode one encoded block (no trailing delimiter) into `output`, returning
/// the number of bytes written.
///
/// # Errors
///
/// - [`CobsError::Malformed`] if `input` is empty, truncated or contains `0x00`
/// - [`CobsError::BufferTooSmall`] if the decoded bytes exceed `output.len()`
pub fn decode(input: &[u8], output: &mut [u8]) -> Result<usize, CobsError> {
    Ok(::cobs::decode(input, output)?)
}

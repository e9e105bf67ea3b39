//! Binary serialization for link records.
//!
//! This module provides the [`Serialize`] trait implemented by
//! [`Status`](crate::Status) and [`Command`](crate::Command), their error
//! types, and the little-endian cursor both records use to lay out fields.
//!
//! # Example
//!
//! ```
//! use padlink_proto::{Serialize, Status, STATUS_SIZE};
//!
//! let status = Status::new(0);
//! let mut buf = [0u8; STATUS_SIZE];
//! let len = status.serialize(&mut buf).unwrap();
//! assert_eq!(len, STATUS_SIZE);
//! ```

/// Error type for serialization operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SerializeError {
    /// The output buffer is too small to hold the serialized record.
    BufferTooSmall,
}

impl core::fmt::Display for SerializeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::BufferTooSmall => write!(f, "buffer too small"),
        }
    }
}

/// Error type for deserialization operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DeserializeError {
    /// Input length differs from the size the record requires.
    Length {
        /// Size implied by the record type (or its opcode).
        expected: usize,
        /// Size actually received.
        actual: usize,
    },
    /// Command opcode is not part of the protocol.
    UnknownOpcode(u8),
}

impl core::fmt::Display for DeserializeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Length { expected, actual } => {
                write!(f, "invalid length (expected {expected}, got {actual})")
            }
            Self::UnknownOpcode(op) => write!(f, "unknown opcode {op:#04x}"),
        }
    }
}

/// Extension trait for serializing link records.
pub trait Serialize {
    /// Exact number of bytes [`serialize`](Serialize::serialize) writes.
    fn serialized_len(&self) -> usize;

    /// Serialize to the provided buffer.
    ///
    /// Returns the number of bytes written on success.
    ///
    /// # Errors
    ///
    /// Returns [`SerializeError::BufferTooSmall`] if the buffer is shorter
    /// than [`serialized_len`](Serialize::serialized_len).
    fn serialize(&self, buf: &mut [u8]) -> Result<usize, SerializeError>;

    /// Serialize to a `heapless::Vec`.
    ///
    /// # Errors
    ///
    /// Returns [`SerializeError::BufferTooSmall`] if `N` is not large enough.
    #[cfg(feature = "heapless")]
    fn serialize_to_vec<const N: usize>(&self) -> Result<heapless::Vec<u8, N>, SerializeError> {
        let mut vec = heapless::Vec::new();
        vec.resize(self.serialized_len(), 0)
            .map_err(|_| SerializeError::BufferTooSmall)?;
        self.serialize(&mut vec)?;
        Ok(vec)
    }
}

/// Little-endian write cursor over a buffer already checked for size.
pub(crate) struct WriteCursor<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> WriteCursor<'a> {
    /// Create a cursor, failing if `buf` cannot hold `len` bytes.
    #[inline]
    pub(crate) fn new(buf: &'a mut [u8], len: usize) -> Result<Self, SerializeError> {
        if buf.len() < len {
            return Err(SerializeError::BufferTooSmall);
        }
        Ok(Self { buf, pos: 0 })
    }

    #[inline]
    pub(crate) fn put_u8(&mut self, value: u8) {
        self.buf[self.pos] = value;
        self.pos += 1;
    }

    #[inline]
    pub(crate) fn put_u16(&mut self, value: u16) {
        self.buf[self.pos..self.pos + 2].copy_from_slice(&value.to_le_bytes());
        self.pos += 2;
    }

    #[inline]
    pub(crate) fn put_i16(&mut self, value: i16) {
        self.put_u16(value as u16);
    }

    #[inline]
    pub(crate) fn finish(self) -> usize {
        self.pos
    }
}

/// Little-endian read cursor over an input already checked for size.
pub(crate) struct ReadCursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ReadCursor<'a> {
    /// Create a cursor, failing unless `data` is exactly `len` bytes.
    #[inline]
    pub(crate) fn exact(data: &'a [u8], len: usize) -> Result<Self, DeserializeError> {
        if data.len() != len {
            return Err(DeserializeError::Length {
                expected: len,
                actual: data.len(),
            });
        }
        Ok(Self { data, pos: 0 })
    }

    #[inline]
    pub(crate) fn u8(&mut self) -> u8 {
        let value = self.data[self.pos];
        self.pos += 1;
        value
    }

    #[inline]
    pub(crate) fn u16(&mut self) -> u16 {
        let value = u16::from_le_bytes([self.data[self.pos], self.data[self.pos + 1]]);
        self.pos += 2;
        value
    }

    #[inline]
    pub(crate) fn i16(&mut self) -> i16 {
        self.u16() as i16
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_cursor_little_endian() {
        let mut buf = [0u8; 5];
        let mut cursor = WriteCursor::new(&mut buf, 5).unwrap();
        cursor.put_u8(0xAB);
        cursor.put_u16(0x1234);
        cursor.put_i16(-2);
        assert_eq!(cursor.finish(), 5);
        assert_eq!(buf, [0xAB, 0x34, 0x12, 0xFE, 0xFF]);
    }

    #[test]
    fn test_write_cursor_too_small() {
        let mut buf = [0u8; 2];
        assert!(matches!(
            WriteCursor::new(&mut buf, 3),
            Err(SerializeError::BufferTooSmall)
        ));
    }

    #[test]
    fn test_read_cursor_exact_length() {
        let data = [0x01, 0x00, 0x80];
        let mut cursor = ReadCursor::exact(&data, 3).unwrap();
        assert_eq!(cursor.u8(), 0x01);
        assert_eq!(cursor.i16(), i16::MIN);

        assert_eq!(
            ReadCursor::exact(&data, 4).err(),
            Some(DeserializeError::Length {
                expected: 4,
                actual: 3
            })
        );
    }
}

//! Byte transport abstraction for the serial line.

/// Error type for transport writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransportError {
    /// Serial port I/O error.
    Io,
    /// The peripheral accepted only part of the frame.
    Incomplete,
}

impl core::fmt::Display for TransportError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Io => write!(f, "transport i/o error"),
            Self::Incomplete => write!(f, "transport write incomplete"),
        }
    }
}

/// Non-blocking byte transport.
///
/// The link only ever polls: it asks how many bytes are ready and reads them
/// one at a time, so implementations must never block in `read_byte`.
pub trait Transport {
    /// Bytes that can be read right now without blocking. Any non-zero value
    /// is treated as "at least one".
    fn bytes_available(&mut self) -> usize;

    /// Read one byte, or `None` if nothing is ready.
    fn read_byte(&mut self) -> Option<u8>;

    /// Write a complete frame.
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), TransportError>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn bytes_available(&mut self) -> usize {
        (**self).bytes_available()
    }

    fn read_byte(&mut self) -> Option<u8> {
        (**self).read_byte()
    }

    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), TransportError> {
        (**self).write_bytes(bytes)
    }
}

/// [`Transport`] over any `embedded-io` serial peripheral.
///
/// `ReadReady` only reports whether at least one byte is waiting, so
/// [`bytes_available`](Transport::bytes_available) returns 0 or 1 and the
/// link re-checks before every read.
#[cfg(feature = "embedded-io")]
pub struct IoTransport<P> {
    port: P,
}

#[cfg(feature = "embedded-io")]
impl<P> IoTransport<P> {
    pub fn new(port: P) -> Self {
        Self { port }
    }

    pub fn inner(&self) -> &P {
        &self.port
    }

    pub fn inner_mut(&mut self) -> &mut P {
        &mut self.port
    }

    pub fn into_inner(self) -> P {
        self.port
    }
}

#[cfg(feature = "embedded-io")]
impl<P> Transport for IoTransport<P>
where
    P: embedded_io::Read + embedded_io::ReadReady + embedded_io::Write,
{
    fn bytes_available(&mut self) -> usize {
        match self.port.read_ready() {
            Ok(true) => 1,
            _ => 0,
        }
    }

    fn read_byte(&mut self) -> Option<u8> {
        if !matches!(self.port.read_ready(), Ok(true)) {
            return None;
        }
        let mut byte = [0u8; 1];
        match self.port.read(&mut byte) {
            Ok(1) => Some(byte[0]),
            _ => None,
        }
    }

    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), TransportError> {
        let mut rest = bytes;
        while !rest.is_empty() {
            match self.port.write(rest) {
                Ok(0) => return Err(TransportError::Incomplete),
                Ok(n) => rest = &rest[n..],
                Err(_) => return Err(TransportError::Io),
            }
        }
        self.port.flush().map_err(|_| TransportError::Io)
    }
}

#[cfg(all(test, feature = "embedded-io"))]
mod tests {
    extern crate std;

    use super::*;
    use std::collections::VecDeque;
    use std::vec::Vec;

    #[derive(Default)]
    struct MockPort {
        rx: VecDeque<u8>,
        tx: Vec<u8>,
        chunk: usize,
    }

    impl embedded_io::ErrorType for MockPort {
        type Error = embedded_io::ErrorKind;
    }

    impl embedded_io::Read for MockPort {
        fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
            let mut n = 0;
            while n < buf.len() {
                match self.rx.pop_front() {
                    Some(b) => {
                        buf[n] = b;
                        n += 1;
                    }
                    None => break,
                }
            }
            Ok(n)
        }
    }

    impl embedded_io::ReadReady for MockPort {
        fn read_ready(&mut self) -> Result<bool, Self::Error> {
            Ok(!self.rx.is_empty())
        }
    }

    impl embedded_io::Write for MockPort {
        fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
            let n = buf.len().min(self.chunk);
            self.tx.extend_from_slice(&buf[..n]);
            Ok(n)
        }

        fn flush(&mut self) -> Result<(), Self::Error> {
            Ok(())
        }
    }

    #[test]
    fn test_io_transport_reads_bytes() {
        let mut port = MockPort::default();
        port.rx.extend([0x01, 0x02]);
        let mut transport = IoTransport::new(port);

        assert_eq!(transport.bytes_available(), 1);
        assert_eq!(transport.read_byte(), Some(0x01));
        assert_eq!(transport.read_byte(), Some(0x02));
        assert_eq!(transport.bytes_available(), 0);
        assert_eq!(transport.read_byte(), None);
    }

    #[test]
    fn test_io_transport_writes_in_chunks() {
        let port = MockPort {
            chunk: 2,
            ..MockPort::default()
        };
        let mut transport = IoTransport::new(port);

        assert_eq!(transport.write_bytes(&[1, 2, 3, 4, 5]), Ok(()));
        assert_eq!(transport.inner().tx, [1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_io_transport_write_zero() {
        let mut transport = IoTransport::new(MockPort::default());
        assert_eq!(transport.write_bytes(&[1]), Err(TransportError::Incomplete));
    }
}

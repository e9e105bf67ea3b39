//! Shared link plumbing: receive accumulator, framing and gamepad slots.
//!
//! Both link roles wrap a [`LinkCore`]. It owns the transport, the
//! diagnostics sink, the gamepad slots and the receive buffer, and knows
//! nothing about which record type travels in which direction.

use heapless::Vec;
use padlink_proto::{
    decode_frame, encode_frame, FrameError, Serialize, SerializeError, FRAME_DELIMITER,
    MAX_ENCODED_SIZE, MAX_FRAME_SIZE, MAX_PACKET_SIZE, MAX_PAYLOAD_SIZE, Target,
};

use crate::config::{LinkConfig, MAX_GAMEPADS};
use crate::diagnostics::{report, Diagnostic, DiagnosticSink};
use crate::dispatch::{resolve_target, DispatchError};
use crate::gamepad::Gamepad;
use crate::transport::{Transport, TransportError};

/// Error type for explicit link operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkError {
    /// Gamepad index is not a configured slot.
    InvalidGamepad(u8),
    /// Command addressing rejected by the local mirror.
    Dispatch(DispatchError),
    /// Record did not fit the payload buffer.
    Serialize(SerializeError),
    /// Frame could not be built.
    Frame(FrameError),
    /// Transport refused the frame.
    Transport(TransportError),
}

impl From<DispatchError> for LinkError {
    fn from(err: DispatchError) -> Self {
        Self::Dispatch(err)
    }
}

impl From<SerializeError> for LinkError {
    fn from(err: SerializeError) -> Self {
        Self::Serialize(err)
    }
}

impl From<FrameError> for LinkError {
    fn from(err: FrameError) -> Self {
        Self::Frame(err)
    }
}

impl From<TransportError> for LinkError {
    fn from(err: TransportError) -> Self {
        Self::Transport(err)
    }
}

impl core::fmt::Display for LinkError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidGamepad(i) => write!(f, "invalid gamepad {i}"),
            Self::Dispatch(err) => write!(f, "{err}"),
            Self::Serialize(err) => write!(f, "serialize: {err}"),
            Self::Frame(err) => write!(f, "frame: {err}"),
            Self::Transport(err) => write!(f, "{err}"),
        }
    }
}

/// Receive state between delimiters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RxState {
    /// Collecting bytes of the current frame.
    Accumulating,
    /// Dropping the remainder of an oversized frame.
    Discarding,
}

/// Transport, slots and receive buffer shared by both link roles.
pub struct LinkCore<T, D> {
    transport: T,
    sink: D,
    gamepads: Vec<Gamepad, MAX_GAMEPADS>,
    rx: Vec<u8, MAX_ENCODED_SIZE>,
    rx_state: RxState,
}

impl<T: Transport, D: DiagnosticSink> LinkCore<T, D> {
    /// Allocate one slot per configured gamepad.
    pub fn new(transport: T, sink: D, config: &LinkConfig) -> Self {
        let mut gamepads = Vec::new();
        for index in 0..config.gamepad_count() {
            // LinkConfig caps the count at MAX_GAMEPADS, so this never drops a slot.
            let _ = gamepads.push(Gamepad::with_tolerances(
                index as u8,
                config.axis_tolerance(),
                config.battery_tolerance(),
            ));
        }

        debug!("padlink: link up with {} gamepad(s)", gamepads.len());

        Self {
            transport,
            sink,
            gamepads,
            rx: Vec::new(),
            // Start accumulating so the first frame from a peer that is
            // already running is not lost.
            rx_state: RxState::Accumulating,
        }
    }

    #[inline]
    pub fn gamepads(&self) -> &[Gamepad] {
        &self.gamepads
    }

    #[inline]
    pub fn gamepads_mut(&mut self) -> &mut [Gamepad] {
        &mut self.gamepads
    }

    pub fn gamepad(&self, index: u8) -> Option<&Gamepad> {
        self.gamepads.get(usize::from(index))
    }

    pub fn gamepad_mut(&mut self, index: u8) -> Option<&mut Gamepad> {
        self.gamepads.get_mut(usize::from(index))
    }

    /// Apply `f` to every gamepad `target` names.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::Dispatch`] for a single target outside the slots.
    pub fn for_each_target(
        &mut self,
        target: Target,
        mut f: impl FnMut(&mut Gamepad),
    ) -> Result<(), LinkError> {
        let slots = resolve_target(target, self.gamepads.len())?;
        self.gamepads[slots].iter_mut().for_each(|pad| f(pad));
        Ok(())
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    pub fn sink(&self) -> &D {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut D {
        &mut self.sink
    }

    /// Log a diagnostic through the crate logger and the sink.
    pub fn report(&mut self, diagnostic: Diagnostic) {
        report(&mut self.sink, diagnostic);
    }

    /// Drain every byte currently available and hand each verified payload
    /// to `on_payload`.
    ///
    /// Corrupt frames and overflows are reported and skipped. Returns as soon
    /// as the transport has nothing more to give.
    pub fn poll_frames<F>(&mut self, mut on_payload: F)
    where
        F: FnMut(&[u8], &mut [Gamepad], &mut D),
    {
        while self.transport.bytes_available() > 0 {
            let Some(byte) = self.transport.read_byte() else {
                break;
            };

            if byte == FRAME_DELIMITER {
                if self.rx_state == RxState::Accumulating && !self.rx.is_empty() {
                    let mut packet = [0u8; MAX_PACKET_SIZE];
                    match decode_frame(&self.rx, &mut packet) {
                        Ok(payload) => {
                            trace!("padlink: frame with {} byte payload", payload.len());
                            on_payload(payload, &mut self.gamepads[..], &mut self.sink);
                        }
                        Err(err) => report(&mut self.sink, Diagnostic::Frame(err)),
                    }
                }
                self.rx.clear();
                self.rx_state = RxState::Accumulating;
                continue;
            }

            if self.rx_state == RxState::Discarding {
                continue;
            }

            if self.rx.push(byte).is_err() {
                self.rx.clear();
                self.rx_state = RxState::Discarding;
                report(&mut self.sink, Diagnostic::Overflow);
            }
        }
    }

    /// Serialize `record`, frame it and write it to the transport.
    ///
    /// # Errors
    ///
    /// Any [`LinkError`] except `InvalidGamepad`/`Dispatch`.
    pub fn send<R: Serialize + ?Sized>(&mut self, record: &R) -> Result<(), LinkError> {
        let mut payload = [0u8; MAX_PAYLOAD_SIZE];
        let len = record.serialize(&mut payload)?;
        self.send_payload(&payload[..len])
    }

    /// Frame an already serialized payload and write it to the transport.
    ///
    /// # Errors
    ///
    /// [`LinkError::Frame`] if the payload is too large, or
    /// [`LinkError::Transport`] if the write fails.
    pub fn send_payload(&mut self, payload: &[u8]) -> Result<(), LinkError> {
        let mut frame = [0u8; MAX_FRAME_SIZE];
        let len = encode_frame(payload, &mut frame)?;
        self.transport.write_bytes(&frame[..len])?;
        trace!("padlink: sent {} byte frame", len);
        Ok(())
    }

    pub fn into_parts(self) -> (T, D) {
        (self.transport, self.sink)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    extern crate std;

    use super::*;
    use padlink_proto::{Status, STATUS_SIZE};
    use std::collections::VecDeque;
    use std::vec::Vec as StdVec;

    /// In-memory transport for link tests.
    #[derive(Default)]
    pub(crate) struct MockTransport {
        pub rx: VecDeque<u8>,
        pub tx: StdVec<u8>,
        pub fail_writes: bool,
    }

    impl MockTransport {
        pub fn feed(&mut self, bytes: &[u8]) {
            self.rx.extend(bytes.iter().copied());
        }
    }

    impl Transport for MockTransport {
        fn bytes_available(&mut self) -> usize {
            self.rx.len()
        }

        fn read_byte(&mut self) -> Option<u8> {
            self.rx.pop_front()
        }

        fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), TransportError> {
            if self.fail_writes {
                return Err(TransportError::Io);
            }
            self.tx.extend_from_slice(bytes);
            Ok(())
        }
    }

    /// Sink that keeps every diagnostic.
    #[derive(Default)]
    pub(crate) struct RecordingSink {
        pub diagnostics: StdVec<Diagnostic>,
    }

    impl DiagnosticSink for RecordingSink {
        fn log(&mut self, diagnostic: Diagnostic) {
            self.diagnostics.push(diagnostic);
        }
    }

    /// Frame `payload` exactly as a peer would.
    pub(crate) fn wire(payload: &[u8]) -> StdVec<u8> {
        let mut frame = [0u8; MAX_FRAME_SIZE];
        let len = encode_frame(payload, &mut frame).unwrap();
        frame[..len].to_vec()
    }

    fn core(count: usize) -> LinkCore<MockTransport, RecordingSink> {
        LinkCore::new(
            MockTransport::default(),
            RecordingSink::default(),
            &LinkConfig::new(count).unwrap(),
        )
    }

    fn collect(link: &mut LinkCore<MockTransport, RecordingSink>) -> StdVec<StdVec<u8>> {
        let mut seen = StdVec::new();
        link.poll_frames(|payload, _, _| seen.push(payload.to_vec()));
        seen
    }

    #[test]
    fn test_slots_allocated_from_config() {
        let link = core(3);
        assert_eq!(link.gamepads().len(), 3);
        assert_eq!(link.gamepad(2).map(Gamepad::index), Some(2));
        assert!(link.gamepad(3).is_none());
    }

    #[test]
    fn test_poll_nothing_available() {
        let mut link = core(1);
        assert!(collect(&mut link).is_empty());
        assert!(link.sink().diagnostics.is_empty());
    }

    #[test]
    fn test_frame_split_across_polls() {
        let mut link = core(1);
        let bytes = wire(&[0x22, 0x00, 0xFF]);
        let (head, tail) = bytes.split_at(3);

        link.transport_mut().feed(head);
        assert!(collect(&mut link).is_empty());

        link.transport_mut().feed(tail);
        assert_eq!(collect(&mut link), [StdVec::from([0x22, 0x00, 0xFF])]);
    }

    #[test]
    fn test_back_to_back_frames_and_empty_frames() {
        let mut link = core(1);
        let mut bytes = StdVec::from([0x00, 0x00]);
        bytes.extend(wire(&[1]));
        bytes.extend(wire(&[2, 3]));
        link.transport_mut().feed(&bytes);

        assert_eq!(collect(&mut link), [StdVec::from([1]), StdVec::from([2, 3])]);
        assert!(link.sink().diagnostics.is_empty());
    }

    #[test]
    fn test_corrupted_frame_reported_and_skipped() {
        let mut link = core(1);
        let mut bad = wire(&[0x21, 0x05, 0x07, 0x80, 0x0A]);
        bad[3] ^= 0x40;
        link.transport_mut().feed(&bad);
        link.transport_mut().feed(&wire(&[9]));

        assert_eq!(collect(&mut link), [StdVec::from([9])]);
        assert!(matches!(
            link.sink().diagnostics.as_slice(),
            [Diagnostic::Frame(FrameError::Checksum { .. })]
        ));
    }

    #[test]
    fn test_overflow_recovers_on_next_frame() {
        let mut link = core(1);
        let junk = [0x55u8; MAX_ENCODED_SIZE + 20];
        link.transport_mut().feed(&junk);
        link.transport_mut().feed(&[FRAME_DELIMITER]);
        link.transport_mut().feed(&wire(&[0x42, 0x00, 0x01]));

        assert_eq!(collect(&mut link), [StdVec::from([0x42, 0x00, 0x01])]);
        assert_eq!(link.sink().diagnostics, [Diagnostic::Overflow]);
    }

    #[test]
    fn test_largest_frame_accepted() {
        let mut link = core(1);
        let payload = [0xFFu8; MAX_PAYLOAD_SIZE];
        let bytes = wire(&payload);
        assert_eq!(bytes.len(), MAX_ENCODED_SIZE + 1);

        link.transport_mut().feed(&bytes);
        link.transport_mut().feed(&bytes);
        assert_eq!(
            collect(&mut link),
            [StdVec::from(payload), StdVec::from(payload)]
        );
        assert!(link.sink().diagnostics.is_empty());
    }

    #[test]
    fn test_send_writes_framed_record() {
        let mut link = core(1);
        let status = Status {
            trigger1: 1500,
            ..Status::new(0)
        };
        link.send(&status).unwrap();

        let tx = link.transport().tx.clone();
        assert_eq!(tx.last(), Some(&FRAME_DELIMITER));

        let mut packet = [0u8; MAX_PACKET_SIZE];
        let payload = decode_frame(&tx[..tx.len() - 1], &mut packet).unwrap();
        assert_eq!(payload.len(), STATUS_SIZE);
        assert_eq!(Status::deserialize(payload), Ok(status));
    }

    #[test]
    fn test_send_reports_transport_failure() {
        let mut link = core(1);
        link.transport_mut().fail_writes = true;
        assert_eq!(
            link.send_payload(&[1, 2, 3]),
            Err(LinkError::Transport(TransportError::Io))
        );
        assert_eq!(
            link.send_payload(&[0; MAX_PAYLOAD_SIZE + 1]),
            Err(LinkError::Frame(FrameError::PayloadTooLarge))
        );
    }

    #[test]
    fn test_for_each_target() {
        let mut link = core(2);
        let mut seen = StdVec::new();
        link.for_each_target(Target::All, |pad| seen.push(pad.index()))
            .unwrap();
        assert_eq!(seen, [0, 1]);

        assert_eq!(
            link.for_each_target(Target::Gamepad(2), |_| {}),
            Err(LinkError::Dispatch(DispatchError::InvalidTarget(2)))
        );
    }
}

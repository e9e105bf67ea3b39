//! Receive-side diagnostics.
//!
//! Nothing that goes wrong while receiving is fatal: the offending bytes are
//! dropped and the link carries on. Each such event is logged through the
//! crate's logging backend and handed to a [`DiagnosticSink`].

use crate::dispatch::DispatchError;
use crate::link::LinkError;
use padlink_proto::{DeserializeError, FrameError};

/// Something the link dropped or could not do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Diagnostic {
    /// Frame failed COBS, CRC or version checks.
    Frame(FrameError),
    /// Frame was intact but its payload is not a valid record.
    Payload(DeserializeError),
    /// Command addressed a gamepad or output that does not exist.
    Dispatch(DispatchError),
    /// Status record names a gamepad slot that is not configured.
    InvalidStatusIndex(u8),
    /// Receive buffer filled before a delimiter; the frame was dropped.
    Overflow,
    /// A pending Status could not be sent during `poll`.
    Send(LinkError),
}

impl core::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Frame(err) => write!(f, "bad frame: {err}"),
            Self::Payload(err) => write!(f, "bad payload: {err}"),
            Self::Dispatch(err) => write!(f, "command rejected: {err}"),
            Self::InvalidStatusIndex(i) => write!(f, "status for unknown gamepad {i}"),
            Self::Overflow => write!(f, "receive buffer overflow"),
            Self::Send(err) => write!(f, "status send failed: {err}"),
        }
    }
}

/// Destination for [`Diagnostic`]s.
pub trait DiagnosticSink {
    fn log(&mut self, diagnostic: Diagnostic);
}

/// Sink that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl DiagnosticSink for NoopSink {
    fn log(&mut self, _diagnostic: Diagnostic) {}
}

impl DiagnosticSink for () {
    fn log(&mut self, _diagnostic: Diagnostic) {}
}

impl<D: DiagnosticSink + ?Sized> DiagnosticSink for &mut D {
    fn log(&mut self, diagnostic: Diagnostic) {
        (**self).log(diagnostic);
    }
}

/// Log `diagnostic` and forward it to `sink`.
pub(crate) fn report<D: DiagnosticSink + ?Sized>(sink: &mut D, diagnostic: Diagnostic) {
    warn!("padlink: {}", diagnostic);
    sink.log(diagnostic);
}

//! Gamepad state model and both ends of the padlink serial link.
//!
//! This crate builds on [`padlink_proto`] and adds everything that needs
//! state: per-gamepad inputs and outputs, change detection with
//! tolerances, command dispatch and the two link roles.
//!
//! # Overview
//!
//! - [`gamepad`]: one gamepad's inputs, outputs and mirrored [`Status`]
//! - [`dispatch`]: applies a [`Command`] to a set of gamepads
//! - [`GamepadLink`]: the gamepad end; sends Status, receives Commands
//! - [`ApplicationLink`]: the application end; receives Status, sends Commands
//! - [`Transport`]: byte-level access to the serial line
//! - [`InputHandler`] / [`OutputHandler`]: change notifications
//! - [`DiagnosticSink`]: where dropped frames and rejected commands go
//!
//! Both links are polled: nothing happens until `poll` is called, and
//! `poll` never blocks.
//!
//! # Example
//!
//! ```rust
//! use padlink_core::{GamepadLink, LinkConfig, ButtonId, Transport, TransportError};
//!
//! #[derive(Default)]
//! struct Loop(Vec<u8>);
//!
//! impl Transport for Loop {
//!     fn bytes_available(&mut self) -> usize { 0 }
//!     fn read_byte(&mut self) -> Option<u8> { None }
//!     fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), TransportError> {
//!         self.0.extend_from_slice(bytes);
//!         Ok(())
//!     }
//! }
//!
//! let mut link = GamepadLink::new(Loop::default(), LinkConfig::default());
//! assert!(link.set_button(0, ButtonId::Main1, true));
//! link.poll();
//! let (wire, _, _) = link.into_parts();
//! assert_eq!(wire.0.last(), Some(&0x00));
//! ```
//!
//! # Features
//!
//! - **`std`**: Enable standard library support (for host testing)
//! - **`defmt`**: Log through defmt and derive `defmt::Format`
//! - **`log`**: Log through the `log` facade
//! - **`embedded-io`**: [`IoTransport`] over any `embedded-io` serial port
//!
//! With neither `defmt` nor `log` enabled the crate logs nothing.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

// Must come first so the logging macros are visible to every module.
#[macro_use]
mod fmt;

pub mod application;
pub mod config;
pub mod diagnostics;
pub mod dispatch;
pub mod gamepad;
pub mod gamepad_link;
pub mod handler;
pub mod ids;
pub mod inputs;
pub mod link;
pub mod outputs;
pub mod transport;

pub use padlink_proto as proto;
pub use padlink_proto::{Color, Command, OutputSelector, Status, Target};

pub use application::ApplicationLink;
pub use config::{ConfigError, LinkConfig, MAX_GAMEPADS};
pub use diagnostics::{Diagnostic, DiagnosticSink, NoopSink};
pub use dispatch::{dispatch, DispatchError};
pub use gamepad::Gamepad;
pub use gamepad_link::GamepadLink;
pub use handler::{InputHandler, OutputHandler};
pub use ids::{
    BatteryId, ButtonGroup, ButtonId, ColorLedId, Id, JoystickId, PlayerLedId, RumbleId,
    SensorId, TriggerId,
};
pub use inputs::{Axis, Battery, Button, Joystick, Sensor};
pub use link::{LinkCore, LinkError};
pub use outputs::{ColorLed, PlayerLed, Rumble};
#[cfg(feature = "embedded-io")]
pub use transport::IoTransport;
pub use transport::{Transport, TransportError};

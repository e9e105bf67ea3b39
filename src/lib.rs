//! Framed serial link between a gamepad device and a host application.
//!
//! Facade over [`padlink_proto`] (framing and wire formats) and
//! [`padlink_core`] (state model and link roles). Everything needed for
//! either end of the link is re-exported here.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

pub use padlink_core::*;

//! Framing and binary wire formats for the two-device gamepad serial link.
//!
//! This crate provides everything both ends of the link need to agree on:
//!
//! - **Byte codec**
//!   - [`cobs`] - Consistent Overhead Byte Stuffing, so `0x00` can delimit frames
//!   - [`crc`] - CRC-16/CCITT-FALSE integrity check
//!   - [`frame`] - versioned envelope: [`encode_frame`], [`decode_frame`]
//!
//! - **Wire formats**
//!   - [`Status`] - fixed 30-byte controller snapshot (Gamepad → Application)
//!   - [`Command`] - variable-length output instruction (Application → Gamepad)
//!   - [`Serialize`] trait - serialization into caller buffers
//!
//! # Protocol Format
//!
//! ```text
//! COBS( [version][payload ...][crc16_lo][crc16_hi] ) 0x00
//! ```
//!
//! The payload is a Status record or a Command record; each role knows which
//! one it receives.
//!
//! # Example
//!
//! ```
//! use padlink_proto::{
//!     decode_frame, encode_frame, Command, OutputSelector, Serialize, Target,
//!     MAX_COMMAND_SIZE, MAX_FRAME_SIZE, MAX_PACKET_SIZE,
//! };
//!
//! let cmd = Command::rumble_start(Target::All, OutputSelector::All, 0x80, 10);
//! let mut payload = [0u8; MAX_COMMAND_SIZE];
//! let len = cmd.serialize(&mut payload).unwrap();
//!
//! let mut wire = [0u8; MAX_FRAME_SIZE];
//! let wire_len = encode_frame(&payload[..len], &mut wire).unwrap();
//!
//! // Receiver: strip the delimiter, verify, parse.
//! let mut packet = [0u8; MAX_PACKET_SIZE];
//! let received = decode_frame(&wire[..wire_len - 1], &mut packet).unwrap();
//! assert_eq!(Command::deserialize(received), Ok(cmd));
//! ```
//!
//! # Features
//!
//! - **`std`**: Enable standard library support (for host testing)
//! - **`defmt`**: Enable defmt formatting (for embedded logging)
//! - **`heapless`**: Enable `serialize_to_vec()` methods
//!
//! # No-std Support
//!
//! This crate is `#![no_std]` by default and uses no heap allocations,
//! making it suitable for embedded systems with limited resources.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

pub mod cobs;
pub mod command;
pub mod crc;
pub mod frame;
pub mod serialize;
pub mod status;

// Re-export types at crate root for convenience
pub use crate::cobs::CobsError;
pub use command::{
    Action, Color, Command, OpCode, OutputSelector, Target, COMMAND_HEADER_SIZE, MAX_COMMAND_SIZE,
};
pub use crc::{calculate_crc16, Crc16Digest};
pub use frame::{
    decode_frame, encode_frame, FrameError, FRAME_DELIMITER, MAX_ENCODED_SIZE, MAX_FRAME_SIZE,
    MAX_PACKET_SIZE, MAX_PAYLOAD_SIZE, PROTOCOL_VERSION,
};
pub use serialize::{DeserializeError, Serialize, SerializeError};
pub use status::{Status, STATUS_SIZE};

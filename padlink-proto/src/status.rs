//! Status record: one controller's complete input snapshot.
//!
//! # Wire Layout (30 bytes, little-endian)
//!
//! | Offset | Size | Field |
//! |--------|------|-------|
//! | 0  | 1 | gamepad index |
//! | 1  | 1 | D-pad bitmask |
//! | 2  | 2 | main buttons bitmask |
//! | 4  | 2 | joystick 1 X |
//! | 6  | 2 | joystick 1 Y |
//! | 8  | 2 | joystick 2 X |
//! | 10 | 2 | joystick 2 Y |
//! | 12 | 2 | trigger 1 |
//! | 14 | 2 | trigger 2 |
//! | 16 | 1 | misc buttons bitmask |
//! | 17 | 1 | battery 1 |
//! | 18 | 6 | sensor 1 X/Y/Z |
//! | 24 | 6 | sensor 2 X/Y/Z |

use crate::serialize::{DeserializeError, ReadCursor, Serialize, SerializeError, WriteCursor};

/// Size of a serialized [`Status`].
pub const STATUS_SIZE: usize = 30;

/// Complete input snapshot of one gamepad, as sent by the Gamepad role.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Status {
    /// Slot of the gamepad this snapshot describes (0-based).
    pub gamepad_index: u8,
    /// D-pad buttons, bit 0 = `DPad1` through bit 3 = `DPad4`.
    pub dpad_mask: u8,
    /// Main buttons, bit 0 = `Main1` through bit 15 = `Main16`.
    pub main_buttons_mask: u16,
    /// Joystick 1 horizontal axis.
    pub joystick1_x: i16,
    /// Joystick 1 vertical axis.
    pub joystick1_y: i16,
    /// Joystick 2 horizontal axis.
    pub joystick2_x: i16,
    /// Joystick 2 vertical axis.
    pub joystick2_y: i16,
    /// Analog trigger 1.
    pub trigger1: i16,
    /// Analog trigger 2.
    pub trigger2: i16,
    /// Misc buttons in the low four bits, bit 0 = `Misc1`.
    pub misc_buttons_mask: u8,
    /// Battery 1 level.
    pub battery1: u8,
    /// Sensor 1 X axis.
    pub sensor1_x: i16,
    /// Sensor 1 Y axis.
    pub sensor1_y: i16,
    /// Sensor 1 Z axis.
    pub sensor1_z: i16,
    /// Sensor 2 X axis.
    pub sensor2_x: i16,
    /// Sensor 2 Y axis.
    pub sensor2_y: i16,
    /// Sensor 2 Z axis.
    pub sensor2_z: i16,
}

impl Status {
    /// Create a neutral status for the given gamepad slot.
    #[must_use]
    pub const fn new(gamepad_index: u8) -> Self {
        Self {
            gamepad_index,
            dpad_mask: 0,
            main_buttons_mask: 0,
            joystick1_x: 0,
            joystick1_y: 0,
            joystick2_x: 0,
            joystick2_y: 0,
            trigger1: 0,
            trigger2: 0,
            misc_buttons_mask: 0,
            battery1: 0,
            sensor1_x: 0,
            sensor1_y: 0,
            sensor1_z: 0,
            sensor2_x: 0,
            sensor2_y: 0,
            sensor2_z: 0,
        }
    }

    /// Parse a status record.
    ///
    /// # Errors
    ///
    /// Returns [`DeserializeError::Length`] unless `data` is exactly
    /// [`STATUS_SIZE`] bytes.
    pub fn deserialize(data: &[u8]) -> Result<Self, DeserializeError> {
        let mut r = ReadCursor::exact(data, STATUS_SIZE)?;
        Ok(Self {
            gamepad_index: r.u8(),
            dpad_mask: r.u8(),
            main_buttons_mask: r.u16(),
            joystick1_x: r.i16(),
            joystick1_y: r.i16(),
            joystick2_x: r.i16(),
            joystick2_y: r.i16(),
            trigger1: r.i16(),
            trigger2: r.i16(),
            misc_buttons_mask: r.u8(),
            battery1: r.u8(),
            sensor1_x: r.i16(),
            sensor1_y: r.i16(),
            sensor1_z: r.i16(),
            sensor2_x: r.i16(),
            sensor2_y: r.i16(),
            sensor2_z: r.i16(),
        })
    }
}

impl Serialize for Status {
    fn serialized_len(&self) -> usize {
        STATUS_SIZE
    }

    fn serialize(&self, buf: &mut [u8]) -> Result<usize, SerializeError> {
        let mut w = WriteCursor::new(buf, STATUS_SIZE)?;
        w.put_u8(self.gamepad_index);
        w.put_u8(self.dpad_mask);
        w.put_u16(self.main_buttons_mask);
        w.put_i16(self.joystick1_x);
        w.put_i16(self.joystick1_y);
        w.put_i16(self.joystick2_x);
        w.put_i16(self.joystick2_y);
        w.put_i16(self.trigger1);
        w.put_i16(self.trigger2);
        w.put_u8(self.misc_buttons_mask);
        w.put_u8(self.battery1);
        w.put_i16(self.sensor1_x);
        w.put_i16(self.sensor1_y);
        w.put_i16(self.sensor1_z);
        w.put_i16(self.sensor2_x);
        w.put_i16(self.sensor2_y);
        w.put_i16(self.sensor2_z);
        Ok(w.finish())
    }
}

//! Command record: an output instruction from the Application role.
//!
//! # Wire Layout
//!
//! ```text
//! [opcode][target][output][params 0-4 bytes]
//! ```
//!
//! - `target` - gamepad index, or `0xFF` for every gamepad
//! - `output` - output index, `0xFF` for every output of the addressed kind,
//!   `0xFE` when the opcode has no output addressing
//!
//! The parameter size is fixed by the opcode, so a record's total length is
//! always `3 + OpCode::param_len()`.

use crate::serialize::{DeserializeError, ReadCursor, Serialize, SerializeError, WriteCursor};

/// Size of the opcode/target/output header.
pub const COMMAND_HEADER_SIZE: usize = 3;

/// Largest serialized [`Command`].
pub const MAX_COMMAND_SIZE: usize = COMMAND_HEADER_SIZE + 4;

/// Command opcodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum OpCode {
    Disconnect = 0x01,
    RumbleStart = 0x21,
    RumbleStop = 0x22,
    PlayerLedSet = 0x41,
    PlayerLedToggle = 0x42,
    PlayerLedsSetMask = 0x45,
    PlayerLedsToggleMask = 0x46,
    ColorLedSet = 0x61,
    ColorLedSetColor = 0x62,
    ColorLedToggle = 0x63,
}

impl OpCode {
    /// Look up an opcode by its wire value.
    #[must_use]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0x01 => Some(Self::Disconnect),
            0x21 => Some(Self::RumbleStart),
            0x22 => Some(Self::RumbleStop),
            0x41 => Some(Self::PlayerLedSet),
            0x42 => Some(Self::PlayerLedToggle),
            0x45 => Some(Self::PlayerLedsSetMask),
            0x46 => Some(Self::PlayerLedsToggleMask),
            0x61 => Some(Self::ColorLedSet),
            0x62 => Some(Self::ColorLedSetColor),
            0x63 => Some(Self::ColorLedToggle),
            _ => None,
        }
    }

    /// Number of parameter bytes that follow the header.
    #[inline]
    #[must_use]
    pub const fn param_len(self) -> usize {
        match self {
            Self::Disconnect | Self::RumbleStop | Self::PlayerLedToggle | Self::ColorLedToggle => 0,
            Self::PlayerLedSet
            | Self::PlayerLedsSetMask
            | Self::PlayerLedsToggleMask
            | Self::ColorLedSet => 1,
            Self::RumbleStart => 2,
            Self::ColorLedSetColor => 4,
        }
    }
}

impl TryFrom<u8> for OpCode {
    type Error = DeserializeError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_u8(value).ok_or(DeserializeError::UnknownOpcode(value))
    }
}

/// Which gamepad(s) a command addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Target {
    /// A single gamepad slot.
    Gamepad(u8),
    /// Every configured gamepad.
    All,
}

impl Target {
    /// Wire value for [`Target::All`].
    pub const ALL_VALUE: u8 = 0xFF;

    #[inline]
    #[must_use]
    pub const fn from_byte(value: u8) -> Self {
        match value {
            Self::ALL_VALUE => Self::All,
            index => Self::Gamepad(index),
        }
    }

    /// Wire value. `Gamepad(0xFF)` is indistinguishable from `All`.
    #[inline]
    #[must_use]
    pub const fn to_byte(self) -> u8 {
        match self {
            Self::Gamepad(index) => index,
            Self::All => Self::ALL_VALUE,
        }
    }
}

/// Which output(s) on each addressed gamepad a command applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OutputSelector {
    /// A single output of the kind the opcode names.
    Index(u8),
    /// Every output of that kind.
    All,
    /// The opcode does not address outputs.
    None,
}

impl OutputSelector {
    /// Wire value for [`OutputSelector::All`].
    pub const ALL_VALUE: u8 = 0xFF;
    /// Wire value for [`OutputSelector::None`].
    pub const NONE_VALUE: u8 = 0xFE;

    #[inline]
    #[must_use]
    pub const fn from_byte(value: u8) -> Self {
        match value {
            Self::ALL_VALUE => Self::All,
            Self::NONE_VALUE => Self::None,
            index => Self::Index(index),
        }
    }

    #[inline]
    #[must_use]
    pub const fn to_byte(self) -> u8 {
        match self {
            Self::Index(index) => index,
            Self::All => Self::ALL_VALUE,
            Self::None => Self::NONE_VALUE,
        }
    }
}

/// RGB color for color LEDs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Color {
    /// Red channel intensity.
    pub red: u8,
    /// Green channel intensity.
    pub green: u8,
    /// Blue channel intensity.
    pub blue: u8,
}

impl Color {
    /// Build a color from its three channels.
    #[must_use]
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }
}

/// Operation and parameters carried by a [`Command`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Action {
    /// Ask the target gamepads to disconnect. The output selector is ignored.
    Disconnect,
    /// Start rumble motors at `force` for `duration` (device-defined units).
    RumbleStart { force: u8, duration: u8 },
    /// Stop rumble motors.
    RumbleStop,
    /// Switch player LEDs on or off.
    PlayerLedSet { illuminated: bool },
    /// Invert player LEDs.
    PlayerLedToggle,
    /// Light player LED *i* exactly when bit *i* of `mask` is set.
    PlayerLedsSetMask { mask: u8 },
    /// Invert player LED *i* when bit *i* of `mask` is set.
    PlayerLedsToggleMask { mask: u8 },
    /// Switch color LEDs on or off, keeping their color.
    ColorLedSet { illuminated: bool },
    /// Set color LEDs' illumination and color together.
    ColorLedSetColor { illuminated: bool, color: Color },
    /// Invert color LEDs' illumination.
    ColorLedToggle,
}

impl Action {
    /// Opcode this action is sent under.
    #[must_use]
    pub const fn opcode(&self) -> OpCode {
        match self {
            Self::Disconnect => OpCode::Disconnect,
            Self::RumbleStart { .. } => OpCode::RumbleStart,
            Self::RumbleStop => OpCode::RumbleStop,
            Self::PlayerLedSet { .. } => OpCode::PlayerLedSet,
            Self::PlayerLedToggle => OpCode::PlayerLedToggle,
            Self::PlayerLedsSetMask { .. } => OpCode::PlayerLedsSetMask,
            Self::PlayerLedsToggleMask { .. } => OpCode::PlayerLedsToggleMask,
            Self::ColorLedSet { .. } => OpCode::ColorLedSet,
            Self::ColorLedSetColor { .. } => OpCode::ColorLedSetColor,
            Self::ColorLedToggle => OpCode::ColorLedToggle,
        }
    }
}

/// A complete output instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Command {
    pub target: Target,
    pub output: OutputSelector,
    pub action: Action,
}

impl Command {
    #[must_use]
    pub const fn new(target: Target, output: OutputSelector, action: Action) -> Self {
        Self {
            target,
            output,
            action,
        }
    }

    /// Disconnect the targeted gamepad(s). Carries no output addressing.
    #[must_use]
    pub const fn disconnect(target: Target) -> Self {
        Self::new(target, OutputSelector::None, Action::Disconnect)
    }

    #[must_use]
    pub const fn rumble_start(
        target: Target,
        output: OutputSelector,
        force: u8,
        duration: u8,
    ) -> Self {
        Self::new(target, output, Action::RumbleStart { force, duration })
    }

    #[must_use]
    pub const fn rumble_stop(target: Target, output: OutputSelector) -> Self {
        Self::new(target, output, Action::RumbleStop)
    }

    #[must_use]
    pub const fn player_led_set(target: Target, output: OutputSelector, illuminated: bool) -> Self {
        Self::new(target, output, Action::PlayerLedSet { illuminated })
    }

    #[must_use]
    pub const fn player_led_toggle(target: Target, output: OutputSelector) -> Self {
        Self::new(target, output, Action::PlayerLedToggle)
    }

    #[must_use]
    pub const fn player_leds_set_mask(target: Target, output: OutputSelector, mask: u8) -> Self {
        Self::new(target, output, Action::PlayerLedsSetMask { mask })
    }

    #[must_use]
    pub const fn player_leds_toggle_mask(target: Target, output: OutputSelector, mask: u8) -> Self {
        Self::new(target, output, Action::PlayerLedsToggleMask { mask })
    }

    #[must_use]
    pub const fn color_led_set(target: Target, output: OutputSelector, illuminated: bool) -> Self {
        Self::new(target, output, Action::ColorLedSet { illuminated })
    }

    #[must_use]
    pub const fn color_led_set_color(
        target: Target,
        output: OutputSelector,
        illuminated: bool,
        color: Color,
    ) -> Self {
        Self::new(target, output, Action::ColorLedSetColor { illuminated, color })
    }

    #[must_use]
    pub const fn color_led_toggle(target: Target, output: OutputSelector) -> Self {
        Self::new(target, output, Action::ColorLedToggle)
    }

    #[inline]
    #[must_use]
    pub const fn opcode(&self) -> OpCode {
        self.action.opcode()
    }

    /// Parse a command record.
    ///
    /// Boolean parameters take bit 0 of their byte.
    ///
    /// # Errors
    ///
    /// - [`DeserializeError::Length`] if `data` is shorter than the header, or
    ///   its length differs from the size the opcode implies
    /// - [`DeserializeError::UnknownOpcode`] if the opcode is not recognised
    pub fn deserialize(data: &[u8]) -> Result<Self, DeserializeError> {
        let Some(&op) = data.first() else {
            return Err(DeserializeError::Length {
                expected: COMMAND_HEADER_SIZE,
                actual: 0,
            });
        };
        let opcode = OpCode::try_from(op)?;

        let mut r = ReadCursor::exact(data, COMMAND_HEADER_SIZE + opcode.param_len())?;
        r.u8();
        let target = Target::from_byte(r.u8());
        let output = OutputSelector::from_byte(r.u8());

        let action = match opcode {
            OpCode::Disconnect => Action::Disconnect,
            OpCode::RumbleStart => Action::RumbleStart {
                force: r.u8(),
                duration: r.u8(),
            },
            OpCode::RumbleStop => Action::RumbleStop,
            OpCode::PlayerLedSet => Action::PlayerLedSet {
                illuminated: flag(r.u8()),
            },
            OpCode::PlayerLedToggle => Action::PlayerLedToggle,
            OpCode::PlayerLedsSetMask => Action::PlayerLedsSetMask { mask: r.u8() },
            OpCode::PlayerLedsToggleMask => Action::PlayerLedsToggleMask { mask: r.u8() },
            OpCode::ColorLedSet => Action::ColorLedSet {
                illuminated: flag(r.u8()),
            },
            OpCode::ColorLedSetColor => Action::ColorLedSetColor {
                illuminated: flag(r.u8()),
                color: Color::new(r.u8(), r.u8(), r.u8()),
            },
            OpCode::ColorLedToggle => Action::ColorLedToggle,
        };

        Ok(Self {
            target,
            output,
            action,
        })
    }
}

#[inline]
const fn flag(byte: u8) -> bool {
    byte & 1 != 0
}

impl Serialize for Command {
    fn serialized_len(&self) -> usize {
        COMMAND_HEADER_SIZE + self.opcode().param_len()
    }

    fn serialize(&self, buf: &mut [u8]) -> Result<usize, SerializeError> {
        let mut w = WriteCursor::new(buf, self.serialized_len())?;
        w.put_u8(self.opcode() as u8);
        w.put_u8(self.target.to_byte());
        w.put_u8(self.output.to_byte());

        match self.action {
            Action::RumbleStart { force, duration } => {
                w.put_u8(force);
                w.put_u8(duration);
            }
            Action::PlayerLedSet { illuminated } | Action::ColorLedSet { illuminated } => {
                w.put_u8(u8::from(illuminated));
            }
            Action::PlayerLedsSetMask { mask } | Action::PlayerLedsToggleMask { mask } => {
                w.put_u8(mask);
            }
            Action::ColorLedSetColor { illuminated, color } => {
                w.put_u8(u8::from(illuminated));
                w.put_u8(color.red);
                w.put_u8(color.green);
                w.put_u8(color.blue);
            }
            Action::Disconnect
            | Action::RumbleStop
            | Action::PlayerLedToggle
            | Action::ColorLedToggle => {}
        }

        Ok(w.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(command: &Command) -> ([u8; MAX_COMMAND_SIZE], usize) {
        let mut buf = [0u8; MAX_COMMAND_SIZE];
        let len = command.serialize(&mut buf).unwrap();
        (buf, len)
    }

    #[test]
    fn test_opcode_param_len() {
        assert_eq!(OpCode::Disconnect.param_len(), 0);
        assert_eq!(OpCode::RumbleStart.param_len(), 2);
        assert_eq!(OpCode::PlayerLedSet.param_len(), 1);
        assert_eq!(OpCode::PlayerLedsToggleMask.param_len(), 1);
        assert_eq!(OpCode::ColorLedSetColor.param_len(), 4);
        assert_eq!(OpCode::ColorLedToggle.param_len(), 0);
    }

    #[test]
    fn test_opcode_from_u8() {
        assert_eq!(OpCode::from_u8(0x21), Some(OpCode::RumbleStart));
        assert_eq!(OpCode::from_u8(0x63), Some(OpCode::ColorLedToggle));
        assert_eq!(OpCode::from_u8(0x00), None);
        assert_eq!(OpCode::try_from(0x99), Err(DeserializeError::UnknownOpcode(0x99)));
    }

    #[test]
    fn test_sentinels() {
        assert_eq!(Target::from_byte(0xFF), Target::All);
        assert_eq!(Target::from_byte(3), Target::Gamepad(3));
        assert_eq!(Target::All.to_byte(), 0xFF);

        assert_eq!(OutputSelector::from_byte(0xFF), OutputSelector::All);
        assert_eq!(OutputSelector::from_byte(0xFE), OutputSelector::None);
        assert_eq!(OutputSelector::from_byte(0), OutputSelector::Index(0));
        assert_eq!(OutputSelector::None.to_byte(), 0xFE);
    }

    #[test]
    fn test_rumble_start_bytes() {
        let cmd = Command::rumble_start(Target::Gamepad(1), OutputSelector::All, 0x80, 10);
        let (buf, len) = encode(&cmd);
        assert_eq!(&buf[..len], &[0x21, 0x01, 0xFF, 0x80, 0x0A]);
        assert_eq!(Command::deserialize(&buf[..len]), Ok(cmd));
    }

    #[test]
    fn test_disconnect_bytes() {
        let cmd = Command::disconnect(Target::All);
        let (buf, len) = encode(&cmd);
        assert_eq!(&buf[..len], &[0x01, 0xFF, 0xFE]);
        assert_eq!(Command::deserialize(&buf[..len]), Ok(cmd));
    }

    #[test]
    fn test_color_led_set_color_bytes() {
        let cmd = Command::color_led_set_color(
            Target::Gamepad(0),
            OutputSelector::Index(0),
            true,
            Color::new(0x10, 0x20, 0x30),
        );
        let (buf, len) = encode(&cmd);
        assert_eq!(&buf[..len], &[0x62, 0x00, 0x00, 0x01, 0x10, 0x20, 0x30]);
        assert_eq!(Command::deserialize(&buf[..len]), Ok(cmd));
    }

    #[test]
    fn test_every_action_round_trips() {
        let actions = [
            Action::Disconnect,
            Action::RumbleStart { force: 255, duration: 0 },
            Action::RumbleStop,
            Action::PlayerLedSet { illuminated: false },
            Action::PlayerLedToggle,
            Action::PlayerLedsSetMask { mask: 0b1010 },
            Action::PlayerLedsToggleMask { mask: 0b0101 },
            Action::ColorLedSet { illuminated: true },
            Action::ColorLedSetColor {
                illuminated: false,
                color: Color::new(1, 2, 3),
            },
            Action::ColorLedToggle,
        ];
        for action in actions {
            let cmd = Command::new(Target::Gamepad(2), OutputSelector::Index(1), action);
            let (buf, len) = encode(&cmd);
            assert_eq!(len, cmd.serialized_len());
            assert_eq!(buf[0], action.opcode() as u8);
            assert_eq!(Command::deserialize(&buf[..len]), Ok(cmd));
        }
    }

    #[test]
    fn test_bool_param_uses_bit_zero() {
        let on = Command::deserialize(&[0x41, 0x00, 0x01, 0x03]).unwrap();
        assert_eq!(on.action, Action::PlayerLedSet { illuminated: true });

        let off = Command::deserialize(&[0x61, 0x00, 0x00, 0x02]).unwrap();
        assert_eq!(off.action, Action::ColorLedSet { illuminated: false });
    }

    #[test]
    fn test_unknown_opcode() {
        assert_eq!(
            Command::deserialize(&[0x7F, 0x00, 0x00]),
            Err(DeserializeError::UnknownOpcode(0x7F))
        );
    }

    #[test]
    fn test_length_mismatch() {
        // RumbleStart needs two parameter bytes.
        assert_eq!(
            Command::deserialize(&[0x21, 0x00, 0xFF, 0x80]),
            Err(DeserializeError::Length {
                expected: 5,
                actual: 4
            })
        );
        assert_eq!(
            Command::deserialize(&[0x22, 0x00, 0xFF, 0x00]),
            Err(DeserializeError::Length {
                expected: 3,
                actual: 4
            })
        );
        assert!(Command::deserialize(&[0x01, 0xFF]).is_err());
        assert!(Command::deserialize(&[]).is_err());
    }

    #[test]
    fn test_serialize_buffer_too_small() {
        let cmd = Command::rumble_start(Target::All, OutputSelector::All, 1, 1);
        let mut buf = [0u8; 4];
        assert_eq!(cmd.serialize(&mut buf), Err(SerializeError::BufferTooSmall));
    }
}

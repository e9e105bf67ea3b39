//! Command dispatch onto gamepad outputs.
//!
//! Every command resolves to a set of gamepad slots (one, or all) and a set
//! of outputs of the kind its opcode names (one, all, or none for
//! disconnect), then applies the same single-gamepad, single-output
//! primitive to each pair in ascending index order.
//!
//! Addressing is validated in full before anything is touched, so a
//! rejected command never leaves some gamepads updated and others not.

use core::ops::Range;

use crate::gamepad::Gamepad;
use crate::handler::OutputHandler;
use crate::ids::{ColorLedId, Id, PlayerLedId, RumbleId};
use padlink_proto::{Action, Command, OutputSelector, Target};

/// Error type for command dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DispatchError {
    /// Single target index is not a configured gamepad slot.
    InvalidTarget(u8),
    /// Output index is out of range for the opcode's output kind, or the
    /// opcode needs output addressing and got none (`0xFE`).
    InvalidOutput(u8),
}

impl core::fmt::Display for DispatchError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidTarget(i) => write!(f, "invalid target gamepad {i}"),
            Self::InvalidOutput(i) => write!(f, "invalid output {i:#04x}"),
        }
    }
}

/// Resolve a target to a range of slot indices.
pub(crate) fn resolve_target(target: Target, count: usize) -> Result<Range<usize>, DispatchError> {
    match target {
        Target::All => Ok(0..count),
        Target::Gamepad(index) if usize::from(index) < count => {
            let index = usize::from(index);
            Ok(index..index + 1)
        }
        Target::Gamepad(index) => Err(DispatchError::InvalidTarget(index)),
    }
}

/// Resolve an output selector to the IDs it names.
fn resolve_output<I: Id>(output: OutputSelector) -> Result<&'static [I], DispatchError> {
    match output {
        OutputSelector::All => Ok(I::ALL),
        OutputSelector::Index(index) => {
            let index = usize::from(index);
            I::ALL
                .get(index..=index)
                .ok_or(DispatchError::InvalidOutput(output.to_byte()))
        }
        OutputSelector::None => Err(DispatchError::InvalidOutput(output.to_byte())),
    }
}

/// Check `command`'s addressing against `gamepad_count` slots without
/// touching any state.
///
/// Succeeds exactly when [`dispatch`] on that many gamepads would.
///
/// # Errors
///
/// Same as [`dispatch`].
pub fn validate(command: &Command, gamepad_count: usize) -> Result<(), DispatchError> {
    resolve_target(command.target, gamepad_count)?;
    match command.action {
        Action::Disconnect => Ok(()),
        Action::RumbleStart { .. } | Action::RumbleStop => {
            resolve_output::<RumbleId>(command.output).map(drop)
        }
        Action::PlayerLedSet { .. }
        | Action::PlayerLedToggle
        | Action::PlayerLedsSetMask { .. }
        | Action::PlayerLedsToggleMask { .. } => {
            resolve_output::<PlayerLedId>(command.output).map(drop)
        }
        Action::ColorLedSet { .. } | Action::ColorLedSetColor { .. } | Action::ColorLedToggle => {
            resolve_output::<ColorLedId>(command.output).map(drop)
        }
    }
}

/// Apply `command` to `gamepads`, notifying `handler` of every change.
///
/// The output selector of a disconnect is ignored.
///
/// # Errors
///
/// - [`DispatchError::InvalidTarget`] if a single target is not a slot in `gamepads`
/// - [`DispatchError::InvalidOutput`] if the output selector does not fit the opcode
///
/// Nothing is mutated and nothing is notified on error.
pub fn dispatch<H: OutputHandler + ?Sized>(
    gamepads: &mut [Gamepad],
    command: &Command,
    handler: &mut H,
) -> Result<(), DispatchError> {
    let slots = resolve_target(command.target, gamepads.len())?;
    let gamepads = &mut gamepads[slots];

    match command.action {
        Action::Disconnect => {
            for pad in gamepads {
                pad.disconnect(handler);
            }
        }
        Action::RumbleStart { force, duration } => {
            let rumbles = resolve_output::<RumbleId>(command.output)?;
            for pad in gamepads {
                for &id in rumbles {
                    pad.start_rumble(id, force, duration, handler);
                }
            }
        }
        Action::RumbleStop => {
            let rumbles = resolve_output::<RumbleId>(command.output)?;
            for pad in gamepads {
                for &id in rumbles {
                    pad.stop_rumble(id, handler);
                }
            }
        }
        Action::PlayerLedSet { illuminated } => {
            let leds = resolve_output::<PlayerLedId>(command.output)?;
            for pad in gamepads {
                for &id in leds {
                    pad.set_player_led(id, illuminated, handler);
                }
            }
        }
        Action::PlayerLedToggle => {
            let leds = resolve_output::<PlayerLedId>(command.output)?;
            for pad in gamepads {
                for &id in leds {
                    pad.toggle_player_led(id, handler);
                }
            }
        }
        Action::PlayerLedsSetMask { mask } => {
            let leds = resolve_output::<PlayerLedId>(command.output)?;
            for pad in gamepads {
                for &id in leds {
                    pad.set_player_led(id, mask_bit(mask, id), handler);
                }
            }
        }
        Action::PlayerLedsToggleMask { mask } => {
            let leds = resolve_output::<PlayerLedId>(command.output)?;
            for pad in gamepads {
                for &id in leds.iter().filter(|&&id| mask_bit(mask, id)) {
                    pad.toggle_player_led(id, handler);
                }
            }
        }
        Action::ColorLedSet { illuminated } => {
            let leds = resolve_output::<ColorLedId>(command.output)?;
            for pad in gamepads {
                for &id in leds {
                    pad.set_color_led(id, illuminated, handler);
                }
            }
        }
        Action::ColorLedSetColor { illuminated, color } => {
            let leds = resolve_output::<ColorLedId>(command.output)?;
            for pad in gamepads {
                for &id in leds {
                    pad.set_color_led_color(id, illuminated, color, handler);
                }
            }
        }
        Action::ColorLedToggle => {
            let leds = resolve_output::<ColorLedId>(command.output)?;
            for pad in gamepads {
                for &id in leds {
                    pad.toggle_color_led(id, handler);
                }
            }
        }
    }

    Ok(())
}

#[inline]
fn mask_bit(mask: u8, id: PlayerLedId) -> bool {
    mask & (1 << id.index()) != 0
}

//! Typed identifiers for every input and output on a gamepad.
//!
//! Each ID set is a closed enum, so an out-of-range ID cannot be constructed
//! through the Rust API. Raw indices coming off the wire go through
//! `from_index`, which returns `None` for anything outside the set.

use padlink_proto::OutputSelector;

/// Common interface of all ID sets.
pub trait Id: Copy + Eq + 'static {
    /// Every member, in index order.
    const ALL: &'static [Self];

    /// Position of this ID within [`Id::ALL`].
    fn index(self) -> usize;
}

macro_rules! id_set {
    ($(#[$meta:meta])* $name:ident { $($variant:ident),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[cfg_attr(feature = "defmt", derive(defmt::Format))]
        #[repr(u8)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// Every member, in index order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Number of members.
            pub const COUNT: usize = Self::ALL.len();

            #[inline]
            #[must_use]
            pub const fn index(self) -> usize {
                self as usize
            }

            /// Convert a raw index, rejecting anything out of range.
            #[inline]
            #[must_use]
            pub const fn from_index(index: usize) -> Option<Self> {
                if index < Self::COUNT {
                    Some(Self::ALL[index])
                } else {
                    None
                }
            }
        }

        impl Id for $name {
            const ALL: &'static [Self] = $name::ALL;

            #[inline]
            fn index(self) -> usize {
                $name::index(self)
            }
        }
    };
}

id_set! {
    /// Digital buttons, grouped as D-pad, main and misc.
    ButtonId {
        DPad1, DPad2, DPad3, DPad4,
        Main1, Main2, Main3, Main4, Main5, Main6, Main7, Main8,
        Main9, Main10, Main11, Main12, Main13, Main14, Main15, Main16,
        Misc1, Misc2, Misc3, Misc4,
    }
}

id_set! {
    /// Analog triggers.
    TriggerId { Trigger1, Trigger2 }
}

id_set! {
    /// Two-axis joysticks.
    JoystickId { Joystick1, Joystick2 }
}

id_set! {
    BatteryId { Battery1 }
}

id_set! {
    /// Three-axis motion sensors (e.g. gyro and accelerometer).
    SensorId { Sensor1, Sensor2 }
}

id_set! {
    RumbleId { Rumble1 }
}

id_set! {
    PlayerLedId { PlayerLed1, PlayerLed2, PlayerLed3, PlayerLed4 }
}

id_set! {
    ColorLedId { ColorLed1 }
}

/// Status bitmask a button is reported in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonGroup {
    DPad,
    Main,
    Misc,
}

const DPAD_COUNT: usize = 4;
const MAIN_COUNT: usize = 16;

impl ButtonId {
    #[must_use]
    pub const fn group(self) -> ButtonGroup {
        match self.index() {
            i if i < DPAD_COUNT => ButtonGroup::DPad,
            i if i < DPAD_COUNT + MAIN_COUNT => ButtonGroup::Main,
            _ => ButtonGroup::Misc,
        }
    }

    /// Bit position within the group's Status bitmask.
    #[must_use]
    pub const fn bit(self) -> u32 {
        let i = self.index();
        let offset = match self.group() {
            ButtonGroup::DPad => 0,
            ButtonGroup::Main => DPAD_COUNT,
            ButtonGroup::Misc => DPAD_COUNT + MAIN_COUNT,
        };
        (i - offset) as u32
    }
}

macro_rules! output_selector_from {
    ($($name:ident),+) => {
        $(
            impl From<$name> for OutputSelector {
                fn from(id: $name) -> Self {
                    OutputSelector::Index(id as u8)
                }
            }
        )+
    };
}

output_selector_from!(RumbleId, PlayerLedId, ColorLedId);

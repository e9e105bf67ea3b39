//! Link configuration.

use crate::inputs::MIN_TOLERANCE;

/// Most gamepads a single link can address.
pub const MAX_GAMEPADS: usize = 4;

/// Error type for configuration validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Gamepad count outside `1..=MAX_GAMEPADS`.
    InvalidGamepadCount(usize),
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidGamepadCount(n) => {
                write!(f, "invalid gamepad count {n} (expected 1..={MAX_GAMEPADS})")
            }
        }
    }
}

/// Validated link settings.
///
/// The tolerances are applied to every slot when the link is built and can
/// be adjusted per channel afterwards.
///
/// ```
/// use padlink_core::LinkConfig;
///
/// let config = LinkConfig::new(2).unwrap().with_axis_tolerance(64);
/// assert_eq!(config.gamepad_count(), 2);
/// assert!(LinkConfig::new(5).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinkConfig {
    gamepad_count: usize,
    axis_tolerance: u16,
    battery_tolerance: u8,
}

impl LinkConfig {
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidGamepadCount`] unless
    /// `1 <= gamepad_count <= MAX_GAMEPADS`.
    pub const fn new(gamepad_count: usize) -> Result<Self, ConfigError> {
        if gamepad_count == 0 || gamepad_count > MAX_GAMEPADS {
            return Err(ConfigError::InvalidGamepadCount(gamepad_count));
        }
        Ok(Self {
            gamepad_count,
            axis_tolerance: MIN_TOLERANCE,
            battery_tolerance: 1,
        })
    }

    #[must_use]
    pub const fn with_axis_tolerance(mut self, tolerance: u16) -> Self {
        self.axis_tolerance = tolerance;
        self
    }

    #[must_use]
    pub const fn with_battery_tolerance(mut self, tolerance: u8) -> Self {
        self.battery_tolerance = tolerance;
        self
    }

    #[inline]
    #[must_use]
    pub const fn gamepad_count(&self) -> usize {
        self.gamepad_count
    }

    #[inline]
    #[must_use]
    pub const fn axis_tolerance(&self) -> u16 {
        self.axis_tolerance
    }

    #[inline]
    #[must_use]
    pub const fn battery_tolerance(&self) -> u8 {
        self.battery_tolerance
    }
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            gamepad_count: 1,
            axis_tolerance: MIN_TOLERANCE,
            battery_tolerance: 1,
        }
    }
}

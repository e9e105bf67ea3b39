//! Output channels driven by commands.

use padlink_proto::Color;

/// Rumble motor. Every `set` is reported, even with unchanged values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rumble {
    force: u8,
    duration: u8,
}

impl Rumble {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            force: 0,
            duration: 0,
        }
    }

    pub fn set(&mut self, force: u8, duration: u8) {
        self.force = force;
        self.duration = duration;
    }

    pub fn stop(&mut self) {
        self.set(0, 0);
    }

    #[inline]
    #[must_use]
    pub const fn force(&self) -> u8 {
        self.force
    }

    #[inline]
    #[must_use]
    pub const fn duration(&self) -> u8 {
        self.duration
    }
}

/// Single-color player indicator LED.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PlayerLed {
    illuminated: bool,
}

impl PlayerLed {
    #[must_use]
    pub const fn new() -> Self {
        Self { illuminated: false }
    }

    #[inline]
    #[must_use]
    pub const fn is_illuminated(&self) -> bool {
        self.illuminated
    }

    /// Returns `true` if the illumination changed.
    pub fn set(&mut self, illuminated: bool) -> bool {
        if self.illuminated == illuminated {
            return false;
        }
        self.illuminated = illuminated;
        true
    }

    pub fn toggle(&mut self) {
        self.illuminated = !self.illuminated;
    }
}

/// RGB LED.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ColorLed {
    illuminated: bool,
    color: Color,
}

impl ColorLed {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            illuminated: false,
            color: Color::new(0, 0, 0),
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_illuminated(&self) -> bool {
        self.illuminated
    }

    #[inline]
    #[must_use]
    pub const fn color(&self) -> Color {
        self.color
    }

    /// Returns `true` if the illumination changed. The color is kept.
    pub fn set(&mut self, illuminated: bool) -> bool {
        if self.illuminated == illuminated {
            return false;
        }
        self.illuminated = illuminated;
        true
    }

    /// Returns `true` if either the illumination or the color changed.
    pub fn set_color(&mut self, illuminated: bool, color: Color) -> bool {
        if self.illuminated == illuminated && self.color == color {
            return false;
        }
        self.illuminated = illuminated;
        self.color = color;
        true
    }

    pub fn toggle(&mut self) {
        self.illuminated = !self.illuminated;
    }
}

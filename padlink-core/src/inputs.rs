//! Input channels and their change-detection rules.
//!
//! Every setter returns `true` only when the new value counts as a real
//! change. A rejected update leaves the stored value untouched, so small
//! jitter never accumulates into drift.

/// Smallest tolerance; every distinct value is a change.
pub const MIN_TOLERANCE: u16 = 1;

/// Largest axis tolerance.
pub const MAX_AXIS_TOLERANCE: u16 = i16::MAX as u16;

/// Digital button.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Button {
    pressed: bool,
}

impl Button {
    #[must_use]
    pub const fn new() -> Self {
        Self { pressed: false }
    }

    #[inline]
    #[must_use]
    pub const fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Returns `true` if the pressed state changed.
    pub fn set_pressed(&mut self, pressed: bool) -> bool {
        if self.pressed == pressed {
            return false;
        }
        self.pressed = pressed;
        true
    }
}

/// Signed 16-bit analog channel with a change threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Axis {
    value: i16,
    tolerance: u16,
}

impl Default for Axis {
    fn default() -> Self {
        Self::new(MIN_TOLERANCE)
    }
}

impl Axis {
    /// Create an axis at zero. `tolerance` is clamped like [`Axis::set_tolerance`].
    #[must_use]
    pub const fn new(tolerance: u16) -> Self {
        Self {
            value: 0,
            tolerance: clamp_axis_tolerance(tolerance),
        }
    }

    #[inline]
    #[must_use]
    pub const fn value(&self) -> i16 {
        self.value
    }

    #[inline]
    #[must_use]
    pub const fn tolerance(&self) -> u16 {
        self.tolerance
    }

    /// Clamped to `[MIN_TOLERANCE, MAX_AXIS_TOLERANCE]`.
    pub fn set_tolerance(&mut self, tolerance: u16) {
        self.tolerance = clamp_axis_tolerance(tolerance);
    }

    /// Accept `value` if it differs from the current value by at least the
    /// tolerance. Returns `true` if accepted.
    pub fn set_value(&mut self, value: i16) -> bool {
        let delta = (i32::from(value) - i32::from(self.value)).unsigned_abs();
        if delta < u32::from(self.tolerance) {
            return false;
        }
        self.value = value;
        true
    }
}

const fn clamp_axis_tolerance(tolerance: u16) -> u16 {
    if tolerance < MIN_TOLERANCE {
        MIN_TOLERANCE
    } else if tolerance > MAX_AXIS_TOLERANCE {
        MAX_AXIS_TOLERANCE
    } else {
        tolerance
    }
}

/// Battery level with a change threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Battery {
    level: u8,
    tolerance: u8,
}

impl Default for Battery {
    fn default() -> Self {
        Self::new(1)
    }
}

impl Battery {
    #[must_use]
    pub const fn new(tolerance: u8) -> Self {
        Self {
            level: 0,
            tolerance: if tolerance == 0 { 1 } else { tolerance },
        }
    }

    #[inline]
    #[must_use]
    pub const fn level(&self) -> u8 {
        self.level
    }

    #[inline]
    #[must_use]
    pub const fn tolerance(&self) -> u8 {
        self.tolerance
    }

    /// Zero is raised to one.
    pub fn set_tolerance(&mut self, tolerance: u8) {
        self.tolerance = tolerance.max(1);
    }

    /// Returns `true` if the level moved by at least the tolerance.
    pub fn set_level(&mut self, level: u8) -> bool {
        if level.abs_diff(self.level) < self.tolerance {
            return false;
        }
        self.level = level;
        true
    }
}

/// Two-axis joystick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Joystick {
    pub x: Axis,
    pub y: Axis,
}

impl Joystick {
    #[must_use]
    pub const fn new(tolerance: u16) -> Self {
        Self {
            x: Axis::new(tolerance),
            y: Axis::new(tolerance),
        }
    }

    /// Update both axes. Both are always evaluated; returns `true` if either
    /// changed.
    pub fn set(&mut self, x: i16, y: i16) -> bool {
        let x_changed = self.x.set_value(x);
        let y_changed = self.y.set_value(y);
        x_changed || y_changed
    }

    #[inline]
    #[must_use]
    pub const fn values(&self) -> (i16, i16) {
        (self.x.value(), self.y.value())
    }
}

/// Three-axis sensor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Sensor {
    pub x: Axis,
    pub y: Axis,
    pub z: Axis,
}

impl Sensor {
    #[must_use]
    pub const fn new(tolerance: u16) -> Self {
        Self {
            x: Axis::new(tolerance),
            y: Axis::new(tolerance),
            z: Axis::new(tolerance),
        }
    }

    /// Update all three axes. Every axis is evaluated; returns `true` if any
    /// changed.
    pub fn set(&mut self, x: i16, y: i16, z: i16) -> bool {
        let x_changed = self.x.set_value(x);
        let y_changed = self.y.set_value(y);
        let z_changed = self.z.set_value(z);
        x_changed || y_changed || z_changed
    }

    #[inline]
    #[must_use]
    pub const fn values(&self) -> (i16, i16, i16) {
        (self.x.value(), self.y.value(), self.z.value())
    }
}

//! Notification traits for input and output changes.
//!
//! Every method has an empty default, so implementors only override the
//! events they care about. `()` implements both traits and ignores
//! everything.
//!
//! Notifications fire once per accepted transition and never for updates
//! that the change-detection rules reject.

use crate::ids::{
    BatteryId, ButtonId, ColorLedId, JoystickId, PlayerLedId, RumbleId, SensorId, TriggerId,
};
use padlink_proto::Color;

/// Receives input changes (Application role, from decoded Status records).
#[allow(unused_variables)]
pub trait InputHandler {
    fn on_button_press(&mut self, gamepad: u8, button: ButtonId) {}

    fn on_button_release(&mut self, gamepad: u8, button: ButtonId) {}

    fn on_trigger_change(&mut self, gamepad: u8, trigger: TriggerId, value: i16) {}

    /// Carries both current axis values, whichever one moved.
    fn on_joystick_change(&mut self, gamepad: u8, joystick: JoystickId, x: i16, y: i16) {}

    fn on_battery_change(&mut self, gamepad: u8, battery: BatteryId, level: u8) {}

    /// Carries all three current axis values, whichever ones moved.
    fn on_sensor_change(&mut self, gamepad: u8, sensor: SensorId, x: i16, y: i16, z: i16) {}
}

/// Receives output changes (Gamepad role, from dispatched Commands).
#[allow(unused_variables)]
pub trait OutputHandler {
    /// Fired for every rumble start or stop, even with repeated values.
    fn on_rumble(&mut self, gamepad: u8, rumble: RumbleId, force: u8, duration: u8) {}

    fn on_player_led_change(&mut self, gamepad: u8, led: PlayerLedId, illuminated: bool) {}

    fn on_color_led_change(
        &mut self,
        gamepad: u8,
        led: ColorLedId,
        illuminated: bool,
        color: Color,
    ) {
    }

    fn on_disconnect(&mut self, gamepad: u8) {}
}

impl InputHandler for () {}

impl OutputHandler for () {}

impl<H: InputHandler + ?Sized> InputHandler for &mut H {
    fn on_button_press(&mut self, gamepad: u8, button: ButtonId) {
        (**self).on_button_press(gamepad, button);
    }

    fn on_button_release(&mut self, gamepad: u8, button: ButtonId) {
        (**self).on_button_release(gamepad, button);
    }

    fn on_trigger_change(&mut self, gamepad: u8, trigger: TriggerId, value: i16) {
        (**self).on_trigger_change(gamepad, trigger, value);
    }

    fn on_joystick_change(&mut self, gamepad: u8, joystick: JoystickId, x: i16, y: i16) {
        (**self).on_joystick_change(gamepad, joystick, x, y);
    }

    fn on_battery_change(&mut self, gamepad: u8, battery: BatteryId, level: u8) {
        (**self).on_battery_change(gamepad, battery, level);
    }

    fn on_sensor_change(&mut self, gamepad: u8, sensor: SensorId, x: i16, y: i16, z: i16) {
        (**self).on_sensor_change(gamepad, sensor, x, y, z);
    }
}

impl<H: OutputHandler + ?Sized> OutputHandler for &mut H {
    fn on_rumble(&mut self, gamepad: u8, rumble: RumbleId, force: u8, duration: u8) {
        (**self).on_rumble(gamepad, rumble, force, duration);
    }

    fn on_player_led_change(&mut self, gamepad: u8, led: PlayerLedId, illuminated: bool) {
        (**self).on_player_led_change(gamepad, led, illuminated);
    }

    fn on_color_led_change(
        &mut self,
        gamepad: u8,
        led: ColorLedId,
        illuminated: bool,
        color: Color,
    ) {
        (**self).on_color_led_change(gamepad, led, illuminated, color);
    }

    fn on_disconnect(&mut self, gamepad: u8) {
        (**self).on_disconnect(gamepad);
    }
}

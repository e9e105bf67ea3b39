//! Per-controller state with an incrementally maintained Status record.

use crate::handler::{InputHandler, OutputHandler};
use crate::ids::{
    BatteryId, ButtonGroup, ButtonId, ColorLedId, JoystickId, PlayerLedId, RumbleId, SensorId,
    TriggerId,
};
use crate::inputs::{Axis, Battery, Button, Joystick, Sensor, MIN_TOLERANCE};
use crate::outputs::{ColorLed, PlayerLed, Rumble};
use padlink_proto::{Color, Status};

/// State of one gamepad slot.
///
/// Input setters take an [`InputHandler`] and output operations an
/// [`OutputHandler`]; each fires at most once per call and only when the
/// state actually changed. Accepted input changes are mirrored into
/// [`Gamepad::status`] and mark it pending for transmission.
#[derive(Debug, Clone)]
pub struct Gamepad {
    index: u8,
    buttons: [Button; ButtonId::COUNT],
    triggers: [Axis; TriggerId::COUNT],
    joysticks: [Joystick; JoystickId::COUNT],
    batteries: [Battery; BatteryId::COUNT],
    sensors: [Sensor; SensorId::COUNT],
    rumbles: [Rumble; RumbleId::COUNT],
    player_leds: [PlayerLed; PlayerLedId::COUNT],
    color_leds: [ColorLed; ColorLedId::COUNT],
    status: Status,
    pending: bool,
}

impl Gamepad {
    /// Create a gamepad with the minimum tolerance on every channel.
    #[must_use]
    pub const fn new(index: u8) -> Self {
        Self::with_tolerances(index, MIN_TOLERANCE, 1)
    }

    /// Create a gamepad with the given default tolerances on every analog
    /// channel and battery.
    #[must_use]
    pub const fn with_tolerances(index: u8, axis_tolerance: u16, battery_tolerance: u8) -> Self {
        Self {
            index,
            buttons: [Button::new(); ButtonId::COUNT],
            triggers: [Axis::new(axis_tolerance); TriggerId::COUNT],
            joysticks: [Joystick::new(axis_tolerance); JoystickId::COUNT],
            batteries: [Battery::new(battery_tolerance); BatteryId::COUNT],
            sensors: [Sensor::new(axis_tolerance); SensorId::COUNT],
            rumbles: [Rumble::new(); RumbleId::COUNT],
            player_leds: [PlayerLed::new(); PlayerLedId::COUNT],
            color_leds: [ColorLed::new(); ColorLedId::COUNT],
            status: Status::new(index),
            pending: false,
        }
    }

    #[inline]
    #[must_use]
    pub const fn index(&self) -> u8 {
        self.index
    }

    /// Status record reflecting every accepted input change.
    #[inline]
    #[must_use]
    pub const fn status(&self) -> &Status {
        &self.status
    }

    /// Whether the Status changed since it was last taken for sending.
    #[inline]
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending
    }

    /// Clear the pending flag, returning its previous value.
    pub fn take_pending(&mut self) -> bool {
        core::mem::replace(&mut self.pending, false)
    }

    // ----- accessors -----

    #[must_use]
    pub fn button(&self, id: ButtonId) -> &Button {
        &self.buttons[id.index()]
    }

    #[must_use]
    pub fn trigger(&self, id: TriggerId) -> &Axis {
        &self.triggers[id.index()]
    }

    #[must_use]
    pub fn joystick(&self, id: JoystickId) -> &Joystick {
        &self.joysticks[id.index()]
    }

    #[must_use]
    pub fn battery(&self, id: BatteryId) -> &Battery {
        &self.batteries[id.index()]
    }

    #[must_use]
    pub fn sensor(&self, id: SensorId) -> &Sensor {
        &self.sensors[id.index()]
    }

    #[must_use]
    pub fn rumble(&self, id: RumbleId) -> &Rumble {
        &self.rumbles[id.index()]
    }

    #[must_use]
    pub fn player_led(&self, id: PlayerLedId) -> &PlayerLed {
        &self.player_leds[id.index()]
    }

    #[must_use]
    pub fn color_led(&self, id: ColorLedId) -> &ColorLed {
        &self.color_leds[id.index()]
    }

    // ----- inputs -----

    /// Returns `true` if the button state changed.
    pub fn set_button<H: InputHandler + ?Sized>(
        &mut self,
        id: ButtonId,
        pressed: bool,
        handler: &mut H,
    ) -> bool {
        if !self.buttons[id.index()].set_pressed(pressed) {
            return false;
        }

        let bit = id.bit();
        match id.group() {
            ButtonGroup::DPad => set_bit8(&mut self.status.dpad_mask, bit, pressed),
            ButtonGroup::Main => set_bit16(&mut self.status.main_buttons_mask, bit, pressed),
            ButtonGroup::Misc => set_bit8(&mut self.status.misc_buttons_mask, bit, pressed),
        }
        self.pending = true;

        if pressed {
            handler.on_button_press(self.index, id);
        } else {
            handler.on_button_release(self.index, id);
        }
        true
    }

    /// Returns `true` if the value moved by at least the tolerance.
    pub fn set_trigger<H: InputHandler + ?Sized>(
        &mut self,
        id: TriggerId,
        value: i16,
        handler: &mut H,
    ) -> bool {
        let trigger = &mut self.triggers[id.index()];
        if !trigger.set_value(value) {
            return false;
        }
        let value = trigger.value();
        match id {
            TriggerId::Trigger1 => self.status.trigger1 = value,
            TriggerId::Trigger2 => self.status.trigger2 = value,
        }
        self.pending = true;
        handler.on_trigger_change(self.index, id, value);
        true
    }

    /// Set both axes. Notifies once if either axis was accepted.
    pub fn set_joystick<H: InputHandler + ?Sized>(
        &mut self,
        id: JoystickId,
        x: i16,
        y: i16,
        handler: &mut H,
    ) -> bool {
        let changed = self.joysticks[id.index()].set(x, y);
        self.joystick_changed(id, changed, handler)
    }

    /// Set the X axis only, keeping Y.
    pub fn set_joystick_x<H: InputHandler + ?Sized>(
        &mut self,
        id: JoystickId,
        x: i16,
        handler: &mut H,
    ) -> bool {
        let changed = self.joysticks[id.index()].x.set_value(x);
        self.joystick_changed(id, changed, handler)
    }

    /// Set the Y axis only, keeping X.
    pub fn set_joystick_y<H: InputHandler + ?Sized>(
        &mut self,
        id: JoystickId,
        y: i16,
        handler: &mut H,
    ) -> bool {
        let changed = self.joysticks[id.index()].y.set_value(y);
        self.joystick_changed(id, changed, handler)
    }

    fn joystick_changed<H: InputHandler + ?Sized>(
        &mut self,
        id: JoystickId,
        changed: bool,
        handler: &mut H,
    ) -> bool {
        if !changed {
            return false;
        }
        let (x, y) = self.joysticks[id.index()].values();
        match id {
            JoystickId::Joystick1 => {
                self.status.joystick1_x = x;
                self.status.joystick1_y = y;
            }
            JoystickId::Joystick2 => {
                self.status.joystick2_x = x;
                self.status.joystick2_y = y;
            }
        }
        self.pending = true;
        handler.on_joystick_change(self.index, id, x, y);
        true
    }

    /// Returns `true` if the level moved by at least the tolerance.
    pub fn set_battery<H: InputHandler + ?Sized>(
        &mut self,
        id: BatteryId,
        level: u8,
        handler: &mut H,
    ) -> bool {
        let battery = &mut self.batteries[id.index()];
        if !battery.set_level(level) {
            return false;
        }
        let level = battery.level();
        match id {
            BatteryId::Battery1 => self.status.battery1 = level,
        }
        self.pending = true;
        handler.on_battery_change(self.index, id, level);
        true
    }

    /// Set all three axes. Notifies once if any axis was accepted.
    pub fn set_sensor<H: InputHandler + ?Sized>(
        &mut self,
        id: SensorId,
        x: i16,
        y: i16,
        z: i16,
        handler: &mut H,
    ) -> bool {
        let changed = self.sensors[id.index()].set(x, y, z);
        self.sensor_changed(id, changed, handler)
    }

    /// Set the X axis only.
    pub fn set_sensor_x<H: InputHandler + ?Sized>(
        &mut self,
        id: SensorId,
        x: i16,
        handler: &mut H,
    ) -> bool {
        let changed = self.sensors[id.index()].x.set_value(x);
        self.sensor_changed(id, changed, handler)
    }

    /// Set the Y axis only.
    pub fn set_sensor_y<H: InputHandler + ?Sized>(
        &mut self,
        id: SensorId,
        y: i16,
        handler: &mut H,
    ) -> bool {
        let changed = self.sensors[id.index()].y.set_value(y);
        self.sensor_changed(id, changed, handler)
    }

    /// Set the Z axis only.
    pub fn set_sensor_z<H: InputHandler + ?Sized>(
        &mut self,
        id: SensorId,
        z: i16,
        handler: &mut H,
    ) -> bool {
        let changed = self.sensors[id.index()].z.set_value(z);
        self.sensor_changed(id, changed, handler)
    }

    fn sensor_changed<H: InputHandler + ?Sized>(
        &mut self,
        id: SensorId,
        changed: bool,
        handler: &mut H,
    ) -> bool {
        if !changed {
            return false;
        }
        let (x, y, z) = self.sensors[id.index()].values();
        match id {
            SensorId::Sensor1 => {
                self.status.sensor1_x = x;
                self.status.sensor1_y = y;
                self.status.sensor1_z = z;
            }
            SensorId::Sensor2 => {
                self.status.sensor2_x = x;
                self.status.sensor2_y = y;
                self.status.sensor2_z = z;
            }
        }
        self.pending = true;
        handler.on_sensor_change(self.index, id, x, y, z);
        true
    }

    /// Apply a received Status record field by field.
    ///
    /// Order: D-pad, main buttons, joysticks, triggers, misc buttons,
    /// battery, sensors. Each field goes through the normal change rules, so
    /// only real transitions are notified. The record's own index is not
    /// checked; callers route it to the right slot. Returns `true` if
    /// anything changed.
    pub fn apply_status<H: InputHandler + ?Sized>(
        &mut self,
        status: &Status,
        handler: &mut H,
    ) -> bool {
        let mut changed = false;

        changed |= self.apply_buttons(ButtonGroup::DPad, u16::from(status.dpad_mask), handler);
        changed |= self.apply_buttons(ButtonGroup::Main, status.main_buttons_mask, handler);
        changed |= self.set_joystick(
            JoystickId::Joystick1,
            status.joystick1_x,
            status.joystick1_y,
            handler,
        );
        changed |= self.set_joystick(
            JoystickId::Joystick2,
            status.joystick2_x,
            status.joystick2_y,
            handler,
        );
        changed |= self.set_trigger(TriggerId::Trigger1, status.trigger1, handler);
        changed |= self.set_trigger(TriggerId::Trigger2, status.trigger2, handler);
        let misc = u16::from(status.misc_buttons_mask);
        changed |= self.apply_buttons(ButtonGroup::Misc, misc, handler);
        changed |= self.set_battery(BatteryId::Battery1, status.battery1, handler);
        changed |= self.set_sensor(
            SensorId::Sensor1,
            status.sensor1_x,
            status.sensor1_y,
            status.sensor1_z,
            handler,
        );
        changed |= self.set_sensor(
            SensorId::Sensor2,
            status.sensor2_x,
            status.sensor2_y,
            status.sensor2_z,
            handler,
        );

        changed
    }

    fn apply_buttons<H: InputHandler + ?Sized>(
        &mut self,
        group: ButtonGroup,
        mask: u16,
        handler: &mut H,
    ) -> bool {
        let mut changed = false;
        for &id in ButtonId::ALL.iter().filter(|id| id.group() == group) {
            changed |= self.set_button(id, mask & (1 << id.bit()) != 0, handler);
        }
        changed
    }

    // ----- tolerances -----
    //
    // Tolerances below 1 are raised to 1. A new value is accepted only when it
    // differs from the current one by at least the tolerance.

    /// Set the tolerance of one trigger.
    pub fn set_trigger_tolerance(&mut self, id: TriggerId, tolerance: u16) {
        self.triggers[id.index()].set_tolerance(tolerance);
    }

    /// Set both axis tolerances of a joystick.
    pub fn set_joystick_tolerance(&mut self, id: JoystickId, x: u16, y: u16) {
        self.set_joystick_tolerance_x(id, x);
        self.set_joystick_tolerance_y(id, y);
    }

    /// Set the X axis tolerance of a joystick.
    pub fn set_joystick_tolerance_x(&mut self, id: JoystickId, tolerance: u16) {
        self.joysticks[id.index()].x.set_tolerance(tolerance);
    }

    /// Set the Y axis tolerance of a joystick.
    pub fn set_joystick_tolerance_y(&mut self, id: JoystickId, tolerance: u16) {
        self.joysticks[id.index()].y.set_tolerance(tolerance);
    }

    /// Set the tolerance of one battery.
    pub fn set_battery_tolerance(&mut self, id: BatteryId, tolerance: u8) {
        self.batteries[id.index()].set_tolerance(tolerance);
    }

    /// Set all three axis tolerances of a sensor.
    pub fn set_sensor_tolerance(&mut self, id: SensorId, x: u16, y: u16, z: u16) {
        self.set_sensor_tolerance_x(id, x);
        self.set_sensor_tolerance_y(id, y);
        self.set_sensor_tolerance_z(id, z);
    }

    /// Set the X axis tolerance of a sensor.
    pub fn set_sensor_tolerance_x(&mut self, id: SensorId, tolerance: u16) {
        self.sensors[id.index()].x.set_tolerance(tolerance);
    }

    /// Set the Y axis tolerance of a sensor.
    pub fn set_sensor_tolerance_y(&mut self, id: SensorId, tolerance: u16) {
        self.sensors[id.index()].y.set_tolerance(tolerance);
    }

    /// Set the Z axis tolerance of a sensor.
    pub fn set_sensor_tolerance_z(&mut self, id: SensorId, tolerance: u16) {
        self.sensors[id.index()].z.set_tolerance(tolerance);
    }

    // ----- outputs -----

    /// Always notifies, even if force and duration are unchanged.
    pub fn start_rumble<H: OutputHandler + ?Sized>(
        &mut self,
        id: RumbleId,
        force: u8,
        duration: u8,
        handler: &mut H,
    ) {
        self.rumbles[id.index()].set(force, duration);
        handler.on_rumble(self.index, id, force, duration);
    }

    /// Always notifies with zero force and duration.
    pub fn stop_rumble<H: OutputHandler + ?Sized>(&mut self, id: RumbleId, handler: &mut H) {
        self.rumbles[id.index()].stop();
        handler.on_rumble(self.index, id, 0, 0);
    }

    /// Notifies and returns `true` only if the LED changed.
    pub fn set_player_led<H: OutputHandler + ?Sized>(
        &mut self,
        id: PlayerLedId,
        illuminated: bool,
        handler: &mut H,
    ) -> bool {
        if !self.player_leds[id.index()].set(illuminated) {
            return false;
        }
        handler.on_player_led_change(self.index, id, illuminated);
        true
    }

    /// Always notifies with the new state.
    pub fn toggle_player_led<H: OutputHandler + ?Sized>(
        &mut self,
        id: PlayerLedId,
        handler: &mut H,
    ) {
        let led = &mut self.player_leds[id.index()];
        led.toggle();
        let illuminated = led.is_illuminated();
        handler.on_player_led_change(self.index, id, illuminated);
    }

    /// Switch the LED on or off, keeping its color. Notifies only on change.
    pub fn set_color_led<H: OutputHandler + ?Sized>(
        &mut self,
        id: ColorLedId,
        illuminated: bool,
        handler: &mut H,
    ) -> bool {
        let led = &mut self.color_leds[id.index()];
        if !led.set(illuminated) {
            return false;
        }
        let color = led.color();
        handler.on_color_led_change(self.index, id, illuminated, color);
        true
    }

    /// Counts as a change if either illumination or color differs.
    pub fn set_color_led_color<H: OutputHandler + ?Sized>(
        &mut self,
        id: ColorLedId,
        illuminated: bool,
        color: Color,
        handler: &mut H,
    ) -> bool {
        if !self.color_leds[id.index()].set_color(illuminated, color) {
            return false;
        }
        handler.on_color_led_change(self.index, id, illuminated, color);
        true
    }

    /// Always notifies with the new state and the current color.
    pub fn toggle_color_led<H: OutputHandler + ?Sized>(&mut self, id: ColorLedId, handler: &mut H) {
        let led = &mut self.color_leds[id.index()];
        led.toggle();
        let (illuminated, color) = (led.is_illuminated(), led.color());
        handler.on_color_led_change(self.index, id, illuminated, color);
    }

    /// Forward a disconnect request to the handler. No state changes.
    pub fn disconnect<H: OutputHandler + ?Sized>(&mut self, handler: &mut H) {
        handler.on_disconnect(self.index);
    }
}

#[inline]
fn set_bit8(mask: &mut u8, bit: u32, on: bool) {
    if on {
        *mask |= 1 << bit;
    } else {
        *mask &= !(1 << bit);
    }
}

#[inline]
fn set_bit16(mask: &mut u16, bit: u32, on: bool) {
    if on {
        *mask |= 1 << bit;
    } else {
        *mask &= !(1 << bit);
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use std::vec::Vec;

    #[derive(Debug, Clone, PartialEq)]
    enum Event {
        Press(u8, ButtonId),
        Release(u8, ButtonId),
        Trigger(u8, TriggerId, i16),
        Joystick(u8, JoystickId, i16, i16),
        Battery(u8, u8),
        Sensor(u8, SensorId, i16, i16, i16),
        Rumble(u8, u8, u8),
        PlayerLed(u8, PlayerLedId, bool),
        ColorLed(u8, bool, Color),
        Disconnect(u8),
    }

    #[derive(Default)]
    struct Recorder {
        events: Vec<Event>,
    }

    impl InputHandler for Recorder {
        fn on_button_press(&mut self, gamepad: u8, button: ButtonId) {
            self.events.push(Event::Press(gamepad, button));
        }
        fn on_button_release(&mut self, gamepad: u8, button: ButtonId) {
            self.events.push(Event::Release(gamepad, button));
        }
        fn on_trigger_change(&mut self, gamepad: u8, trigger: TriggerId, value: i16) {
            self.events.push(Event::Trigger(gamepad, trigger, value));
        }
        fn on_joystick_change(&mut self, gamepad: u8, joystick: JoystickId, x: i16, y: i16) {
            self.events.push(Event::Joystick(gamepad, joystick, x, y));
        }
        fn on_battery_change(&mut self, gamepad: u8, _battery: BatteryId, level: u8) {
            self.events.push(Event::Battery(gamepad, level));
        }
        fn on_sensor_change(&mut self, gamepad: u8, sensor: SensorId, x: i16, y: i16, z: i16) {
            self.events.push(Event::Sensor(gamepad, sensor, x, y, z));
        }
    }

    impl OutputHandler for Recorder {
        fn on_rumble(&mut self, gamepad: u8, _rumble: RumbleId, force: u8, duration: u8) {
            self.events.push(Event::Rumble(gamepad, force, duration));
        }
        fn on_player_led_change(&mut self, gamepad: u8, led: PlayerLedId, illuminated: bool) {
            self.events.push(Event::PlayerLed(gamepad, led, illuminated));
        }
        fn on_color_led_change(
            &mut self,
            gamepad: u8,
            _led: ColorLedId,
            illuminated: bool,
            color: Color,
        ) {
            self.events.push(Event::ColorLed(gamepad, illuminated, color));
        }
        fn on_disconnect(&mut self, gamepad: u8) {
            self.events.push(Event::Disconnect(gamepad));
        }
    }

    #[test]
    fn test_button_notifies_once_and_mirrors_status() {
        let mut pad = Gamepad::new(1);
        let mut rec = Recorder::default();

        assert!(pad.set_button(ButtonId::DPad1, true, &mut rec));
        assert!(!pad.set_button(ButtonId::DPad1, true, &mut rec));
        assert!(pad.set_button(ButtonId::Main16, true, &mut rec));
        assert!(pad.set_button(ButtonId::Misc2, true, &mut rec));
        assert!(pad.set_button(ButtonId::DPad1, false, &mut rec));

        assert_eq!(pad.status().dpad_mask, 0x00);
        assert_eq!(pad.status().main_buttons_mask, 0x8000);
        assert_eq!(pad.status().misc_buttons_mask, 0x02);
        assert_eq!(
            rec.events,
            [
                Event::Press(1, ButtonId::DPad1),
                Event::Press(1, ButtonId::Main16),
                Event::Press(1, ButtonId::Misc2),
                Event::Release(1, ButtonId::DPad1),
            ]
        );
    }

    #[test]
    fn test_trigger_tolerance_and_pending() {
        let mut pad = Gamepad::new(0);
        let mut rec = Recorder::default();
        pad.set_trigger_tolerance(TriggerId::Trigger1, 50);

        assert!(!pad.set_trigger(TriggerId::Trigger1, 49, &mut rec));
        assert!(!pad.is_pending());

        assert!(pad.set_trigger(TriggerId::Trigger1, 1500, &mut rec));
        assert!(pad.is_pending());
        assert_eq!(pad.status().trigger1, 1500);
        assert_eq!(rec.events, [Event::Trigger(0, TriggerId::Trigger1, 1500)]);

        assert!(pad.take_pending());
        assert!(!pad.is_pending());
    }

    #[test]
    fn test_joystick_single_notification() {
        let mut pad = Gamepad::new(0);
        let mut rec = Recorder::default();

        assert!(pad.set_joystick(JoystickId::Joystick2, 100, -100, &mut rec));
        assert!(pad.set_joystick_y(JoystickId::Joystick2, 7, &mut rec));
        assert!(!pad.set_joystick_x(JoystickId::Joystick2, 100, &mut rec));

        assert_eq!(
            rec.events,
            [
                Event::Joystick(0, JoystickId::Joystick2, 100, -100),
                Event::Joystick(0, JoystickId::Joystick2, 100, 7),
            ]
        );
        assert_eq!(pad.status().joystick2_x, 100);
        assert_eq!(pad.status().joystick2_y, 7);
        assert_eq!(pad.status().joystick1_x, 0);
    }

    #[test]
    fn test_single_axis_tolerances() {
        let mut pad = Gamepad::new(0);
        let mut rec = Recorder::default();

        pad.set_joystick_tolerance_x(JoystickId::Joystick1, 100);
        assert_eq!(pad.joystick(JoystickId::Joystick1).x.tolerance(), 100);
        assert_eq!(pad.joystick(JoystickId::Joystick1).y.tolerance(), 1);
        assert!(!pad.set_joystick_x(JoystickId::Joystick1, 99, &mut rec));
        assert!(pad.set_joystick_y(JoystickId::Joystick1, 1, &mut rec));

        pad.set_joystick_tolerance_y(JoystickId::Joystick1, 0);
        assert_eq!(pad.joystick(JoystickId::Joystick1).y.tolerance(), 1);

        pad.set_sensor_tolerance_y(SensorId::Sensor1, 20);
        pad.set_sensor_tolerance_z(SensorId::Sensor1, 30);
        pad.set_sensor_tolerance_x(SensorId::Sensor1, 10);
        let sensor = pad.sensor(SensorId::Sensor1);
        assert_eq!(
            (sensor.x.tolerance(), sensor.y.tolerance(), sensor.z.tolerance()),
            (10, 20, 30)
        );
        assert_eq!(pad.sensor(SensorId::Sensor2).y.tolerance(), 1);

        assert!(!pad.set_sensor(SensorId::Sensor1, 9, 19, 29, &mut rec));
        assert!(pad.set_sensor_z(SensorId::Sensor1, -30, &mut rec));
        assert_eq!(
            rec.events,
            [
                Event::Joystick(0, JoystickId::Joystick1, 0, 1),
                Event::Sensor(0, SensorId::Sensor1, 0, 0, -30),
            ]
        );
    }

    #[test]
    fn test_sensor_and_battery_mirror() {
        let mut pad = Gamepad::with_tolerances(2, 1, 1);
        let mut rec = Recorder::default();

        assert!(pad.set_sensor(SensorId::Sensor2, 1, 2, 3, &mut rec));
        assert!(pad.set_sensor_z(SensorId::Sensor2, -3, &mut rec));
        assert!(pad.set_battery(BatteryId::Battery1, 80, &mut rec));

        let status = pad.status();
        assert_eq!((status.sensor2_x, status.sensor2_y, status.sensor2_z), (1, 2, -3));
        assert_eq!(status.battery1, 80);
        assert_eq!(status.gamepad_index, 2);
        assert_eq!(rec.events.len(), 3);
    }

    #[test]
    fn test_apply_status_order_and_idempotence() {
        let mut pad = Gamepad::new(0);
        let mut rec = Recorder::default();

        let status = Status {
            dpad_mask: 0x01,
            main_buttons_mask: 0x0002,
            joystick1_x: 10,
            trigger1: 1500,
            misc_buttons_mask: 0x01,
            battery1: 80,
            sensor1_y: 5,
            ..Status::new(0)
        };

        assert!(pad.apply_status(&status, &mut rec));
        assert_eq!(
            rec.events,
            [
                Event::Press(0, ButtonId::DPad1),
                Event::Press(0, ButtonId::Main2),
                Event::Joystick(0, JoystickId::Joystick1, 10, 0),
                Event::Trigger(0, TriggerId::Trigger1, 1500),
                Event::Press(0, ButtonId::Misc1),
                Event::Battery(0, 80),
                Event::Sensor(0, SensorId::Sensor1, 0, 5, 0),
            ]
        );
        assert_eq!(pad.status(), &status);

        rec.events.clear();
        assert!(!pad.apply_status(&status, &mut rec));
        assert!(rec.events.is_empty());
    }

    #[test]
    fn test_outputs_notify_rules() {
        let mut pad = Gamepad::new(3);
        let mut rec = Recorder::default();

        pad.start_rumble(RumbleId::Rumble1, 128, 10, &mut rec);
        pad.start_rumble(RumbleId::Rumble1, 128, 10, &mut rec);
        pad.stop_rumble(RumbleId::Rumble1, &mut rec);

        assert!(pad.set_player_led(PlayerLedId::PlayerLed2, true, &mut rec));
        assert!(!pad.set_player_led(PlayerLedId::PlayerLed2, true, &mut rec));
        pad.toggle_player_led(PlayerLedId::PlayerLed2, &mut rec);

        let blue = Color::new(0, 0, 255);
        assert!(pad.set_color_led_color(ColorLedId::ColorLed1, true, blue, &mut rec));
        assert!(!pad.set_color_led_color(ColorLedId::ColorLed1, true, blue, &mut rec));
        pad.toggle_color_led(ColorLedId::ColorLed1, &mut rec);
        pad.disconnect(&mut rec);

        assert_eq!(
            rec.events,
            [
                Event::Rumble(3, 128, 10),
                Event::Rumble(3, 128, 10),
                Event::Rumble(3, 0, 0),
                Event::PlayerLed(3, PlayerLedId::PlayerLed2, true),
                Event::PlayerLed(3, PlayerLedId::PlayerLed2, false),
                Event::ColorLed(3, true, blue),
                Event::ColorLed(3, false, blue),
                Event::Disconnect(3),
            ]
        );
        assert_eq!(pad.rumble(RumbleId::Rumble1).force(), 0);
        assert!(!pad.is_pending());
    }
}

//! Gamepad role: receives Commands, sends Status records.

use padlink_proto::{Command, Target};

use crate::config::LinkConfig;
use crate::diagnostics::{report, Diagnostic, DiagnosticSink};
use crate::dispatch::dispatch;
use crate::gamepad::Gamepad;
use crate::handler::OutputHandler;
use crate::ids::{BatteryId, ButtonId, JoystickId, SensorId, TriggerId};
use crate::link::{LinkCore, LinkError};
use crate::transport::Transport;

/// Gamepad end of the link.
///
/// Owns the authoritative input state of every local gamepad. Input setters
/// mark a gamepad pending; [`poll`](Self::poll) applies incoming commands to
/// the outputs through `H` and then sends one Status per pending gamepad.
pub struct GamepadLink<T, H = (), D = ()> {
    core: LinkCore<T, D>,
    handler: H,
}

impl<T: Transport> GamepadLink<T> {
    /// Create a link with no output handler and no diagnostics sink.
    pub fn new(transport: T, config: LinkConfig) -> Self {
        Self::with_handlers(transport, (), (), config)
    }
}

impl<T: Transport, H: OutputHandler, D: DiagnosticSink> GamepadLink<T, H, D> {
    pub fn with_handlers(transport: T, handler: H, sink: D, config: LinkConfig) -> Self {
        Self {
            core: LinkCore::new(transport, sink, &config),
            handler,
        }
    }

    /// Drain the transport, dispatch every valid command, then flush every
    /// pending Status.
    ///
    /// A Status that fails to send is reported as [`Diagnostic::Send`]; its
    /// gamepad is no longer pending and goes out again on the next change or
    /// an explicit [`send_status`](Self::send_status).
    pub fn poll(&mut self) {
        let handler = &mut self.handler;
        self.core.poll_frames(|payload, gamepads, sink| {
            let command = match Command::deserialize(payload) {
                Ok(command) => command,
                Err(err) => return report(sink, Diagnostic::Payload(err)),
            };
            if let Err(err) = dispatch(gamepads, &command, handler) {
                report(sink, Diagnostic::Dispatch(err));
            }
        });

        for slot in 0..self.core.gamepads().len() {
            let pad = &mut self.core.gamepads_mut()[slot];
            if !pad.take_pending() {
                continue;
            }
            let status = *pad.status();
            if let Err(err) = self.core.send(&status) {
                self.core.report(Diagnostic::Send(err));
            }
        }
    }

    /// Send the current Status of `index` now, pending or not.
    ///
    /// # Errors
    ///
    /// [`LinkError::InvalidGamepad`] for an unknown index, otherwise any
    /// send failure.
    pub fn send_status(&mut self, index: u8) -> Result<(), LinkError> {
        let pad = self
            .core
            .gamepad_mut(index)
            .ok_or(LinkError::InvalidGamepad(index))?;
        pad.take_pending();
        let status = *pad.status();
        self.core.send(&status)
    }

    // ----- inputs -----
    //
    // Each setter returns `true` if the value changed. Unknown gamepad
    // indices are ignored.

    fn with_gamepad(&mut self, index: u8, f: impl FnOnce(&mut Gamepad) -> bool) -> bool {
        self.core.gamepad_mut(index).is_some_and(f)
    }

    pub fn set_button(&mut self, index: u8, button: ButtonId, pressed: bool) -> bool {
        self.with_gamepad(index, |pad| pad.set_button(button, pressed, &mut ()))
    }

    pub fn set_trigger(&mut self, index: u8, trigger: TriggerId, value: i16) -> bool {
        self.with_gamepad(index, |pad| pad.set_trigger(trigger, value, &mut ()))
    }

    pub fn set_joystick(&mut self, index: u8, joystick: JoystickId, x: i16, y: i16) -> bool {
        self.with_gamepad(index, |pad| pad.set_joystick(joystick, x, y, &mut ()))
    }

    pub fn set_joystick_x(&mut self, index: u8, joystick: JoystickId, x: i16) -> bool {
        self.with_gamepad(index, |pad| pad.set_joystick_x(joystick, x, &mut ()))
    }

    pub fn set_joystick_y(&mut self, index: u8, joystick: JoystickId, y: i16) -> bool {
        self.with_gamepad(index, |pad| pad.set_joystick_y(joystick, y, &mut ()))
    }

    pub fn set_battery(&mut self, index: u8, battery: BatteryId, level: u8) -> bool {
        self.with_gamepad(index, |pad| pad.set_battery(battery, level, &mut ()))
    }

    pub fn set_sensor(&mut self, index: u8, sensor: SensorId, x: i16, y: i16, z: i16) -> bool {
        self.with_gamepad(index, |pad| pad.set_sensor(sensor, x, y, z, &mut ()))
    }

    pub fn set_sensor_x(&mut self, index: u8, sensor: SensorId, x: i16) -> bool {
        self.with_gamepad(index, |pad| pad.set_sensor_x(sensor, x, &mut ()))
    }

    pub fn set_sensor_y(&mut self, index: u8, sensor: SensorId, y: i16) -> bool {
        self.with_gamepad(index, |pad| pad.set_sensor_y(sensor, y, &mut ()))
    }

    pub fn set_sensor_z(&mut self, index: u8, sensor: SensorId, z: i16) -> bool {
        self.with_gamepad(index, |pad| pad.set_sensor_z(sensor, z, &mut ()))
    }

    // ----- tolerances -----
    //
    // A change smaller than the tolerance is ignored and does not mark the
    // gamepad pending.

    pub fn set_trigger_tolerance(
        &mut self,
        target: Target,
        trigger: TriggerId,
        tolerance: u16,
    ) -> Result<(), LinkError> {
        self.core
            .for_each_target(target, |pad| pad.set_trigger_tolerance(trigger, tolerance))
    }

    pub fn set_joystick_tolerance(
        &mut self,
        target: Target,
        joystick: JoystickId,
        x: u16,
        y: u16,
    ) -> Result<(), LinkError> {
        self.core
            .for_each_target(target, |pad| pad.set_joystick_tolerance(joystick, x, y))
    }

    pub fn set_joystick_tolerance_x(
        &mut self,
        target: Target,
        joystick: JoystickId,
        tolerance: u16,
    ) -> Result<(), LinkError> {
        self.core
            .for_each_target(target, |pad| pad.set_joystick_tolerance_x(joystick, tolerance))
    }

    pub fn set_joystick_tolerance_y(
        &mut self,
        target: Target,
        joystick: JoystickId,
        tolerance: u16,
    ) -> Result<(), LinkError> {
        self.core
            .for_each_target(target, |pad| pad.set_joystick_tolerance_y(joystick, tolerance))
    }

    pub fn set_sensor_tolerance(
        &mut self,
        target: Target,
        sensor: SensorId,
        x: u16,
        y: u16,
        z: u16,
    ) -> Result<(), LinkError> {
        self.core
            .for_each_target(target, |pad| pad.set_sensor_tolerance(sensor, x, y, z))
    }

    pub fn set_sensor_tolerance_x(
        &mut self,
        target: Target,
        sensor: SensorId,
        tolerance: u16,
    ) -> Result<(), LinkError> {
        self.core
            .for_each_target(target, |pad| pad.set_sensor_tolerance_x(sensor, tolerance))
    }

    pub fn set_sensor_tolerance_y(
        &mut self,
        target: Target,
        sensor: SensorId,
        tolerance: u16,
    ) -> Result<(), LinkError> {
        self.core
            .for_each_target(target, |pad| pad.set_sensor_tolerance_y(sensor, tolerance))
    }

    pub fn set_sensor_tolerance_z(
        &mut self,
        target: Target,
        sensor: SensorId,
        tolerance: u16,
    ) -> Result<(), LinkError> {
        self.core
            .for_each_target(target, |pad| pad.set_sensor_tolerance_z(sensor, tolerance))
    }

    pub fn set_battery_tolerance(
        &mut self,
        target: Target,
        battery: BatteryId,
        tolerance: u8,
    ) -> Result<(), LinkError> {
        self.core
            .for_each_target(target, |pad| pad.set_battery_tolerance(battery, tolerance))
    }

    // ----- accessors -----

    /// Gamepad `index`, if configured.
    pub fn gamepad(&self, index: u8) -> Option<&Gamepad> {
        self.core.gamepad(index)
    }

    pub fn gamepads(&self) -> &[Gamepad] {
        self.core.gamepads()
    }

    /// The output handler.
    pub fn handler(&self) -> &H {
        &self.handler
    }

    pub fn handler_mut(&mut self) -> &mut H {
        &mut self.handler
    }

    pub fn sink(&self) -> &D {
        self.core.sink()
    }

    pub fn transport_mut(&mut self) -> &mut T {
        self.core.transport_mut()
    }

    pub fn into_parts(self) -> (T, H, D) {
        let (transport, sink) = self.core.into_parts();
        (transport, self.handler, sink)
    }
}

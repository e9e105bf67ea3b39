//! Application role: receives Status records, sends Commands.

use padlink_proto::{Color, Command, OutputSelector, Status, Target};

use crate::config::LinkConfig;
use crate::diagnostics::{report, Diagnostic, DiagnosticSink};
use crate::dispatch::{dispatch, validate};
use crate::gamepad::Gamepad;
use crate::handler::InputHandler;
use crate::ids::{BatteryId, JoystickId, SensorId, TriggerId};
use crate::link::{LinkCore, LinkError};
use crate::transport::Transport;

/// Application end of the link.
///
/// Keeps a mirror of every remote gamepad. Incoming Status records update
/// the mirror's inputs and notify `H`. Outgoing commands are validated
/// against the mirror, written to the transport, and only then applied to the
/// mirror's outputs.
///
/// # Example
///
/// ```
/// use padlink_core::{ApplicationLink, LinkConfig, Target, Transport, TransportError};
///
/// struct Null;
/// impl Transport for Null {
///     fn bytes_available(&mut self) -> usize { 0 }
///     fn read_byte(&mut self) -> Option<u8> { None }
///     fn write_bytes(&mut self, _: &[u8]) -> Result<(), TransportError> { Ok(()) }
/// }
///
/// let mut link = ApplicationLink::new(Null, LinkConfig::new(2).unwrap());
/// link.poll();
/// link.start_rumble(Target::All, padlink_core::OutputSelector::All, 0x80, 10).unwrap();
/// assert!(link.stop_rumble(Target::Gamepad(5), padlink_core::OutputSelector::All).is_err());
/// ```
pub struct ApplicationLink<T, H = (), D = ()> {
    core: LinkCore<T, D>,
    handler: H,
}

impl<T: Transport> ApplicationLink<T> {
    /// Create a link with no input handler and no diagnostics sink.
    pub fn new(transport: T, config: LinkConfig) -> Self {
        Self::with_handlers(transport, (), (), config)
    }
}

impl<T: Transport, H: InputHandler, D: DiagnosticSink> ApplicationLink<T, H, D> {
    /// Create a link with an input handler and a diagnostics sink.
    pub fn with_handlers(transport: T, handler: H, sink: D, config: LinkConfig) -> Self {
        Self {
            core: LinkCore::new(transport, sink, &config),
            handler,
        }
    }

    /// Process every byte currently available.
    ///
    /// Each valid Status record is applied to the gamepad it names, firing
    /// input notifications for the fields that changed. Bad frames, bad
    /// records and unknown gamepad indices are reported and dropped.
    pub fn poll(&mut self) {
        let handler = &mut self.handler;
        self.core.poll_frames(|payload, gamepads, sink| {
            let status = match Status::deserialize(payload) {
                Ok(status) => status,
                Err(err) => return report(sink, Diagnostic::Payload(err)),
            };
            match gamepads.get_mut(usize::from(status.gamepad_index)) {
                Some(pad) => {
                    pad.apply_status(&status, handler);
                }
                None => report(sink, Diagnostic::InvalidStatusIndex(status.gamepad_index)),
            }
        });
    }

    /// Validate `command`, send it, then apply it to the local mirror.
    ///
    /// The mirror only changes once the frame has been written, so it never
    /// holds output state the gamepad was not told about.
    ///
    /// # Errors
    ///
    /// - [`LinkError::Dispatch`] if the addressing is invalid; nothing is sent
    /// - [`LinkError::Serialize`], [`LinkError::Frame`] or
    ///   [`LinkError::Transport`] if the frame could not be written; the
    ///   mirror is left untouched
    pub fn send_command(&mut self, command: &Command) -> Result<(), LinkError> {
        validate(command, self.core.gamepads().len())?;
        self.core.send(command)?;
        dispatch(self.core.gamepads_mut(), command, &mut ())?;
        Ok(())
    }

    /// Ask the targeted gamepads to disconnect.
    pub fn disconnect(&mut self, target: Target) -> Result<(), LinkError> {
        self.send_command(&Command::disconnect(target))
    }

    /// Start rumble at `force` for `duration` (device-defined units).
    pub fn start_rumble(
        &mut self,
        target: Target,
        rumble: impl Into<OutputSelector>,
        force: u8,
        duration: u8,
    ) -> Result<(), LinkError> {
        let rumble = rumble.into();
        self.send_command(&Command::rumble_start(target, rumble, force, duration))
    }

    /// Stop rumble.
    pub fn stop_rumble(
        &mut self,
        target: Target,
        rumble: impl Into<OutputSelector>,
    ) -> Result<(), LinkError> {
        self.send_command(&Command::rumble_stop(target, rumble.into()))
    }

    /// Switch player LEDs on or off.
    pub fn set_player_led(
        &mut self,
        target: Target,
        led: impl Into<OutputSelector>,
        illuminated: bool,
    ) -> Result<(), LinkError> {
        self.send_command(&Command::player_led_set(target, led.into(), illuminated))
    }

    /// Invert player LEDs.
    pub fn toggle_player_led(
        &mut self,
        target: Target,
        led: impl Into<OutputSelector>,
    ) -> Result<(), LinkError> {
        self.send_command(&Command::player_led_toggle(target, led.into()))
    }

    /// LED *i* is lit exactly when bit *i* of `mask` is set.
    pub fn set_player_leds_mask(
        &mut self,
        target: Target,
        leds: impl Into<OutputSelector>,
        mask: u8,
    ) -> Result<(), LinkError> {
        self.send_command(&Command::player_leds_set_mask(target, leds.into(), mask))
    }

    /// LED *i* flips when bit *i* of `mask` is set.
    pub fn toggle_player_leds_mask(
        &mut self,
        target: Target,
        leds: impl Into<OutputSelector>,
        mask: u8,
    ) -> Result<(), LinkError> {
        self.send_command(&Command::player_leds_toggle_mask(target, leds.into(), mask))
    }

    /// Switch color LEDs on or off, keeping their color.
    pub fn set_color_led(
        &mut self,
        target: Target,
        led: impl Into<OutputSelector>,
        illuminated: bool,
    ) -> Result<(), LinkError> {
        self.send_command(&Command::color_led_set(target, led.into(), illuminated))
    }

    /// Set color LEDs' illumination and color together.
    pub fn set_color_led_color(
        &mut self,
        target: Target,
        led: impl Into<OutputSelector>,
        illuminated: bool,
        color: Color,
    ) -> Result<(), LinkError> {
        self.send_command(&Command::color_led_set_color(
            target,
            led.into(),
            illuminated,
            color,
        ))
    }

    /// Invert color LEDs' illumination.
    pub fn toggle_color_led(
        &mut self,
        target: Target,
        led: impl Into<OutputSelector>,
    ) -> Result<(), LinkError> {
        self.send_command(&Command::color_led_toggle(target, led.into()))
    }

    // ----- tolerances -----
    //
    // These only affect how incoming Status records are filtered on this
    // side; nothing is sent.

    /// Set the trigger tolerance on every targeted mirror.
    pub fn set_trigger_tolerance(
        &mut self,
        target: Target,
        trigger: TriggerId,
        tolerance: u16,
    ) -> Result<(), LinkError> {
        self.core
            .for_each_target(target, |pad| pad.set_trigger_tolerance(trigger, tolerance))
    }

    /// Set both joystick axis tolerances on every targeted mirror.
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

    /// Set all three sensor axis tolerances on every targeted mirror.
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

    /// Set the battery tolerance on every targeted mirror.
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

    /// Mirror of gamepad `index`, if configured.
    pub fn gamepad(&self, index: u8) -> Option<&Gamepad> {
        self.core.gamepad(index)
    }

    /// Mirrors of every configured gamepad, in index order.
    pub fn gamepads(&self) -> &[Gamepad] {
        self.core.gamepads()
    }

    /// The input handler.
    pub fn handler(&self) -> &H {
        &self.handler
    }

    pub fn handler_mut(&mut self) -> &mut H {
        &mut self.handler
    }

    pub fn sink(&self) -> &D {
        self.core.sink()
    }

    /// Direct access to the underlying transport.
    pub fn transport_mut(&mut self) -> &mut T {
        self.core.transport_mut()
    }

    /// Decompose the link into transport, handler and sink.
    pub fn into_parts(self) -> (T, H, D) {
        let (transport, sink) = self.core.into_parts();
        (transport, self.handler, sink)
    }
}

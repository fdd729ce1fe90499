//! Keyboard lighting controller.
//!
//! A [`Controller`] owns the only open handle to the keyboard's raw HID
//! interface. Every command takes `&mut self`, so commands on one controller
//! are serialized: nothing else can reach the handle while
//! [`Controller::send_notification`] sleeps before reverting. Callers that
//! share a controller between threads must wrap it in a `Mutex`.
//!
//! Convenience commands that take caller-supplied names or integer colors
//! never fail on bad input. They substitute a safe default (white, or the
//! `full` mode), log a warning and return the [`InputWarning`]s so the caller
//! can inspect them. Transport failures always propagate.

use crate::color::{rgb_or_white, Rgb};
use crate::config::ControllerConfig;
use crate::device;
use crate::error::{Error, Result};
use crate::lighting::{InputWarning, LightingState, NotificationMode};
use crate::protocol::{self, Report, STATE_RESPONSE_LEN};
use crate::transport::{read_logged, write_logged, HidBackend, HidTransport};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Lighting controller bound to one open device.
pub struct Controller<T: HidTransport> {
    device: Option<T>,
    config: ControllerConfig,
}

impl<T: HidTransport> Controller<T> {
    /// Enumerate devices, open the first interface matching the configured
    /// selector and wrap it.
    pub fn connect<B>(backend: &B, config: ControllerConfig) -> Result<Self>
    where
        B: HidBackend<Device = T>,
    {
        let desc = device::discover(backend, &config.selector)?;
        let transport = backend.open(&desc)?;
        info!(path = %desc.path, "Connected to keyboard");
        Ok(Self::from_transport(transport, config))
    }

    /// Wrap an already open transport.
    pub fn from_transport(transport: T, config: ControllerConfig) -> Self {
        Self {
            device: Some(transport),
            config,
        }
    }

    pub fn is_open(&self) -> bool {
        self.device.is_some()
    }

    fn transport(&self) -> Result<&T> {
        self.device.as_ref().ok_or(Error::HandleClosed)
    }

    fn write_report(&mut self, report: &Report) -> Result<()> {
        write_logged(self.transport()?, report)
    }

    /// Pad a payload to a full report and write it.
    pub fn send(&mut self, payload: &[u8]) -> Result<()> {
        self.transport()?;
        let report = protocol::pad_report(payload)?;
        self.write_report(&report)
    }

    /// Query the current LED state.
    ///
    /// Fails with [`Error::Timeout`] if the keyboard does not answer within
    /// the configured read timeout, and with [`Error::UnknownState`] if it
    /// answers with an unrecognized byte.
    pub fn get_state(&mut self) -> Result<LightingState> {
        self.write_report(&protocol::encode_query_state())?;
        let transport = self.transport()?;
        let data = read_logged(transport, STATE_RESPONSE_LEN, self.config.read_timeout())?;
        let state = protocol::decode_state(&data)?;
        debug!(%state, "Read LED state");
        Ok(state)
    }

    /// Set the global LED state.
    pub fn set_state(&mut self, state: LightingState) -> Result<()> {
        debug!(%state, "Setting LED state");
        self.write_report(&protocol::encode_set_state(state))
    }

    /// Advance to the next built-in animation.
    pub fn next_animation(&mut self) -> Result<()> {
        debug!("Advancing animation");
        self.write_report(&protocol::encode_next_animation())
    }

    /// Set the whole keyboard to a static color.
    pub fn set_color(&mut self, color: Rgb) -> Result<()> {
        debug!(%color, "Setting keyboard color");
        self.write_report(&protocol::encode_color(NotificationMode::Full, color))
    }

    /// Set the whole keyboard to a palette color, falling back to white.
    pub fn set_color_name(&mut self, name: &str) -> Result<Vec<InputWarning>> {
        let (color, warning) = self.config.palette.resolve(name);
        let warnings = collect_warnings([warning]);
        self.set_color(color)?;
        Ok(warnings)
    }

    /// Set the whole keyboard to an integer RGB color, falling back to white
    /// when a component is outside 0..=255.
    pub fn set_color_rgb(&mut self, r: i64, g: i64, b: i64) -> Result<Vec<InputWarning>> {
        let (color, warning) = rgb_or_white(r, g, b);
        let warnings = collect_warnings([warning]);
        self.set_color(color)?;
        Ok(warnings)
    }

    /// Flash a color on a zone, then restore the state read beforehand.
    ///
    /// Blocks for `duration`. The handle stays open afterwards.
    pub fn send_notification(
        &mut self,
        mode: NotificationMode,
        color: Rgb,
        duration: Duration,
    ) -> Result<()> {
        let previous = self.get_state()?;
        info!(
            %mode,
            %color,
            %previous,
            ?duration,
            "Sending notification"
        );
        self.write_report(&protocol::encode_color(mode, color))?;
        if !duration.is_zero() {
            std::thread::sleep(duration);
        }
        self.set_state(previous)
    }

    /// [`Controller::send_notification`] with a mode name and a palette color
    /// name. Unknown modes fall back to `full`, unknown colors to white.
    pub fn send_notification_named(
        &mut self,
        mode: &str,
        color: &str,
        duration: Duration,
    ) -> Result<Vec<InputWarning>> {
        let (mode, mode_warning) = NotificationMode::resolve(mode);
        let (color, color_warning) = self.config.palette.resolve(color);
        let warnings = collect_warnings([mode_warning, color_warning]);
        self.send_notification(mode, color, duration)?;
        Ok(warnings)
    }

    /// [`Controller::send_notification`] with a mode name and integer RGB
    /// components. Unknown modes fall back to `full`, out-of-range colors to
    /// white.
    pub fn send_notification_rgb(
        &mut self,
        mode: &str,
        r: i64,
        g: i64,
        b: i64,
        duration: Duration,
    ) -> Result<Vec<InputWarning>> {
        let (mode, mode_warning) = NotificationMode::resolve(mode);
        let (color, color_warning) = rgb_or_white(r, g, b);
        let warnings = collect_warnings([mode_warning, color_warning]);
        self.send_notification(mode, color, duration)?;
        Ok(warnings)
    }

    /// Release the device handle. Closing twice is a no-op.
    pub fn close(&mut self) {
        match self.device.take() {
            Some(device) => {
                drop(device);
                info!("Closed keyboard handle");
            }
            None => debug!("Keyboard handle already closed"),
        }
    }
}

fn collect_warnings<const N: usize>(candidates: [Option<InputWarning>; N]) -> Vec<InputWarning> {
    let warnings: Vec<InputWarning> = candidates.into_iter().flatten().collect();
    for w in &warnings {
        warn!(warning = %w, "Recovered invalid input");
    }
    warnings
}

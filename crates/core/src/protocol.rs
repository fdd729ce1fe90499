//! Raw HID lighting protocol encoding.
//!
//! Every message is a single 64-byte output report laid out as
//! `[command, subcommand, payload...]` and zero-padded on the right:
//!
//! | Command | Subcommand | Payload | Meaning |
//! |---|---|---|---|
//! | 0x01 | 0x01..=0x05 | - | Set LED state (see [`LightingState`]) |
//! | 0x02 | 0x01..=0x03 | R, G, B | Color a zone (see [`NotificationMode`]) |
//! | 0x03 | - | - | Query LED state; the keyboard answers with one byte |
//!
//! The report size matches the firmware's `RAW_EPSIZE`. Boards built with a
//! 32-byte raw endpoint need a different [`REPORT_LEN`].

use crate::color::Rgb;
use crate::error::{Error, Result};
use crate::lighting::{LightingState, NotificationMode};

/// Size of every report written to the keyboard.
pub const REPORT_LEN: usize = 64;

/// Length of the answer to a state query.
pub const STATE_RESPONSE_LEN: usize = 1;

/// Command bytes.
pub mod cmd {
    /// Set the global LED state.
    pub const SET_STATE: u8 = 0x01;
    /// Override a zone with a static color.
    pub const NOTIFICATION: u8 = 0x02;
    /// Query the global LED state.
    pub const GET_STATE: u8 = 0x03;
}

/// One fully padded output report.
pub type Report = [u8; REPORT_LEN];

/// Right-pad a payload with zeros to exactly [`REPORT_LEN`] bytes.
pub fn pad_report(payload: &[u8]) -> Result<Report> {
    if payload.len() > REPORT_LEN {
        return Err(Error::ReportTooLong {
            len: payload.len(),
            max: REPORT_LEN,
        });
    }
    let mut report = [0u8; REPORT_LEN];
    report[..payload.len()].copy_from_slice(payload);
    Ok(report)
}

/// Convert an integer to a single byte, rejecting anything outside 0..=255.
pub fn to_byte(value: i64) -> Result<u8> {
    u8::try_from(value).map_err(|_| Error::OutOfRange {
        field: "byte",
        value,
        min: 0,
        max: u8::MAX as i64,
    })
}

/// Build a report from a command prefix that always fits.
fn fixed_report(prefix: &[u8]) -> Report {
    let mut report = [0u8; REPORT_LEN];
    report[..prefix.len()].copy_from_slice(prefix);
    report
}

/// Encode a state query report.
pub fn encode_query_state() -> Report {
    fixed_report(&[cmd::GET_STATE])
}

/// Encode a set-state report.
pub fn encode_set_state(state: LightingState) -> Report {
    fixed_report(&[cmd::SET_STATE, state.as_byte()])
}

/// Encode a next-animation report.
pub fn encode_next_animation() -> Report {
    encode_set_state(LightingState::NextAnimation)
}

/// Encode a zone color report.
pub fn encode_color(mode: NotificationMode, color: Rgb) -> Report {
    let [r, g, b] = color.to_bytes();
    fixed_report(&[cmd::NOTIFICATION, mode.as_byte(), r, g, b])
}

/// Decode the answer to a state query. Only 1..=4 are valid answers.
pub fn decode_state(data: &[u8]) -> Result<LightingState> {
    let byte = *data
        .first()
        .ok_or_else(|| Error::Hid("empty state response".to_string()))?;
    LightingState::from_query_byte(byte).ok_or(Error::UnknownState(byte))
}

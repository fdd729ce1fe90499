//! Error types for alt-rgb-core.

use thiserror::Error;

/// Core library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// HID transport failure (enumerate, open, write or read).
    #[error("HID error: {0}")]
    Hid(String),

    /// No enumerated HID interface matched the identity selector.
    #[error("device not found: {0}")]
    DeviceNotFound(String),

    /// Operation attempted after the controller released its handle.
    #[error("device handle is closed")]
    HandleClosed,

    /// Operation timed out.
    #[error("timeout: {0}")]
    Timeout(String),

    /// The keyboard answered a state query with a byte outside 1..=5.
    #[error("unknown lighting state byte 0x{0:02X}")]
    UnknownState(u8),

    /// Payload does not fit in a single report.
    #[error("report payload too long: {len} bytes (max {max})")]
    ReportTooLong { len: usize, max: usize },

    /// Value out of range.
    #[error("value out of range: {field} = {value} (allowed {min}..={max})")]
    OutOfRange {
        field: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },

    /// Configuration file could not be read or parsed.
    #[error("config error: {0}")]
    Config(String),
}

/// Convenience Result alias.
pub type Result<T> = std::result::Result<T, Error>;

//! HID transport abstraction for device communication.
//!
//! Provides a trait-based transport layer so that real HID devices and
//! mock devices share the same interface.

use crate::device::DeviceDescriptor;
use crate::error::Result;
use std::time::Duration;
use tracing::trace;

/// Abstraction over raw HID read/write on one open device.
///
/// Dropping the transport closes the underlying handle.
pub trait HidTransport: Send {
    /// Write one complete output report.
    fn write_report(&self, data: &[u8]) -> Result<()>;

    /// Read up to `len` bytes of the next input report, waiting at most
    /// `timeout`. Implementations return [`crate::error::Error::Timeout`]
    /// when nothing arrives in time.
    fn read_report(&self, len: usize, timeout: Duration) -> Result<Vec<u8>>;
}

/// Enumerates HID interfaces and opens them.
pub trait HidBackend {
    type Device: HidTransport;

    /// List every HID interface currently attached.
    fn enumerate(&self) -> Result<Vec<DeviceDescriptor>>;

    /// Open an enumerated interface by path.
    fn open(&self, desc: &DeviceDescriptor) -> Result<Self::Device>;
}

/// Write a report and log it.
pub fn write_logged(transport: &dyn HidTransport, report: &[u8]) -> Result<()> {
    trace!(
        command = format_args!("0x{:02X}", report.first().copied().unwrap_or(0)),
        report_hex = format_args!("{:02X?}", trimmed(report)),
        "HID TX"
    );
    transport.write_report(report)
}

/// Read a response and log it.
pub fn read_logged(transport: &dyn HidTransport, len: usize, timeout: Duration) -> Result<Vec<u8>> {
    let data = transport.read_report(len, timeout)?;
    trace!(len = data.len(), data_hex = format_args!("{:02X?}", data), "HID RX");
    Ok(data)
}

/// Strip trailing zero padding for log output.
fn trimmed(report: &[u8]) -> &[u8] {
    let end = report
        .iter()
        .rposition(|&b| b != 0)
        .map_or(0, |i| i + 1);
    &report[..end]
}

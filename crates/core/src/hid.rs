//! hidapi-backed transport for real hardware.

use crate::device::DeviceDescriptor;
use crate::error::{Error, Result};
use crate::protocol::REPORT_LEN;
use crate::transport::{HidBackend, HidTransport};
use std::ffi::CString;
use std::time::Duration;
use tracing::debug;

/// Enumerates and opens devices through the system hidapi.
pub struct HidapiBackend {
    api: hidapi::HidApi,
}

impl HidapiBackend {
    pub fn new() -> Result<Self> {
        let api = hidapi::HidApi::new().map_err(|e| Error::Hid(format!("hidapi init: {e}")))?;
        Ok(Self { api })
    }
}

impl HidBackend for HidapiBackend {
    type Device = HidapiDevice;

    fn enumerate(&self) -> Result<Vec<DeviceDescriptor>> {
        debug!("Starting HID device enumeration");
        let devices = self
            .api
            .device_list()
            .map(|info| DeviceDescriptor {
                vendor_id: info.vendor_id(),
                product_id: info.product_id(),
                usage_page: info.usage_page(),
                usage: info.usage(),
                path: info.path().to_string_lossy().into_owned(),
                product: info.product_string().map(|s| s.to_string()),
                serial: info.serial_number().map(|s| s.to_string()),
            })
            .collect::<Vec<_>>();
        debug!(count = devices.len(), "HID enumeration complete");
        Ok(devices)
    }

    fn open(&self, desc: &DeviceDescriptor) -> Result<HidapiDevice> {
        let path = CString::new(desc.path.as_str())
            .map_err(|e| Error::Hid(format!("invalid device path {:?}: {e}", desc.path)))?;
        let device = self.api.open_path(&path).map_err(|e| {
            Error::Hid(format!(
                "open HID device (VID=0x{:04X} PID=0x{:04X} path={}): {e}",
                desc.vendor_id, desc.product_id, desc.path
            ))
        })?;
        debug!(path = %desc.path, "Opened HID device");
        Ok(HidapiDevice { device })
    }
}

/// An open hidapi device. Closed on drop.
pub struct HidapiDevice {
    device: hidapi::HidDevice,
}

impl HidTransport for HidapiDevice {
    fn write_report(&self, data: &[u8]) -> Result<()> {
        let written = self
            .device
            .write(data)
            .map_err(|e| Error::Hid(format!("write: {e}")))?;
        if written < data.len() {
            return Err(Error::Hid(format!(
                "short write: {written} of {} bytes",
                data.len()
            )));
        }
        Ok(())
    }

    fn read_report(&self, len: usize, timeout: Duration) -> Result<Vec<u8>> {
        let mut buf = vec![0u8; REPORT_LEN.max(len)];
        let timeout_ms = i32::try_from(timeout.as_millis()).unwrap_or(i32::MAX);
        let n = self
            .device
            .read_timeout(&mut buf, timeout_ms)
            .map_err(|e| Error::Hid(format!("read_timeout: {e}")))?;

        if n == 0 {
            return Err(Error::Timeout(format!(
                "hid_read timed out after {timeout_ms}ms"
            )));
        }

        buf.truncate(n.min(len));
        Ok(buf)
    }
}

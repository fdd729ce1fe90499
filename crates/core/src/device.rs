//! Device model: identity selection and discovery.

use crate::error::{Error, Result};
use crate::transport::HidBackend;
use crate::{ids, ALT_VID};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Identifies the keyboard's raw HID interface among all enumerated devices.
///
/// A keyboard exposes several interfaces under the same VID/PID (keyboard,
/// consumer control, raw HID); the usage page and usage pick the raw one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IdentitySelector {
    pub vendor_id: u16,
    pub product_id: u16,
    pub usage_page: u16,
    pub usage: u16,
}

impl Default for IdentitySelector {
    fn default() -> Self {
        Self {
            vendor_id: ALT_VID,
            product_id: ids::ALT_PID,
            usage_page: ids::RAW_USAGE_PAGE,
            usage: ids::RAW_USAGE,
        }
    }
}

impl IdentitySelector {
    /// Exact match on all four fields.
    pub fn matches(&self, desc: &DeviceDescriptor) -> bool {
        desc.vendor_id == self.vendor_id
            && desc.product_id == self.product_id
            && desc.usage_page == self.usage_page
            && desc.usage == self.usage
    }
}

impl std::fmt::Display for IdentitySelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "VID=0x{:04X} PID=0x{:04X} usage_page=0x{:04X} usage=0x{:02X}",
            self.vendor_id, self.product_id, self.usage_page, self.usage
        )
    }
}

/// One enumerated HID interface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceDescriptor {
    pub vendor_id: u16,
    pub product_id: u16,
    pub usage_page: u16,
    pub usage: u16,
    pub path: String,
    pub product: Option<String>,
    pub serial: Option<String>,
}

/// Pick the first descriptor matching the selector.
pub fn find_device<'a>(
    devices: &'a [DeviceDescriptor],
    selector: &IdentitySelector,
) -> Result<&'a DeviceDescriptor> {
    debug!(count = devices.len(), %selector, "Searching enumerated HID interfaces");
    let found = devices
        .iter()
        .find(|d| selector.matches(d))
        .ok_or_else(|| Error::DeviceNotFound(format!("no HID interface matches {selector}")))?;
    info!(
        vid = format_args!("0x{:04X}", found.vendor_id),
        pid = format_args!("0x{:04X}", found.product_id),
        path = %found.path,
        "Found keyboard raw HID interface"
    );
    Ok(found)
}

/// Enumerate through a backend and return the matching descriptor.
pub fn discover<B: HidBackend>(
    backend: &B,
    selector: &IdentitySelector,
) -> Result<DeviceDescriptor> {
    let devices = backend.enumerate()?;
    debug!(count = devices.len(), "Device enumeration complete");
    find_device(&devices, selector).cloned()
}

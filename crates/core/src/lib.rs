//! alt-rgb-core: raw HID lighting protocol, device discovery, and controller.
//!
//! This crate provides the host-side logic for driving the RGB lighting of a
//! Drop ALT keyboard (or any board running the same raw HID firmware hook)
//! with fixed 64-byte reports.

pub mod color;
pub mod config;
pub mod controller;
pub mod device;
pub mod error;
pub mod hid;
#[cfg(test)]
mod integration_tests;
pub mod lighting;
pub mod protocol;
pub mod transport;

/// Microchip USB Vendor ID, used by the Drop ALT firmware.
pub const ALT_VID: u16 = 0x04D8;

/// Known identifiers of the Drop ALT raw HID interface.
pub mod ids {
    /// Drop ALT product ID.
    pub const ALT_PID: u16 = 0xEED3;
    /// Vendor-defined usage page of the raw HID interface.
    pub const RAW_USAGE_PAGE: u16 = 0xFF31;
    /// Usage of the raw HID interface.
    pub const RAW_USAGE: u16 = 0x62;
}

//! Shared pieces of the `connectbox-*` command-line tools.

pub mod args;

use crate::device::{DeviceRecord, RouterInformation};

/// Lines printed by `connectbox-info`.
pub fn router_information_lines(info: &RouterInformation) -> [String; 4] {
    [
        format!("MAC address: {}", info.mac_address),
        format!("Hardware version: {}", info.hardware_version),
        format!("Software version: {}", info.software_version),
        format!("Serial number: {}", info.serial_number),
    ]
}

/// `mac hostname` line printed by `connectbox-devices`.
pub fn device_line(device: &DeviceRecord) -> String {
    format!(
        "{} {}",
        device.mac_address.as_deref().unwrap_or("-"),
        device.hostname.as_deref().unwrap_or("")
    )
}

//! Device registry: enumeration and index-based opening

use std::ffi::CString;

use hidapi::HidApi;
use tracing::{debug, info};

use crate::error::TransportError;
use crate::hid_portable::HidapiBackend;

/// Measurement Computing vendor ID.
pub const MCC_VENDOR_ID: u16 = 0x09db;

/// PMD-1024LS digital I/O module
pub const PID_PMD_1024LS: u16 = 0x0076;
/// PMD-1208LS low-speed analog/digital DAQ
pub const PID_PMD_1208LS: u16 = 0x007a;
/// USB-1208FS full-speed analog/digital DAQ
pub const PID_USB_1208FS: u16 = 0x0082;
/// USB-1408FS 14-bit variant
pub const PID_USB_1408FS: u16 = 0x00a1;
/// USB-1608FS 16-bit variant
pub const PID_USB_1608FS: u16 = 0x007d;

/// Known MCC DAQ product IDs.
pub const MCC_DAQ_PIDS: &[u16] = &[
    PID_PMD_1024LS,
    PID_PMD_1208LS,
    PID_USB_1208FS,
    PID_USB_1408FS,
    PID_USB_1608FS,
];

/// Check if a VID/PID pair is a known MCC DAQ device.
///
/// Purely informational: the registry lists and opens any HID device, this
/// just lets callers highlight the family the scan-start convention
/// belongs to.
#[inline]
pub fn is_mcc_daq(vid: u16, pid: u16) -> bool {
    vid == MCC_VENDOR_ID && MCC_DAQ_PIDS.contains(&pid)
}

/// Identity of one enumerated HID device.
#[derive(Debug, Clone)]
pub struct DeviceEntry {
    /// Position in the registry, used to open the device
    pub index: usize,
    /// USB vendor ID
    pub vid: u16,
    /// USB product ID
    pub pid: u16,
    /// Platform device path (e.g. `/dev/hidraw3`)
    pub path: String,
    /// Serial number if available
    pub serial: Option<String>,
    /// Product name if available
    pub product: Option<String>,
}

/// Indexed view over the HID devices present at construction time.
///
/// Indexes are stable for the lifetime of the registry; re-enumerate by
/// building a new one after plugging or unplugging hardware.
pub struct DeviceRegistry {
    api: HidApi,
    entries: Vec<DeviceEntry>,
    raw_paths: Vec<CString>,
}

impl DeviceRegistry {
    pub fn new() -> Result<Self, TransportError> {
        let api = HidApi::new().map_err(TransportError::from)?;

        let mut entries = Vec::new();
        let mut raw_paths = Vec::new();
        for (index, device_info) in api.device_list().enumerate() {
            let entry = DeviceEntry {
                index,
                vid: device_info.vendor_id(),
                pid: device_info.product_id(),
                path: device_info.path().to_string_lossy().into_owned(),
                serial: device_info.serial_number().map(str::to_string),
                product: device_info.product_string().map(str::to_string),
            };
            debug!(
                "[{}] {:04x}:{:04x} {} at {}",
                entry.index,
                entry.vid,
                entry.pid,
                entry.product.as_deref().unwrap_or("?"),
                entry.path
            );
            entries.push(entry);
            raw_paths.push(device_info.path().to_owned());
        }

        info!("enumerated {} HID devices", entries.len());
        Ok(Self {
            api,
            entries,
            raw_paths,
        })
    }

    /// All enumerated devices, in index order.
    pub fn entries(&self) -> &[DeviceEntry] {
        &self.entries
    }

    /// Look up a device by index.
    pub fn entry(&self, index: usize) -> Result<&DeviceEntry, TransportError> {
        self.entries
            .get(index)
            .ok_or_else(|| TransportError::DeviceNotFound(format!("no device at index {index}")))
    }

    /// Open a device by index through the portable backend.
    pub fn open(&self, index: usize) -> Result<HidapiBackend, TransportError> {
        let entry = self.entry(index)?;
        let path = &self.raw_paths[entry.index];
        let device = self.api.open_path(path).map_err(TransportError::from)?;
        info!(
            "opened [{}] {:04x}:{:04x} via hidapi",
            entry.index, entry.vid, entry.pid
        );
        Ok(HidapiBackend::new(device))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_daq_pids_recognized() {
        assert!(is_mcc_daq(MCC_VENDOR_ID, PID_USB_1208FS));
        assert!(is_mcc_daq(MCC_VENDOR_ID, PID_PMD_1024LS));
    }

    #[test]
    fn other_vendors_not_daq() {
        assert!(!is_mcc_daq(0x3151, PID_USB_1208FS));
        assert!(!is_mcc_daq(MCC_VENDOR_ID, 0x0001));
    }
}

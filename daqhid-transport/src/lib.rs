//! Transport layer for sending raw HID reports to USB DAQ devices
//!
//! This crate provides a unified interface for handing single output or
//! feature reports to a Human Interface Device across two backends:
//!
//! - hidapi (portable HID access library)
//! - hidraw (direct kernel interface, Linux, with a bounded write timeout)
//!
//! The [`ReportSender`] owns the logic the backends share: size and type
//! validation, report-ID injection into the first buffer byte, the echo
//! pseudo-type for diagnostics, the analog-scan-start timestamp
//! convention, and normalization of raw backend status codes into a
//! `(code, name, description)` triple.

pub mod backend;
pub mod error;
pub mod hid_portable;
pub mod registry;
pub mod report;
pub mod sender;
pub mod status;

#[cfg(target_os = "linux")]
pub mod hid_native;

pub use backend::ReportBackend;
pub use error::TransportError;
pub use hid_portable::HidapiBackend;
pub use registry::{DeviceEntry, DeviceRegistry, MCC_VENDOR_ID};
pub use report::{ReportStatus, ReportType, ANALOG_SCAN_REPORT_ID, MAX_REPORT_SIZE};
pub use sender::{ReportSender, ScanClock};

#[cfg(target_os = "linux")]
pub use hid_native::HidrawBackend;

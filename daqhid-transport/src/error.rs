//! Transport error types

use thiserror::Error;

use crate::report::MAX_REPORT_SIZE;

/// Errors that abort a send before or outside of transmission.
///
/// Backend transmission failures are deliberately *not* represented here:
/// they come back as a [`ReportStatus`](crate::ReportStatus) with a nonzero
/// code so callers can branch on the number instead of catching an error.
#[derive(Error, Debug)]
pub enum TransportError {
    // Validation errors, raised before any hardware interaction
    #[error("report of {0} bytes exceeds the maximum of {MAX_REPORT_SIZE}")]
    ReportTooLarge(usize),

    #[error("refusing to send an empty report")]
    EmptyReport,

    #[error("invalid report type {0} (valid: 0=echo, 2=output, 3=feature)")]
    InvalidReportType(u8),

    // Device-handle errors
    #[error("device not found: {0}")]
    DeviceNotFound(String),

    #[error("device has no usable interface: {0}")]
    NoUsableInterface(String),

    // HID-specific errors
    #[error("HID error: {0}")]
    Hid(String),

    #[error("HID permission denied: {0}")]
    HidPermissionDenied(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<hidapi::HidError> for TransportError {
    fn from(e: hidapi::HidError) -> Self {
        let msg = e.to_string();
        if msg.contains("Permission denied") || msg.contains("EPERM") {
            TransportError::HidPermissionDenied(msg)
        } else {
            TransportError::Hid(msg)
        }
    }
}

//! The report backend seam
//!
//! Different OS HID stacks disagree on whether the report-ID byte is
//! consumed by the OS layer or must be embedded in the buffer by the
//! caller. Each backend owns its framing convention behind this trait, so
//! the dispatch logic in [`ReportSender`](crate::ReportSender) stays
//! identical across them.

use crate::error::TransportError;
use crate::report::ReportType;

/// A single-shot HID report transmitter.
pub trait ReportBackend: Send + Sync {
    /// Send one output or feature report.
    ///
    /// `report` arrives with the report-ID already written into byte 0
    /// whenever `report_id != 0`. For `report_id == 0` the backend applies
    /// its own framing convention to a scratch copy, never to `report`
    /// itself.
    ///
    /// Returns the backend's raw status: negative on transmission failure,
    /// otherwise the number of bytes accepted. Validation and
    /// device-handle problems are `Err`; transmission failures are data.
    fn transmit(
        &self,
        report_type: ReportType,
        report_id: u8,
        report: &[u8],
    ) -> Result<i64, TransportError>;

    /// Short backend name for logs.
    fn name(&self) -> &'static str;
}

impl<T: ReportBackend + ?Sized> ReportBackend for Box<T> {
    fn transmit(
        &self,
        report_type: ReportType,
        report_id: u8,
        report: &[u8],
    ) -> Result<i64, TransportError> {
        (**self).transmit(report_type, report_id, report)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

/// Prefix one zero framing byte when no report-ID is in use.
///
/// Both real backends hand the kernel/library a buffer whose first byte is
/// the report number, with 0 standing in for "device uses no report IDs".
/// The caller's bytes are copied, never touched.
pub(crate) fn frame(report_id: u8, report: &[u8]) -> Vec<u8> {
    if report_id == 0 {
        let mut buf = Vec::with_capacity(report.len() + 1);
        buf.push(0);
        buf.extend_from_slice(report);
        buf
    } else {
        report.to_vec()
    }
}

pub mod mock {
    //! Recording backend for tests.

    use parking_lot::Mutex;

    use super::{frame, ReportBackend};
    use crate::error::TransportError;
    use crate::report::ReportType;

    /// One recorded transmission, with the exact wire bytes the backend
    /// would have handed to the device.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct MockTransmission {
        pub report_type: ReportType,
        pub report_id: u8,
        pub wire_bytes: Vec<u8>,
    }

    /// Backend that records every transmission instead of sending it.
    ///
    /// Framing follows the real backends' convention (zero byte prepended
    /// for report-ID 0) so wire-level assertions see exactly what a device
    /// would.
    pub struct MockBackend {
        history: Mutex<Vec<MockTransmission>>,
        forced_status: Mutex<Option<i64>>,
    }

    impl MockBackend {
        pub fn new() -> Self {
            Self {
                history: Mutex::new(Vec::new()),
                forced_status: Mutex::new(None),
            }
        }

        /// Backend whose every transmit returns `raw_status`.
        pub fn with_status(raw_status: i64) -> Self {
            let backend = Self::new();
            *backend.forced_status.lock() = Some(raw_status);
            backend
        }

        pub fn transmissions(&self) -> Vec<MockTransmission> {
            self.history.lock().clone()
        }

        pub fn transmission_count(&self) -> usize {
            self.history.lock().len()
        }
    }

    impl Default for MockBackend {
        fn default() -> Self {
            Self::new()
        }
    }

    impl ReportBackend for MockBackend {
        fn transmit(
            &self,
            report_type: ReportType,
            report_id: u8,
            report: &[u8],
        ) -> Result<i64, TransportError> {
            let wire_bytes = frame(report_id, report);
            let accepted = wire_bytes.len() as i64;
            self.history.lock().push(MockTransmission {
                report_type,
                report_id,
                wire_bytes,
            });
            Ok(self.forced_status.lock().unwrap_or(accepted))
        }

        fn name(&self) -> &'static str {
            "mock"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_prepends_zero_for_id_zero() {
        assert_eq!(frame(0, &[0xAA, 0xBB]), vec![0x00, 0xAA, 0xBB]);
    }

    #[test]
    fn frame_copies_as_is_for_nonzero_id() {
        assert_eq!(frame(5, &[0x05, 0x11, 0x22]), vec![0x05, 0x11, 0x22]);
    }
}

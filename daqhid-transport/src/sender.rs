//! The report sender: validation, report-ID injection, dispatch, and
//! status normalization

use std::time::Instant;

use parking_lot::Mutex;
use tracing::{debug, info};

use crate::backend::ReportBackend;
use crate::error::TransportError;
use crate::report::{ReportStatus, ReportType, ANALOG_SCAN_REPORT_ID, MAX_REPORT_SIZE};

/// Timestamp slot for the analog-scan-start convention.
///
/// The MCC PMD/USB-1208FS family starts an analog input scan by sending
/// report-ID 0x11; acquisition code needs the moment that report went out
/// to anchor its sample timing. The slot is updated on every 0x11 send,
/// echoed or transmitted, successful or not.
#[derive(Debug, Default)]
pub struct ScanClock {
    analog_scan_start: Mutex<Option<Instant>>,
}

impl ScanClock {
    fn capture(&self) {
        *self.analog_scan_start.lock() = Some(Instant::now());
    }

    /// When the last analog-input-scan start report was sent, if ever.
    pub fn last_analog_scan_start(&self) -> Option<Instant> {
        *self.analog_scan_start.lock()
    }
}

/// Sends single HID reports through a [`ReportBackend`].
///
/// Synchronous, single-shot, no retries: one failed attempt is reported
/// directly to the caller. The sender borrows nothing beyond the call;
/// serializing concurrent access to a shared device is the caller's job.
pub struct ReportSender<B: ReportBackend> {
    backend: B,
    scan_clock: ScanClock,
}

impl<B: ReportBackend> ReportSender<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            scan_clock: ScanClock::default(),
        }
    }

    /// The backend this sender dispatches to.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Timestamp slot updated by analog-scan-start reports.
    pub fn scan_clock(&self) -> &ScanClock {
        &self.scan_clock
    }

    /// Wire-level entry point matching the scripting binding: report type
    /// as a raw integer, validated after the size checks.
    pub fn set_report(
        &self,
        report_type: u8,
        report_id: u8,
        report: &[u8],
    ) -> Result<ReportStatus, TransportError> {
        Self::validate_size(report)?;
        let report_type = ReportType::from_wire(report_type)?;
        self.dispatch(report_type, report_id, report)
    }

    /// Send one report.
    ///
    /// A nonzero `report_id` lands in byte 0 of the outgoing copy; callers
    /// leave a leading byte of space for it. Zero means "send the bytes
    /// as-is" and leaves framing to the backend. The caller's buffer is
    /// never mutated.
    ///
    /// Validation and device problems come back as `Err`; transmission
    /// failures come back as `Ok` with a nonzero code so callers can
    /// branch on the number.
    pub fn send_report(
        &self,
        report_type: ReportType,
        report_id: u8,
        report: &[u8],
    ) -> Result<ReportStatus, TransportError> {
        Self::validate_size(report)?;
        self.dispatch(report_type, report_id, report)
    }

    /// Injection, echo/transmit, scan-clock capture, and normalization.
    /// Callers have already validated the report size.
    fn dispatch(
        &self,
        report_type: ReportType,
        report_id: u8,
        report: &[u8],
    ) -> Result<ReportStatus, TransportError> {
        let mut outgoing = report.to_vec();
        if report_id != 0 {
            outgoing[0] = report_id;
        }

        let raw = if report_type == ReportType::Echo {
            info!(
                "echo report: type={} id={} bytes={:02X?}",
                report_type.wire(),
                report_id,
                outgoing
            );
            0
        } else {
            debug!(
                "sending {} report id {} ({} bytes) via {}",
                report_type,
                report_id,
                outgoing.len(),
                self.backend.name()
            );
            self.backend.transmit(report_type, report_id, &outgoing)?
        };

        if report_id == ANALOG_SCAN_REPORT_ID {
            self.scan_clock.capture();
        }

        Ok(ReportStatus::from_raw(raw))
    }

    fn validate_size(report: &[u8]) -> Result<(), TransportError> {
        if report.len() > MAX_REPORT_SIZE {
            return Err(TransportError::ReportTooLarge(report.len()));
        }
        if report.is_empty() {
            return Err(TransportError::EmptyReport);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::mock::MockBackend;

    #[test]
    fn scan_clock_starts_empty() {
        let sender = ReportSender::new(MockBackend::new());
        assert!(sender.scan_clock().last_analog_scan_start().is_none());
    }

    #[test]
    fn scan_clock_captures_on_echo_too() {
        let sender = ReportSender::new(MockBackend::new());
        let status = sender
            .send_report(ReportType::Echo, ANALOG_SCAN_REPORT_ID, &[0x11, 0x01])
            .unwrap();
        assert!(status.is_ok());
        assert!(sender.scan_clock().last_analog_scan_start().is_some());
        assert_eq!(sender.backend().transmission_count(), 0);
    }

    #[test]
    fn scan_clock_ignores_other_report_ids() {
        let sender = ReportSender::new(MockBackend::new());
        sender
            .send_report(ReportType::Output, 0x12, &[0x12, 0x00])
            .unwrap();
        assert!(sender.scan_clock().last_analog_scan_start().is_none());
    }
}

//! Portable backend backed by the hidapi library

use hidapi::HidDevice;
use parking_lot::Mutex;
use tracing::debug;

use crate::backend::{frame, ReportBackend};
use crate::error::TransportError;
use crate::report::ReportType;
use crate::status::GENERIC_FAILURE;

/// Backend using the portable HID access library.
///
/// hidapi expects the first byte of every buffer to be the report number,
/// with 0 standing in for "device uses no report IDs", so a zero framing
/// byte is prepended to a scratch copy when no report-ID is in use. The
/// library exposes no per-call timeout for writes; blocking behavior is
/// its own policy.
pub struct HidapiBackend {
    device: Mutex<HidDevice>,
}

impl HidapiBackend {
    pub fn new(device: HidDevice) -> Self {
        Self {
            device: Mutex::new(device),
        }
    }
}

impl ReportBackend for HidapiBackend {
    fn transmit(
        &self,
        report_type: ReportType,
        report_id: u8,
        report: &[u8],
    ) -> Result<i64, TransportError> {
        let wire = frame(report_id, report);
        let device = self.device.lock();

        let result = match report_type {
            ReportType::Output => device.write(&wire),
            ReportType::Feature => device.send_feature_report(&wire).map(|()| wire.len()),
            // Echo never reaches a backend; the sender short-circuits it.
            ReportType::Echo => {
                return Err(TransportError::InvalidReportType(ReportType::Echo.wire()))
            }
        };

        match result {
            Ok(accepted) => {
                debug!(
                    "hidapi sent {} report id {}: {} bytes accepted",
                    report_type, report_id, accepted
                );
                Ok(accepted as i64)
            }
            Err(e) => {
                debug!("hidapi {} report send failed: {}", report_type, e);
                Ok(GENERIC_FAILURE)
            }
        }
    }

    fn name(&self) -> &'static str {
        "hidapi"
    }
}

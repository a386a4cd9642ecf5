//! Status-code translation for backend failures
//!
//! Backends report raw OS status codes: the native backend returns
//! `-errno`, the portable backend returns [`GENERIC_FAILURE`] when the
//! library fails without a specific code. This module maps them to the
//! short name / description pair surfaced in
//! [`ReportStatus`](crate::ReportStatus).

/// Failure code used by the portable backend when hidapi reports an error
/// without an underlying errno.
pub const GENERIC_FAILURE: i64 = -1;

/// Codes a HID send can realistically come back with, keyed by `-code`.
const ERRNO_TABLE: &[(i64, &str, &str)] = &[
    (2, "ENOENT", "device node disappeared"),
    (5, "EIO", "low-level I/O failure on the transfer"),
    (11, "EAGAIN", "device not ready to accept the report"),
    (13, "EACCES", "insufficient permissions for the device node"),
    (16, "EBUSY", "device claimed by another driver"),
    (19, "ENODEV", "device unplugged or vanished"),
    (22, "EINVAL", "report rejected as malformed for this device"),
    (32, "EPIPE", "endpoint stalled the transfer"),
    (71, "EPROTO", "USB protocol error on the wire"),
    (75, "EOVERFLOW", "report larger than the endpoint allows"),
    (108, "ESHUTDOWN", "host controller shut the endpoint down"),
    (110, "ETIMEDOUT", "device did not accept the report in time"),
];

/// Look up the (name, description) pair for a raw backend status code.
///
/// Non-negative codes are success and map to empty strings.
pub fn lookup(code: i64) -> (&'static str, &'static str) {
    if code >= 0 {
        return ("", "");
    }
    if code == GENERIC_FAILURE {
        return ("HIDLIB", "portable HID backend reported a send failure");
    }
    ERRNO_TABLE
        .iter()
        .find(|(errno, _, _)| *errno == -code)
        .map(|(_, name, desc)| (*name, *desc))
        .unwrap_or(("Unknown", "unrecognized backend status code"))
}

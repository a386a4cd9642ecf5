//! Native backend talking to /dev/hidraw* directly
//!
//! Unlike the portable backend this one bounds output-report writes with
//! an explicit timeout and surfaces raw `-errno` status codes, so stuck
//! hardware fails the call instead of hanging it.

use std::fs::{File, OpenOptions};
use std::io;
use std::os::unix::fs::OpenOptionsExt;
use std::os::unix::io::AsRawFd;
use std::path::Path;

use tracing::debug;

use crate::backend::{frame, ReportBackend};
use crate::error::TransportError;
use crate::report::ReportType;

/// Upper bound on an output-report write, in milliseconds. Callers have no
/// way to cancel a stuck transfer otherwise.
const WRITE_TIMEOUT_MS: i32 = 50;

/// `HIDIOCSFEATURE(len)`: dir=(write|read), type='H', nr=0x06, size=len.
fn hidiocsfeature(len: usize) -> libc::c_ulong {
    const IOC_WRITE_READ: libc::c_ulong = 3;
    (IOC_WRITE_READ << 30)
        | (((len as libc::c_ulong) & 0x3fff) << 16)
        | ((b'H' as libc::c_ulong) << 8)
        | 0x06
}

fn last_errno() -> i64 {
    i64::from(io::Error::last_os_error().raw_os_error().unwrap_or(libc::EIO))
}

/// Backend using the kernel hidraw interface.
///
/// hidraw wants the report number as the first byte of every buffer (0
/// when the device uses no report IDs), so framing matches the portable
/// backend. What differs is the bounded write timeout and that failures
/// carry the kernel's errno instead of a generic library code.
#[derive(Debug)]
pub struct HidrawBackend {
    file: File,
}

impl HidrawBackend {
    /// Open a hidraw node, e.g. `/dev/hidraw3`.
    pub fn open(path: &Path) -> Result<Self, TransportError> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .custom_flags(libc::O_NONBLOCK)
            .open(path)
            .map_err(|e| match e.kind() {
                io::ErrorKind::PermissionDenied => {
                    TransportError::HidPermissionDenied(path.display().to_string())
                }
                io::ErrorKind::NotFound => {
                    TransportError::DeviceNotFound(path.display().to_string())
                }
                _ => TransportError::Io(e),
            })?;
        Ok(Self { file })
    }

    /// Wait up to [`WRITE_TIMEOUT_MS`] for the descriptor to accept data.
    /// Returns 0 when writable, a negative errno-style status otherwise.
    fn wait_writable(&self) -> i64 {
        let mut pfd = libc::pollfd {
            fd: self.file.as_raw_fd(),
            events: libc::POLLOUT,
            revents: 0,
        };
        // SAFETY: pfd points to a valid pollfd for the duration of the call.
        let rc = unsafe { libc::poll(&mut pfd, 1, WRITE_TIMEOUT_MS) };
        match rc {
            0 => -i64::from(libc::ETIMEDOUT),
            n if n < 0 => -last_errno(),
            _ => 0,
        }
    }

    fn write_output(&self, wire: &[u8]) -> i64 {
        let waited = self.wait_writable();
        if waited < 0 {
            return waited;
        }
        // SAFETY: wire is valid for wire.len() bytes for the duration of
        // the call.
        let n = unsafe {
            libc::write(
                self.file.as_raw_fd(),
                wire.as_ptr().cast::<libc::c_void>(),
                wire.len(),
            )
        };
        if n < 0 {
            -last_errno()
        } else {
            n as i64
        }
    }

    fn send_feature(&self, wire: &[u8]) -> i64 {
        // Feature reports go out as a synchronous control transfer; the
        // kernel applies its own transfer timeout here.
        // SAFETY: wire is valid for wire.len() bytes and hidiocsfeature
        // encodes exactly that length.
        let rc = unsafe {
            libc::ioctl(
                self.file.as_raw_fd(),
                hidiocsfeature(wire.len()),
                wire.as_ptr(),
            )
        };
        if rc < 0 {
            -last_errno()
        } else {
            i64::from(rc)
        }
    }
}

impl ReportBackend for HidrawBackend {
    fn transmit(
        &self,
        report_type: ReportType,
        report_id: u8,
        report: &[u8],
    ) -> Result<i64, TransportError> {
        let wire = frame(report_id, report);

        let status = match report_type {
            ReportType::Output => self.write_output(&wire),
            ReportType::Feature => self.send_feature(&wire),
            // Echo never reaches a backend; the sender short-circuits it.
            ReportType::Echo => {
                return Err(TransportError::InvalidReportType(ReportType::Echo.wire()))
            }
        };

        debug!(
            "hidraw sent {} report id {} ({} bytes): status {}",
            report_type,
            report_id,
            wire.len(),
            status
        );
        Ok(status)
    }

    fn name(&self) -> &'static str {
        "hidraw"
    }
}

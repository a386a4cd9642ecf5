//! Report model: wire types, size limits, and the normalized status triple

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::TransportError;
use crate::status;

/// Maximum report size accepted for transmission, in bytes.
pub const MAX_REPORT_SIZE: usize = 8192;

/// Report-ID that starts an analog input scan on the MCC PMD/USB-1208FS
/// family. Sending it captures a timestamp in the sender's
/// [`ScanClock`](crate::ScanClock).
pub const ANALOG_SCAN_REPORT_ID: u8 = 0x11;

/// HID report type selector.
///
/// Wire values follow the scripting-binding convention: 0 = echo
/// (diagnostic print, no transmission), 2 = output, 3 = feature.
/// 1 (input) is not sendable and is rejected, as is anything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportType {
    /// Print the report instead of transmitting it
    Echo,
    /// Output report (interrupt/control OUT)
    Output,
    /// Feature report (control transfer)
    Feature,
}

impl ReportType {
    /// Parse the wire value used by callers.
    pub fn from_wire(value: u8) -> Result<Self, TransportError> {
        match value {
            0 => Ok(ReportType::Echo),
            2 => Ok(ReportType::Output),
            3 => Ok(ReportType::Feature),
            other => Err(TransportError::InvalidReportType(other)),
        }
    }

    /// Wire value of this report type.
    pub fn wire(self) -> u8 {
        match self {
            ReportType::Echo => 0,
            ReportType::Output => 2,
            ReportType::Feature => 3,
        }
    }

    /// Human-readable name.
    pub fn name(self) -> &'static str {
        match self {
            ReportType::Echo => "echo",
            ReportType::Output => "output",
            ReportType::Feature => "feature",
        }
    }
}

impl fmt::Display for ReportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ReportType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "0" | "echo" => Ok(ReportType::Echo),
            "2" | "out" | "output" => Ok(ReportType::Output),
            "3" | "feat" | "feature" => Ok(ReportType::Feature),
            _ => Err(format!(
                "unknown report type: \"{s}\". Use echo/0, output/2, feature/3"
            )),
        }
    }
}

/// Normalized result of a send.
///
/// `n` is 0 on success and the raw backend status code on failure, with
/// `name` and `description` filled in from the status table. Callers
/// branch on the number; nothing here is ever thrown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportStatus {
    /// Raw backend status (0 on success)
    #[serde(rename = "n")]
    pub code: i64,
    /// Short error name, empty on success
    pub name: String,
    /// Human-readable description, empty on success
    pub description: String,
}

impl ReportStatus {
    /// Successful transmission.
    pub fn ok() -> Self {
        Self {
            code: 0,
            name: String::new(),
            description: String::new(),
        }
    }

    /// Normalize a raw backend status code.
    ///
    /// Non-negative values (bytes accepted) collapse to success; negative
    /// values keep their code and pick up name/description from the table.
    pub fn from_raw(code: i64) -> Self {
        if code >= 0 {
            return Self::ok();
        }
        let (name, description) = status::lookup(code);
        Self {
            code,
            name: name.to_string(),
            description: description.to_string(),
        }
    }

    /// Whether the transmission succeeded.
    pub fn is_ok(&self) -> bool {
        self.code == 0
    }
}

impl fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_ok() {
            f.write_str("ok")
        } else {
            write!(f, "{} ({}): {}", self.code, self.name, self.description)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_roundtrip_for_valid_types() {
        for ty in [ReportType::Echo, ReportType::Output, ReportType::Feature] {
            assert_eq!(ReportType::from_wire(ty.wire()).unwrap(), ty);
        }
    }

    #[test]
    fn input_reports_are_not_sendable() {
        assert!(matches!(
            ReportType::from_wire(1),
            Err(TransportError::InvalidReportType(1))
        ));
    }

    #[test]
    fn out_of_range_wire_values_rejected() {
        for v in [4u8, 5, 17, 255] {
            assert!(matches!(
                ReportType::from_wire(v),
                Err(TransportError::InvalidReportType(_))
            ));
        }
    }

    #[test]
    fn parse_from_str_aliases() {
        assert_eq!("output".parse::<ReportType>().unwrap(), ReportType::Output);
        assert_eq!("FEAT".parse::<ReportType>().unwrap(), ReportType::Feature);
        assert_eq!("0".parse::<ReportType>().unwrap(), ReportType::Echo);
        assert!("input".parse::<ReportType>().is_err());
    }

    #[test]
    fn nonnegative_raw_status_is_success() {
        assert!(ReportStatus::from_raw(0).is_ok());
        assert!(ReportStatus::from_raw(65).is_ok());
        let ok = ReportStatus::from_raw(3);
        assert_eq!(ok.code, 0);
        assert!(ok.name.is_empty());
        assert!(ok.description.is_empty());
    }

    #[test]
    fn negative_raw_status_keeps_code_and_names_it() {
        let st = ReportStatus::from_raw(-110);
        assert_eq!(st.code, -110);
        assert_eq!(st.name, "ETIMEDOUT");
        assert!(!st.description.is_empty());
        assert!(!st.is_ok());
    }
}

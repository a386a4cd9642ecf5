// CLI definitions using clap

use clap::{Parser, Subcommand, ValueEnum};
use daqhid_transport::ReportType;

#[derive(Parser)]
#[command(name = "daqhid")]
#[command(author, version, about = "Send raw HID reports to USB DAQ devices")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Print the result triple as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List HID devices with their registry indexes
    #[command(visible_aliases = ["ls", "l"])]
    List {
        /// Only show known MCC DAQ devices
        #[arg(long)]
        daq_only: bool,
    },

    /// Send one report and print the result triple
    Send {
        /// Registry index of the target device (see `list`)
        #[arg(short, long)]
        device: usize,

        /// Report type
        #[arg(short = 't', long, value_enum, default_value_t = ReportTypeArg::Output)]
        report_type: ReportTypeArg,

        /// Report ID, decimal or 0x-hex (0 = none; nonzero overwrites the
        /// first report byte)
        #[arg(short = 'i', long, default_value_t = 0, value_parser = parse_report_id)]
        report_id: u8,

        /// Backend to transmit through
        #[arg(long, value_enum, default_value_t = BackendArg::Portable)]
        backend: BackendArg,

        /// Report payload as hex bytes, e.g. `11 00 0A` or `11,00,0a`
        #[arg(required = true)]
        bytes: Vec<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportTypeArg {
    /// Print the report instead of sending it
    Echo,
    /// Output report
    Output,
    /// Feature report
    Feature,
}

impl From<ReportTypeArg> for ReportType {
    fn from(arg: ReportTypeArg) -> Self {
        match arg {
            ReportTypeArg::Echo => ReportType::Echo,
            ReportTypeArg::Output => ReportType::Output,
            ReportTypeArg::Feature => ReportType::Feature,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BackendArg {
    /// hidapi (works everywhere, no write timeout)
    Portable,
    /// hidraw with a 50 ms write timeout (Linux only)
    Native,
}

/// Parse a report ID as decimal or `0x`-prefixed hex, matching the
/// convention the payload bytes already use.
fn parse_report_id(s: &str) -> Result<u8, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u8::from_str_radix(hex, 16),
        None => s.parse::<u8>(),
    };
    parsed.map_err(|_| format!("invalid report ID: \"{s}\" (use 0-255 or 0x00-0xff)"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_id_accepts_decimal_and_hex() {
        assert_eq!(parse_report_id("17"), Ok(0x11));
        assert_eq!(parse_report_id("0x11"), Ok(0x11));
        assert_eq!(parse_report_id("0XFF"), Ok(0xFF));
        assert_eq!(parse_report_id("0"), Ok(0));
    }

    #[test]
    fn report_id_rejects_out_of_range_and_garbage() {
        assert!(parse_report_id("256").is_err());
        assert!(parse_report_id("0x100").is_err());
        assert!(parse_report_id("id").is_err());
        assert!(parse_report_id("").is_err());
    }
}

//! Command handlers for the daqhid CLI

use anyhow::Context;
use daqhid_transport::registry::is_mcc_daq;
use daqhid_transport::{DeviceRegistry, ReportBackend, ReportSender};
use tracing::{debug, info};

use crate::cli::{BackendArg, ReportTypeArg};

pub fn list(daq_only: bool) -> anyhow::Result<()> {
    let registry = DeviceRegistry::new()?;

    let mut shown = 0usize;
    for entry in registry.entries() {
        let is_daq = is_mcc_daq(entry.vid, entry.pid);
        if daq_only && !is_daq {
            continue;
        }
        println!(
            "[{}] {:04x}:{:04x} {}{} {}",
            entry.index,
            entry.vid,
            entry.pid,
            entry.product.as_deref().unwrap_or("?"),
            if is_daq { " (MCC DAQ)" } else { "" },
            entry.path
        );
        shown += 1;
    }

    if shown == 0 {
        println!(
            "no {}devices found",
            if daq_only { "MCC DAQ " } else { "HID " }
        );
    }
    Ok(())
}

pub fn send(
    device: usize,
    report_type: ReportTypeArg,
    report_id: u8,
    backend: BackendArg,
    bytes: &[String],
    json: bool,
) -> anyhow::Result<()> {
    let report = parse_hex_bytes(bytes)?;

    let registry = DeviceRegistry::new()?;
    let backend: Box<dyn ReportBackend> = match backend {
        BackendArg::Portable => Box::new(registry.open(device)?),
        BackendArg::Native => open_native(&registry, device)?,
    };

    let sender = ReportSender::new(backend);
    let status = sender
        .send_report(report_type.into(), report_id, &report)
        .context("send aborted")?;
    info!(
        "device {} report id {}: status {}",
        device, report_id, status.code
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        println!("{status}");
    }

    // Nonzero status is the device's answer, not a CLI failure; callers
    // branch on the printed code.
    Ok(())
}

#[cfg(target_os = "linux")]
fn open_native(
    registry: &DeviceRegistry,
    device: usize,
) -> anyhow::Result<Box<dyn ReportBackend>> {
    use std::path::Path;

    let entry = registry.entry(device)?;
    let backend = daqhid_transport::HidrawBackend::open(Path::new(&entry.path))?;
    Ok(Box::new(backend))
}

#[cfg(not(target_os = "linux"))]
fn open_native(
    _registry: &DeviceRegistry,
    _device: usize,
) -> anyhow::Result<Box<dyn ReportBackend>> {
    anyhow::bail!("the native hidraw backend is only available on Linux")
}

/// Parse payload tokens as hex bytes. Tokens may be space- or
/// comma-separated and carry an optional `0x` prefix.
fn parse_hex_bytes(tokens: &[String]) -> anyhow::Result<Vec<u8>> {
    let mut bytes = Vec::new();
    for token in tokens {
        for part in token.split(',').filter(|p| !p.is_empty()) {
            let hex = part.strip_prefix("0x").unwrap_or(part);
            let byte = u8::from_str_radix(hex, 16)
                .with_context(|| format!("invalid hex byte: \"{part}\""))?;
            bytes.push(byte);
        }
    }
    debug!("parsed {} payload bytes", bytes.len());
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parse_space_separated_hex() {
        let bytes = parse_hex_bytes(&strings(&["11", "00", "0A"])).unwrap();
        assert_eq!(bytes, vec![0x11, 0x00, 0x0A]);
    }

    #[test]
    fn parse_comma_separated_with_prefix() {
        let bytes = parse_hex_bytes(&strings(&["0x11,0xff,2"])).unwrap();
        assert_eq!(bytes, vec![0x11, 0xFF, 0x02]);
    }

    #[test]
    fn reject_non_hex() {
        assert!(parse_hex_bytes(&strings(&["zz"])).is_err());
        assert!(parse_hex_bytes(&strings(&["100"])).is_err());
    }

    #[test]
    fn payload_parsing_logs_through_tracing() {
        use std::io;
        use std::sync::{Arc, Mutex};

        #[derive(Clone)]
        struct CaptureWriter(Arc<Mutex<Vec<u8>>>);

        impl io::Write for CaptureWriter {
            fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
                self.0.lock().unwrap().extend_from_slice(buf);
                Ok(buf.len())
            }

            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let captured = Arc::new(Mutex::new(Vec::new()));
        let writer = CaptureWriter(Arc::clone(&captured));
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(move || writer.clone())
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            parse_hex_bytes(&strings(&["11", "00", "0a"])).unwrap();
        });

        let output = String::from_utf8(captured.lock().unwrap().clone()).unwrap();
        assert!(output.contains("parsed 3 payload bytes"));
    }
}

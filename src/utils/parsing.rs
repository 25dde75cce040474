//! String parsing and formatting utilities

use crate::error::{HostfactsError, Result};

const SIZE_UNITS: [&str; 6] = ["", "K", "M", "G", "T", "P"];

/// Parse a `Key:   12345 kB` line from /proc/meminfo into bytes
pub fn parse_kb_line(line: &str) -> Result<u64> {
    let value = line
        .split_once(':')
        .map(|(_, v)| v.trim().trim_end_matches("kB").trim())
        .ok_or_else(|| HostfactsError::Parse(format!("Invalid meminfo line: {}", line)))?;
    let kb: u64 = value
        .parse()
        .map_err(|_| HostfactsError::Parse(format!("Invalid memory value: {}", value)))?;
    Ok(kb * 1024)
}

/// Human readable byte size in binary units, e.g. `1.50GB`
pub fn format_size(bytes: u64) -> String {
    let mut value = bytes as f64;
    for unit in &SIZE_UNITS[..SIZE_UNITS.len() - 1] {
        if value < 1024.0 {
            return format!("{:.2}{}B", value, unit);
        }
        value /= 1024.0;
    }
    format!("{:.2}{}B", value, SIZE_UNITS[SIZE_UNITS.len() - 1])
}

/// Percentage of `part` in `whole`, 0 when `whole` is 0
pub fn percent(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}

pub fn format_mhz(value: f64) -> String {
    format!("{:.2}Mhz", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(0), "0.00B");
        assert_eq!(format_size(1023), "1023.00B");
        assert_eq!(format_size(1024), "1.00KB");
        assert_eq!(format_size(1536 * 1024 * 1024), "1.50GB");
        assert_eq!(format_size(1024u64.pow(5) * 3), "3.00PB");
        assert_eq!(format_size(1024u64.pow(6) * 2), "2048.00PB");
    }

    #[test]
    fn test_parse_kb_line() {
        assert_eq!(parse_kb_line("MemTotal:       16384000 kB").unwrap(), 16384000 * 1024);
        assert_eq!(parse_kb_line("HugePages_Total:       0").unwrap(), 0);
        assert!(parse_kb_line("MemTotal: lots kB").is_err());
        assert!(parse_kb_line("garbage").is_err());
    }

    #[test]
    fn test_percent() {
        assert_eq!(percent(1, 4), 25.0);
        assert_eq!(percent(5, 0), 0.0);
        assert_eq!(format_percent(33.333), "33.3%");
        assert_eq!(format_mhz(4500.0), "4500.00Mhz");
    }
}

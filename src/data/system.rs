//! Host identity and boot information structures

use super::report::Report;
use chrono::{DateTime, Datelike, Local, Timelike};

/// Who and what this host is
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IdentityInfo {
    pub system: String,
    pub node_name: String,
    pub release: String,
    pub version: String,
    pub machine: String,
    pub processor: String,
    pub ip_address: String,
    pub mac_address: String,
}

impl IdentityInfo {
    pub fn to_report(&self) -> Report {
        let mut report = Report::with_banner("System Information");
        report.push("System: ", self.system.as_str());
        report.push("Node Name: ", self.node_name.as_str());
        report.push("Release: ", self.release.as_str());
        report.push("Version: ", self.version.as_str());
        report.push("Machine: ", self.machine.as_str());
        report.push("Processor: ", self.processor.as_str());
        report.push("Ip-Address: ", self.ip_address.as_str());
        report.push("Mac-Address: ", self.mac_address.as_str());
        report
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BootInfo {
    pub boot_time: DateTime<Local>,
}

impl BootInfo {
    /// The timestamp lives in the label, unpadded, with an empty value
    pub fn to_report(&self) -> Report {
        let bt = &self.boot_time;
        let mut report = Report::with_banner("Boot Time");
        report.push(
            format!(
                "Boot Time: {}/{}/{} {}:{}:{}",
                bt.year(),
                bt.month(),
                bt.day(),
                bt.hour(),
                bt.minute(),
                bt.second()
            ),
            "",
        );
        report
    }
}

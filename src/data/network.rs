//! Network interface structures

use super::report::Report;
use crate::utils::parsing::format_size;

const MISSING: &str = "-";

/// One address bound to an interface
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InterfaceAddress {
    Ipv4 {
        address: String,
        netmask: Option<String>,
        broadcast: Option<String>,
    },
    Link {
        address: String,
        netmask: Option<String>,
        broadcast: Option<String>,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InterfaceInfo {
    pub name: String,
    pub addresses: Vec<InterfaceAddress>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NetworkInfo {
    pub interfaces: Vec<InterfaceInfo>,
    pub bytes_sent: u64,
    pub bytes_recv: u64,
}

impl NetworkInfo {
    pub fn to_report(&self) -> Report {
        let mut report = Report::with_banner("Network Information");
        for interface in &self.interfaces {
            report.push("=== Interface: ", format!("{} ===", interface.name));
            for address in &interface.addresses {
                match address {
                    InterfaceAddress::Ipv4 { address, netmask, broadcast } => {
                        report.push("  IP Address: ", address.as_str());
                        report.push("  Netmask: ", netmask.as_deref().unwrap_or(MISSING));
                        report.push("  Broadcast IP: ", broadcast.as_deref().unwrap_or(MISSING));
                    }
                    InterfaceAddress::Link { address, netmask, broadcast } => {
                        report.push("  MAC Address: ", address.as_str());
                        report.push("  Netmask: ", netmask.as_deref().unwrap_or(MISSING));
                        report.push("  Broadcast MAC: ", broadcast.as_deref().unwrap_or(MISSING));
                    }
                }
            }
        }
        report.push("Total Bytes Sent: ", format_size(self.bytes_sent));
        report.push("Total Bytes Received: ", format_size(self.bytes_recv));
        report
    }
}

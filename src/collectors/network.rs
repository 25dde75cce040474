//! Network interface and traffic collection

use crate::data::{InterfaceAddress, InterfaceInfo, NetworkInfo, Report};
use crate::error::{HostfactsError, Result};
use crate::utils::file::read_file_safe;
use std::ffi::CStr;
use std::io;
use std::net::Ipv4Addr;
use std::path::PathBuf;

/// Group (interface, address) pairs by interface, keeping first-seen order
pub fn group_addresses(addresses: Vec<(String, InterfaceAddress)>) -> Vec<InterfaceInfo> {
    let mut interfaces: Vec<InterfaceInfo> = Vec::new();
    for (name, address) in addresses {
        match interfaces.iter_mut().find(|i| i.name == name) {
            Some(interface) => interface.addresses.push(address),
            None => interfaces.push(InterfaceInfo {
                name,
                addresses: vec![address],
            }),
        }
    }
    interfaces
}

pub fn format_mac(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect::<Vec<_>>()
        .join(":")
}

unsafe fn ipv4_at(addr: *const libc::sockaddr) -> Option<String> {
    if addr.is_null() || (*addr).sa_family as i32 != libc::AF_INET {
        return None;
    }
    let sin = &*(addr as *const libc::sockaddr_in);
    Some(Ipv4Addr::from(u32::from_be(sin.sin_addr.s_addr)).to_string())
}

unsafe fn mac_at(addr: *const libc::sockaddr) -> Option<String> {
    if addr.is_null() || (*addr).sa_family as i32 != libc::AF_PACKET {
        return None;
    }
    let sll = &*(addr as *const libc::sockaddr_ll);
    let len = (sll.sll_halen as usize).min(sll.sll_addr.len());
    Some(format_mac(&sll.sll_addr[..len]))
}

/// IPv4 and link-layer addresses of every interface, via getifaddrs(3)
pub fn enumerate_interfaces() -> Result<Vec<InterfaceInfo>> {
    let mut found = Vec::new();

    unsafe {
        let mut head: *mut libc::ifaddrs = std::ptr::null_mut();
        if libc::getifaddrs(&mut head) != 0 {
            return Err(HostfactsError::from(io::Error::last_os_error()));
        }

        let mut cursor = head;
        while !cursor.is_null() {
            let ifa = &*cursor;
            cursor = ifa.ifa_next;

            if ifa.ifa_addr.is_null() {
                continue;
            }

            let name = CStr::from_ptr(ifa.ifa_name).to_string_lossy().into_owned();
            let broadcast = if ifa.ifa_flags & libc::IFF_BROADCAST as libc::c_uint != 0 {
                ifa.ifa_ifu as *const libc::sockaddr
            } else {
                std::ptr::null()
            };

            let address = match (*ifa.ifa_addr).sa_family as i32 {
                libc::AF_INET => ipv4_at(ifa.ifa_addr).map(|address| InterfaceAddress::Ipv4 {
                    address,
                    netmask: ipv4_at(ifa.ifa_netmask),
                    broadcast: ipv4_at(broadcast),
                }),
                libc::AF_PACKET => mac_at(ifa.ifa_addr).map(|address| InterfaceAddress::Link {
                    address,
                    netmask: mac_at(ifa.ifa_netmask),
                    broadcast: mac_at(broadcast),
                }),
                _ => None,
            };

            if let Some(address) = address {
                found.push((name, address));
            }
        }

        libc::freeifaddrs(head);
    }

    Ok(group_addresses(found))
}

/// Total (sent, received) bytes across all interfaces in /proc/net/dev
pub fn parse_net_dev(content: &str) -> Result<(u64, u64)> {
    let mut sent = 0;
    let mut received = 0;

    for line in content.lines().skip(2) {
        let Some((_, counters)) = line.split_once(':') else {
            continue;
        };
        let fields: Vec<&str> = counters.split_whitespace().collect();
        if fields.len() < 9 {
            return Err(HostfactsError::Parse(format!("Invalid net/dev line: {}", line)));
        }
        received += fields[0].parse::<u64>().unwrap_or(0);
        sent += fields[8].parse::<u64>().unwrap_or(0);
    }

    Ok((sent, received))
}

pub struct NetworkCollector {
    proc_root: PathBuf,
}

impl NetworkCollector {
    pub fn new(proc_root: impl Into<PathBuf>) -> Self {
        NetworkCollector { proc_root: proc_root.into() }
    }

    pub fn collect_info(&self) -> Result<NetworkInfo> {
        let interfaces = enumerate_interfaces()?;
        let net_dev = read_file_safe(self.proc_root.join("net/dev"))?;
        let (bytes_sent, bytes_recv) = parse_net_dev(&net_dev)?;
        Ok(NetworkInfo {
            interfaces,
            bytes_sent,
            bytes_recv,
        })
    }

    pub fn collect(&self) -> Result<Report> {
        Ok(self.collect_info()?.to_report())
    }
}

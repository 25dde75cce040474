//! System information collection (identity, boot time)

use crate::collectors::hardware::parse_cpuinfo;
use crate::data::{BootInfo, IdentityInfo, Report};
use crate::error::{HostfactsError, Result};
use crate::utils::file::*;
use chrono::{Local, TimeZone};
use std::ffi::CStr;
use std::fs;
use std::io;
use std::net::{IpAddr, ToSocketAddrs};
use std::path::{Path, PathBuf};
use tracing::warn;

const NO_MAC: &str = "00:00:00:00:00:00";

/// Fields of uname(2)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Uname {
    pub sysname: String,
    pub nodename: String,
    pub release: String,
    pub version: String,
    pub machine: String,
}

pub fn read_uname() -> Result<Uname> {
    fn field(raw: &[libc::c_char]) -> String {
        unsafe { CStr::from_ptr(raw.as_ptr()) }.to_string_lossy().into_owned()
    }

    unsafe {
        let mut uts: libc::utsname = std::mem::zeroed();
        if libc::uname(&mut uts) != 0 {
            return Err(HostfactsError::from(io::Error::last_os_error()));
        }
        Ok(Uname {
            sysname: field(&uts.sysname),
            nodename: field(&uts.nodename),
            release: field(&uts.release),
            version: field(&uts.version),
            machine: field(&uts.machine),
        })
    }
}

/// First IPv4 address the host name resolves to
pub fn resolve_ipv4(host: &str) -> Option<String> {
    (host, 0)
        .to_socket_addrs()
        .ok()?
        .map(|addr| addr.ip())
        .find(IpAddr::is_ipv4)
        .map(|ip| ip.to_string())
}

/// Hardware address of the first non-loopback interface, by name order
pub fn first_mac_address(net_dir: &Path) -> Option<String> {
    let mut names: Vec<String> = fs::read_dir(net_dir)
        .ok()?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .filter(|name| name != "lo")
        .collect();
    names.sort();

    names.into_iter().find_map(|name| {
        let address = read_first_line(net_dir.join(&name).join("address")).ok()?.to_lowercase();
        (!address.is_empty() && address != NO_MAC).then_some(address)
    })
}

pub struct IdentityCollector {
    proc_root: PathBuf,
    sys_root: PathBuf,
}

impl IdentityCollector {
    pub fn new(proc_root: impl Into<PathBuf>, sys_root: impl Into<PathBuf>) -> Self {
        IdentityCollector {
            proc_root: proc_root.into(),
            sys_root: sys_root.into(),
        }
    }

    fn cpu_brand(&self) -> Option<String> {
        let cpuinfo = read_file_safe(self.proc_root.join("cpuinfo")).ok()?;
        parse_cpuinfo(&cpuinfo).brand
    }

    pub fn collect_info(&self) -> Result<IdentityInfo> {
        let uname = read_uname()?;

        let ip_address = resolve_ipv4(&uname.nodename).unwrap_or_else(|| {
            warn!("could not resolve host name '{}'", uname.nodename);
            "Unknown".to_string()
        });
        let mac_address = first_mac_address(&self.sys_root.join("class/net"))
            .unwrap_or_else(|| NO_MAC.to_string());
        let processor = self.cpu_brand().unwrap_or_else(|| uname.machine.clone());

        Ok(IdentityInfo {
            system: uname.sysname,
            node_name: uname.nodename,
            release: uname.release,
            version: uname.version,
            machine: uname.machine,
            processor,
            ip_address,
            mac_address,
        })
    }

    pub fn collect(&self) -> Result<Report> {
        Ok(self.collect_info()?.to_report())
    }
}

/// Seconds since the epoch at which the system booted, from /proc/stat
pub fn parse_boot_time(stat: &str) -> Result<i64> {
    stat.lines()
        .find_map(|line| line.strip_prefix("btime"))
        .and_then(|value| value.trim().parse().ok())
        .ok_or_else(|| HostfactsError::Parse("btime not found in stat".to_string()))
}

pub struct BootCollector {
    proc_root: PathBuf,
}

impl BootCollector {
    pub fn new(proc_root: impl Into<PathBuf>) -> Self {
        BootCollector { proc_root: proc_root.into() }
    }

    pub fn collect_info(&self) -> Result<BootInfo> {
        let btime = parse_boot_time(&read_file_safe(self.proc_root.join("stat"))?)?;
        let boot_time = Local
            .timestamp_opt(btime, 0)
            .single()
            .ok_or_else(|| HostfactsError::Parse(format!("Invalid boot timestamp: {}", btime)))?;
        Ok(BootInfo { boot_time })
    }

    pub fn collect(&self) -> Result<Report> {
        Ok(self.collect_info()?.to_report())
    }
}

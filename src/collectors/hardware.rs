//! Hardware information collection (CPU, Memory, Disk)

use crate::data::{
    CpuInfo, DiskInfo, DiskUsage, MemoryInfo, MemorySnapshot, PartitionInfo, Report, SwapInfo,
};
use crate::error::{HostfactsError, Result};
use crate::utils::{file::*, parsing::*};
use std::collections::{HashMap, HashSet};
use std::io;
use std::path::PathBuf;
use std::thread;
use std::time::Duration;
use tracing::{debug, warn};

const SECTOR_SIZE: u64 = 512;

// ---------------------------------------------------------------------------
// CPU
// ---------------------------------------------------------------------------

/// Summary of /proc/cpuinfo
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CpuTopology {
    pub logical: usize,
    pub physical: usize,
    pub brand: Option<String>,
    pub mean_mhz: Option<f64>,
}

/// Jiffies spent busy and in total for one cpu line of /proc/stat
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CpuTimes {
    pub busy: u64,
    pub total: u64,
}

impl CpuTimes {
    /// Busy percentage between an earlier sample and this one
    pub fn usage_since(&self, earlier: &CpuTimes) -> f64 {
        let total = self.total.saturating_sub(earlier.total);
        let busy = self.busy.saturating_sub(earlier.busy);
        percent(busy, total)
    }
}

/// Aggregate `cpu` line plus one entry per `cpuN` line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CpuSample {
    pub aggregate: CpuTimes,
    pub per_core: Vec<CpuTimes>,
}

pub fn parse_cpuinfo(content: &str) -> CpuTopology {
    let mut logical = 0;
    let mut cores = HashSet::new();
    let mut brand = None;
    let mut mhz_sum = 0.0;
    let mut mhz_count = 0usize;

    let mut physical_id: Option<String> = None;
    let mut core_id: Option<String> = None;

    // Blocks are separated by blank lines; a trailing empty line closes the last one
    for line in content.lines().chain(std::iter::once("")) {
        let Some((key, value)) = line.split_once(':') else {
            if let (Some(p), Some(c)) = (physical_id.take(), core_id.take()) {
                cores.insert((p, c));
            }
            continue;
        };
        let value = value.trim();
        match key.trim() {
            "processor" => logical += 1,
            "physical id" => physical_id = Some(value.to_string()),
            "core id" => core_id = Some(value.to_string()),
            "model name" if brand.is_none() && !value.is_empty() => brand = Some(value.to_string()),
            "cpu MHz" => {
                if let Ok(mhz) = value.parse::<f64>() {
                    mhz_sum += mhz;
                    mhz_count += 1;
                }
            }
            _ => {}
        }
    }

    CpuTopology {
        logical,
        physical: if cores.is_empty() { logical } else { cores.len() },
        brand,
        mean_mhz: (mhz_count > 0).then(|| mhz_sum / mhz_count as f64),
    }
}

pub fn parse_proc_stat(content: &str) -> Result<CpuSample> {
    let mut sample = CpuSample::default();
    let mut seen_aggregate = false;

    for line in content.lines() {
        let mut fields = line.split_whitespace();
        let Some(label) = fields.next() else { continue };
        if !label.starts_with("cpu") {
            continue;
        }
        let values: Vec<u64> = fields.map(|f| f.parse().unwrap_or(0)).collect();
        if values.len() < 4 {
            return Err(HostfactsError::Parse(format!("Invalid cpu line: {}", line)));
        }
        // user nice system idle iowait irq softirq steal; guest time is already in user
        let total: u64 = values.iter().take(8).sum();
        let idle = values[3] + values.get(4).copied().unwrap_or(0);
        let times = CpuTimes { busy: total.saturating_sub(idle), total };

        if label == "cpu" {
            sample.aggregate = times;
            seen_aggregate = true;
        } else {
            sample.per_core.push(times);
        }
    }

    if !seen_aggregate {
        return Err(HostfactsError::Parse("No aggregate cpu line in stat".to_string()));
    }
    Ok(sample)
}

pub struct CpuCollector {
    proc_root: PathBuf,
    sys_root: PathBuf,
    sample_interval: Duration,
}

impl CpuCollector {
    pub fn new(
        proc_root: impl Into<PathBuf>,
        sys_root: impl Into<PathBuf>,
        sample_interval: Duration,
    ) -> Self {
        CpuCollector {
            proc_root: proc_root.into(),
            sys_root: sys_root.into(),
            sample_interval,
        }
    }

    fn read_sample(&self) -> Result<CpuSample> {
        parse_proc_stat(&read_file_safe(self.proc_root.join("stat"))?)
    }

    /// cpufreq limit in MHz, 0 when the platform does not expose it
    fn read_freq_limit(&self, attribute: &str) -> f64 {
        let path = self.sys_root.join("devices/system/cpu/cpu0/cpufreq").join(attribute);
        read_u64(path).map(|khz| khz as f64 / 1000.0).unwrap_or(0.0)
    }

    pub fn collect_info(&self) -> Result<CpuInfo> {
        let topology = parse_cpuinfo(&read_file_safe(self.proc_root.join("cpuinfo"))?);

        let before = self.read_sample()?;
        thread::sleep(self.sample_interval);
        let after = self.read_sample()?;

        let per_core_usage = after
            .per_core
            .iter()
            .zip(before.per_core.iter())
            .map(|(now, then)| now.usage_since(then))
            .collect();

        let current_mhz = match topology.mean_mhz {
            Some(mhz) => mhz,
            None => self.read_freq_limit("scaling_cur_freq"),
        };

        Ok(CpuInfo {
            physical_cores: topology.physical,
            logical_cores: topology.logical,
            max_mhz: self.read_freq_limit("cpuinfo_max_freq"),
            min_mhz: self.read_freq_limit("cpuinfo_min_freq"),
            current_mhz,
            per_core_usage,
            total_usage: after.aggregate.usage_since(&before.aggregate),
        })
    }

    pub fn collect(&self) -> Result<Report> {
        Ok(self.collect_info()?.to_report())
    }
}

// ---------------------------------------------------------------------------
// Memory
// ---------------------------------------------------------------------------

pub fn parse_meminfo(content: &str) -> Result<MemorySnapshot> {
    let values: HashMap<&str, u64> = content
        .lines()
        .filter_map(|line| {
            let key = line.split(':').next()?;
            parse_kb_line(line).ok().map(|bytes| (key, bytes))
        })
        .collect();

    let get = |key: &str| values.get(key).copied().unwrap_or(0);
    let total = *values
        .get("MemTotal")
        .ok_or_else(|| HostfactsError::Parse("MemTotal not found".to_string()))?;

    let free = get("MemFree");
    let buffers = get("Buffers");
    let cached = get("Cached") + get("SReclaimable");
    let available = values
        .get("MemAvailable")
        .copied()
        .unwrap_or(free + buffers + cached);

    // Caches can exceed total on some kernels; fall back to total - free
    let mut used = total.saturating_sub(free + buffers + cached);
    if used == 0 {
        used = total.saturating_sub(free);
    }

    let swap_total = get("SwapTotal");
    let swap_free = get("SwapFree");
    let swap_used = swap_total.saturating_sub(swap_free);

    Ok(MemorySnapshot {
        memory: MemoryInfo {
            total,
            available,
            used,
            percent: percent(total.saturating_sub(available), total),
        },
        swap: SwapInfo {
            total: swap_total,
            free: swap_free,
            used: swap_used,
            percent: percent(swap_used, swap_total),
        },
    })
}

pub struct MemoryCollector {
    proc_root: PathBuf,
}

impl MemoryCollector {
    pub fn new(proc_root: impl Into<PathBuf>) -> Self {
        MemoryCollector { proc_root: proc_root.into() }
    }

    pub fn collect_info(&self) -> Result<MemorySnapshot> {
        parse_meminfo(&read_file_safe(self.proc_root.join("meminfo"))?)
    }

    pub fn collect(&self) -> Result<Report> {
        Ok(self.collect_info()?.to_report())
    }
}

// ---------------------------------------------------------------------------
// Disk
// ---------------------------------------------------------------------------

/// Source of per-mountpoint usage figures
pub trait UsageSource: Send + Sync {
    fn usage(&self, mountpoint: &str) -> io::Result<DiskUsage>;
}

/// Usage via the statvfs syscall
#[derive(Debug, Default, Clone, Copy)]
pub struct StatvfsSource;

impl UsageSource for StatvfsSource {
    fn usage(&self, mountpoint: &str) -> io::Result<DiskUsage> {
        use std::ffi::CString;

        let path = CString::new(mountpoint)
            .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "mountpoint contains NUL"))?;

        unsafe {
            let mut stat: libc::statvfs = std::mem::zeroed();
            if libc::statvfs(path.as_ptr(), &mut stat) != 0 {
                return Err(io::Error::last_os_error());
            }

            let frsize = stat.f_frsize as u64;
            let total = (stat.f_blocks as u64).wrapping_mul(frsize);
            let free = (stat.f_bavail as u64).wrapping_mul(frsize);
            let used = (stat.f_blocks as u64)
                .saturating_sub(stat.f_bfree as u64)
                .wrapping_mul(frsize);

            Ok(DiskUsage {
                total,
                used,
                free,
                percent: percent(used, used + free),
            })
        }
    }
}

/// A physical mount from /proc/mounts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountEntry {
    pub device: String,
    pub mountpoint: String,
    pub fs_type: String,
}

/// /proc/mounts escapes whitespace and backslashes as `\ooo`
fn unescape_mount_field(field: &str) -> String {
    let bytes = field.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'\\' && i + 3 < bytes.len() {
            let digits = &bytes[i + 1..i + 4];
            if digits.iter().all(|b| (b'0'..=b'7').contains(b)) {
                let code = digits.iter().fold(0u32, |acc, b| acc * 8 + u32::from(b - b'0'));
                out.push(code as u8);
                i += 4;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

pub fn parse_mounts(content: &str) -> Vec<MountEntry> {
    content
        .lines()
        .filter_map(|line| {
            let mut fields = line.split_whitespace();
            let device = fields.next()?;
            let mountpoint = fields.next()?;
            let fs_type = fields.next()?;
            // Virtual filesystems (proc, tmpfs, cgroup...) have no device path
            if !device.starts_with('/') {
                return None;
            }
            Some(MountEntry {
                device: unescape_mount_field(device),
                mountpoint: unescape_mount_field(mountpoint),
                fs_type: fs_type.to_string(),
            })
        })
        .collect()
}

/// Total bytes read and written by the devices accepted by `is_whole_disk`
pub fn parse_diskstats(content: &str, is_whole_disk: impl Fn(&str) -> bool) -> (u64, u64) {
    content
        .lines()
        .filter_map(|line| {
            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.len() < 14 || !is_whole_disk(fields[2]) {
                return None;
            }
            let sectors_read: u64 = fields[5].parse().unwrap_or(0);
            let sectors_written: u64 = fields[9].parse().unwrap_or(0);
            Some((sectors_read * SECTOR_SIZE, sectors_written * SECTOR_SIZE))
        })
        .fold((0, 0), |(r, w), (dr, dw)| (r + dr, w + dw))
}

pub struct DiskCollector<P: UsageSource = StatvfsSource> {
    proc_root: PathBuf,
    sys_root: PathBuf,
    source: P,
}

impl DiskCollector<StatvfsSource> {
    pub fn new(proc_root: impl Into<PathBuf>, sys_root: impl Into<PathBuf>) -> Self {
        DiskCollector::with_source(proc_root, sys_root, StatvfsSource)
    }
}

impl<P: UsageSource> DiskCollector<P> {
    pub fn with_source(
        proc_root: impl Into<PathBuf>,
        sys_root: impl Into<PathBuf>,
        source: P,
    ) -> Self {
        DiskCollector {
            proc_root: proc_root.into(),
            sys_root: sys_root.into(),
            source,
        }
    }

    fn read_partitions(&self) -> Result<Vec<PartitionInfo>> {
        let mounts = parse_mounts(&read_file_safe(self.proc_root.join("mounts"))?);
        let mut partitions = Vec::with_capacity(mounts.len());

        for mount in mounts {
            let usage = match self.source.usage(&mount.mountpoint) {
                Ok(usage) => Some(usage),
                Err(e) if e.kind() == io::ErrorKind::PermissionDenied => {
                    warn!("skipping usage for {}: {}", mount.mountpoint, e);
                    None
                }
                Err(e) => return Err(e.into()),
            };
            partitions.push(PartitionInfo {
                device: mount.device,
                mountpoint: mount.mountpoint,
                fs_type: mount.fs_type,
                usage,
            });
        }

        Ok(partitions)
    }

    fn read_io_totals(&self) -> Result<(u64, u64)> {
        let content = read_file_safe(self.proc_root.join("diskstats"))?;
        let block_dir = self.sys_root.join("block");

        if block_dir.is_dir() {
            Ok(parse_diskstats(&content, |name| block_dir.join(name).exists()))
        } else {
            debug!("{} not present, summing every diskstats entry", block_dir.display());
            Ok(parse_diskstats(&content, |_| true))
        }
    }

    pub fn collect_info(&self) -> Result<DiskInfo> {
        let partitions = self.read_partitions()?;
        let (read_bytes, write_bytes) = self.read_io_totals()?;
        Ok(DiskInfo {
            partitions,
            read_bytes,
            write_bytes,
        })
    }

    pub fn collect(&self) -> Result<Report> {
        Ok(self.collect_info()?.to_report())
    }
}

//! Hardware-specific information structures

use super::report::Report;
use crate::utils::parsing::{format_mhz, format_percent, format_size};

/// CPU topology, frequency and utilisation over one sampling window
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CpuInfo {
    pub physical_cores: usize,
    pub logical_cores: usize,
    pub max_mhz: f64,
    pub min_mhz: f64,
    pub current_mhz: f64,
    pub per_core_usage: Vec<f64>,
    pub total_usage: f64,
}

impl CpuInfo {
    pub fn to_report(&self) -> Report {
        let mut report = Report::with_banner("CPU Info");
        report.push("Physical cores: ", self.physical_cores.to_string());
        report.push("Total cores: ", self.logical_cores.to_string());
        report.push("Max Frequency: ", format_mhz(self.max_mhz));
        report.push("Min Frequency: ", format_mhz(self.min_mhz));
        report.push("Current Frequency: ", format_mhz(self.current_mhz));
        report.push("CPU Usage Per Core: ", "");
        for (i, usage) in self.per_core_usage.iter().enumerate() {
            report.push(format!("Core {}: ", i), format_percent(*usage));
        }
        report.push("Total CPU Usage: ", format_percent(self.total_usage));
        report
    }
}

/// Memory figures in bytes
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryInfo {
    pub total: u64,
    pub available: u64,
    pub used: u64,
    pub percent: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SwapInfo {
    pub total: u64,
    pub free: u64,
    pub used: u64,
    pub percent: f64,
}

/// Virtual memory plus swap, reported together
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemorySnapshot {
    pub memory: MemoryInfo,
    pub swap: SwapInfo,
}

impl MemorySnapshot {
    pub fn to_report(&self) -> Report {
        let mut report = Report::with_banner("Memory Information");
        report.push("Total: ", format_size(self.memory.total));
        report.push("Available: ", format_size(self.memory.available));
        report.push("Used: ", format_size(self.memory.used));
        report.push("Percentage: ", format_percent(self.memory.percent));
        report.section("SWAP");
        report.push("Total: ", format_size(self.swap.total));
        report.push("Free: ", format_size(self.swap.free));
        report.push("Used: ", format_size(self.swap.used));
        report.push("Percentage: ", format_percent(self.swap.percent));
        report
    }
}

/// Usage of a single mounted filesystem, in bytes
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DiskUsage {
    pub total: u64,
    pub used: u64,
    pub free: u64,
    pub percent: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PartitionInfo {
    pub device: String,
    pub mountpoint: String,
    pub fs_type: String,
    /// `None` when the usage query was refused
    pub usage: Option<DiskUsage>,
}

/// Partitions and cumulative I/O
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiskInfo {
    pub partitions: Vec<PartitionInfo>,
    pub read_bytes: u64,
    pub write_bytes: u64,
}

impl DiskInfo {
    pub fn to_report(&self) -> Report {
        let mut report = Report::with_banner("Disk Information");
        report.push("Partitions and Usage:", "");
        for partition in &self.partitions {
            report.push("=== Device: ", format!("{} ===", partition.device));
            report.push("  Mountpoint: ", partition.mountpoint.as_str());
            report.push("  File system type: ", partition.fs_type.as_str());
            if let Some(usage) = partition.usage {
                report.push("  Total Size: ", format_size(usage.total));
                report.push("  Used: ", format_size(usage.used));
                report.push("  Free: ", format_size(usage.free));
                report.push("  Percentage: ", format_percent(usage.percent));
            }
        }
        report.push("Total read: ", format_size(self.read_bytes));
        report.push("Total write: ", format_size(self.write_bytes));
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cpu_report_layout() {
        let info = CpuInfo {
            physical_cores: 2,
            logical_cores: 4,
            max_mhz: 4000.0,
            min_mhz: 800.0,
            current_mhz: 2100.5,
            per_core_usage: vec![10.0, 20.0, 30.0, 40.0],
            total_usage: 25.0,
        };
        let report = info.to_report();
        assert_eq!(report.get("Physical cores: "), Some("2"));
        assert_eq!(report.get("Current Frequency: "), Some("2100.50Mhz"));
        assert_eq!(report.get("Core 3: "), Some("40.0%"));
        assert_eq!(report.get("Total CPU Usage: "), Some("25.0%"));
        // banner, 6 header lines, 4 cores, total
        assert_eq!(report.len(), 12);
    }

    #[test]
    fn test_partition_without_usage_keeps_identity_lines() {
        let info = DiskInfo {
            partitions: vec![
                PartitionInfo {
                    device: "/dev/sda1".to_string(),
                    mountpoint: "/".to_string(),
                    fs_type: "ext4".to_string(),
                    usage: Some(DiskUsage { total: 1024, used: 512, free: 512, percent: 50.0 }),
                },
                PartitionInfo {
                    device: "/dev/sdb1".to_string(),
                    mountpoint: "/secret".to_string(),
                    fs_type: "xfs".to_string(),
                    usage: None,
                },
            ],
            read_bytes: 0,
            write_bytes: 2048,
        };
        let report = info.to_report();
        assert_eq!(report.values_of("=== Device: "), vec!["/dev/sda1 ===", "/dev/sdb1 ==="]);
        assert_eq!(report.values_of("  Total Size: "), vec!["1.00KB"]);
        assert_eq!(report.get("Total write: "), Some("2.00KB"));
    }
}

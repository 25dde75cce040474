//! OS-facing collectors and the routine sets built from them

pub mod hardware;
pub mod network;
pub mod system;

use crate::config::Config;
use crate::registry::RoutineSet;
use crate::variants::VariantRoutines;
use hardware::{CpuCollector, DiskCollector, MemoryCollector};
use network::NetworkCollector;
use std::sync::Arc;
use std::time::Duration;
use system::{BootCollector, IdentityCollector};

pub const SYSTEM_INFORMATION: &str = "system_information";
pub const BOOT_TIME: &str = "boot_time";
pub const CPU_INFORMATION: &str = "cpu_information";
pub const MEMORY_INFORMATION: &str = "memory_information";
pub const DISK_INFORMATION: &str = "disk_information";
pub const NETWORK_INFORMATION: &str = "network_information";

/// Every collector, bound to the configured procfs/sysfs roots
pub struct Collectors {
    identity: Arc<IdentityCollector>,
    boot: Arc<BootCollector>,
    cpu: Arc<CpuCollector>,
    memory: Arc<MemoryCollector>,
    disk: Arc<DiskCollector>,
    network: Arc<NetworkCollector>,
}

impl Collectors {
    pub fn from_config(config: &Config) -> Self {
        let proc_root = config.paths.proc_root();
        let sys_root = config.paths.sys_root();
        let sample_interval = Duration::from_millis(config.cpu.sample_interval_ms);

        Collectors {
            identity: Arc::new(IdentityCollector::new(&proc_root, &sys_root)),
            boot: Arc::new(BootCollector::new(&proc_root)),
            cpu: Arc::new(CpuCollector::new(&proc_root, &sys_root, sample_interval)),
            memory: Arc::new(MemoryCollector::new(&proc_root)),
            disk: Arc::new(DiskCollector::new(&proc_root, &sys_root)),
            network: Arc::new(NetworkCollector::new(&proc_root)),
        }
    }

    /// Host identity and boot time
    pub fn primary_routines(&self) -> RoutineSet {
        let identity = Arc::clone(&self.identity);
        let boot = Arc::clone(&self.boot);
        RoutineSet::new()
            .with(SYSTEM_INFORMATION, move || identity.collect())
            .with(BOOT_TIME, move || boot.collect())
    }

    /// CPU, memory, disk and network usage
    pub fn resource_routines(&self) -> RoutineSet {
        let cpu = Arc::clone(&self.cpu);
        let memory = Arc::clone(&self.memory);
        let disk = Arc::clone(&self.disk);
        let network = Arc::clone(&self.network);
        RoutineSet::new()
            .with(CPU_INFORMATION, move || cpu.collect())
            .with(MEMORY_INFORMATION, move || memory.collect())
            .with(DISK_INFORMATION, move || disk.collect())
            .with(NETWORK_INFORMATION, move || network.collect())
    }

    pub fn variant_routines(&self) -> VariantRoutines {
        VariantRoutines {
            primary: self.primary_routines(),
            resource: self.resource_routines(),
        }
    }
}

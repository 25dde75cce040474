//! Data structures produced by the collectors

pub mod hardware;
pub mod network;
pub mod report;
pub mod system;

pub use hardware::{
    CpuInfo, DiskInfo, DiskUsage, MemoryInfo, MemorySnapshot, PartitionInfo, SwapInfo,
};
pub use network::{InterfaceAddress, InterfaceInfo, NetworkInfo};
pub use report::Report;
pub use system::{BootInfo, IdentityInfo};

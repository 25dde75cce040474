//! hostfacts library
//!
//! Collects static and dynamic host information (identity, boot time, CPU,
//! memory, disk, network) and times parallel against sequential collection.

pub mod collectors;
pub mod config;
pub mod data;
pub mod dispatch;
pub mod display;
pub mod error;
pub mod registry;
pub mod timing;
pub mod utils;
pub mod variants;

pub use data::Report;
pub use dispatch::{DispatchMode, Dispatcher};
pub use error::{HostfactsError, Result};
pub use registry::{Routine, RoutineSet};
pub use timing::TimingTable;
pub use variants::{Variant, VariantRoutines};

use std::io::Write;

/// Run all four variants against the configured host and return their timings
pub fn run<W: Write>(config: &config::Config, out: &mut W) -> Result<TimingTable> {
    let collectors = collectors::Collectors::from_config(config);
    let dispatcher = Dispatcher::new(config.dispatch.workers)?;
    let mut table = TimingTable::new();

    variants::run_all(&collectors.variant_routines(), &dispatcher, &mut table, out)?;
    Ok(table)
}

//! Shared helpers for reading procfs/sysfs and formatting values

pub mod file;
pub mod parsing;

//! Plain-text rendering of reports and the timing summary

use crate::data::Report;
use crate::timing::TimingTable;
use std::io::{self, Write};

const SUMMARY_RULE_WIDTH: usize = 60;

/// Write every pair of every report as `label value`, one per line
pub fn print_reports<W: Write>(out: &mut W, reports: &[Report]) -> io::Result<()> {
    for report in reports {
        for (label, value) in report.iter() {
            writeln!(out, "{} {}", label, value)?;
        }
    }
    Ok(())
}

pub fn print_summary<W: Write>(out: &mut W, table: &TimingTable) -> io::Result<()> {
    writeln!(out, "\n{}", "=".repeat(SUMMARY_RULE_WIDTH))?;
    for (name, seconds) in table.iter() {
        writeln!(out, "Variant {} executed in {} sec.", name, seconds)?;
    }
    out.flush()
}

//! The four collector variants and how each one is run

use crate::data::Report;
use crate::dispatch::{DispatchMode, Dispatcher};
use crate::display::print_reports;
use crate::error::Result;
use crate::registry::{enumerate, RoutineSet};
use crate::timing::{timed, TimingTable};
use std::io::Write;
use tracing::debug;

/// The two independent routine sets variants are composed from
#[derive(Debug, Clone, Default)]
pub struct VariantRoutines {
    pub primary: RoutineSet,
    pub resource: RoutineSet,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    PrimaryAndBoot,
    ResourceUsage,
    Combined,
    CombinedSequential,
}

impl Variant {
    /// Entry-point order
    pub const ALL: [Variant; 4] = [
        Variant::PrimaryAndBoot,
        Variant::ResourceUsage,
        Variant::Combined,
        Variant::CombinedSequential,
    ];

    /// Key under which the run is timed
    pub fn name(&self) -> &'static str {
        match self {
            Variant::PrimaryAndBoot => "PrimaryAndBoot",
            Variant::ResourceUsage => "ResourceUsage",
            Variant::Combined => "Combined",
            Variant::CombinedSequential => "CombinedSequential",
        }
    }

    pub fn mode(&self) -> DispatchMode {
        match self {
            Variant::CombinedSequential => DispatchMode::Sequential,
            _ => DispatchMode::Parallel,
        }
    }

    pub fn routines(&self, sets: &VariantRoutines) -> RoutineSet {
        match self {
            Variant::PrimaryAndBoot => sets.primary.clone(),
            Variant::ResourceUsage => sets.resource.clone(),
            Variant::Combined | Variant::CombinedSequential => sets.primary.union(&sets.resource),
        }
    }

    /// One timed dispatch of this variant's routines; reports are printed
    /// before the timing line.
    pub fn run<W: Write>(
        &self,
        sets: &VariantRoutines,
        dispatcher: &Dispatcher,
        table: &mut TimingTable,
        out: &mut W,
    ) -> Result<Vec<Report>> {
        timed(table, self.name(), out, |out| {
            let routines = enumerate(&self.routines(sets));
            debug!("{} runs {} routines", self.name(), routines.len());
            let reports = dispatcher.dispatch(&routines, self.mode())?;
            print_reports(out, &reports)?;
            out.flush()?;
            Ok(reports)
        })
    }
}

/// Run every variant in order, recording each into `table`
pub fn run_all<W: Write>(
    sets: &VariantRoutines,
    dispatcher: &Dispatcher,
    table: &mut TimingTable,
    out: &mut W,
) -> Result<()> {
    for variant in Variant::ALL {
        variant.run(sets, dispatcher, table, out)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labelled(label: &'static str) -> impl Fn() -> Result<Report> + Send + Sync + 'static {
        move || Ok([(label, "x")].into_iter().collect())
    }

    fn sets() -> VariantRoutines {
        VariantRoutines {
            primary: RoutineSet::new()
                .with("system_information", labelled("system"))
                .with("boot_time", labelled("boot")),
            resource: RoutineSet::new()
                .with("cpu_information", labelled("cpu"))
                .with("memory_information", labelled("memory"))
                .with("disk_information", labelled("disk"))
                .with("network_information", labelled("network")),
        }
    }

    #[test]
    fn test_routine_sets_per_variant() {
        let sets = sets();
        assert_eq!(Variant::PrimaryAndBoot.routines(&sets).len(), 2);
        assert_eq!(Variant::ResourceUsage.routines(&sets).len(), 4);
        assert_eq!(Variant::Combined.routines(&sets).len(), 6);
        assert_eq!(
            Variant::Combined.routines(&sets).names(),
            Variant::CombinedSequential.routines(&sets).names()
        );
    }

    #[test]
    fn test_modes() {
        assert_eq!(Variant::Combined.mode(), DispatchMode::Parallel);
        assert_eq!(Variant::CombinedSequential.mode(), DispatchMode::Sequential);
    }

    #[test]
    fn test_run_prints_reports_then_timing() {
        let dispatcher = Dispatcher::new(2).unwrap();
        let mut table = TimingTable::new();
        let mut out = Vec::new();

        let reports = Variant::PrimaryAndBoot
            .run(&sets(), &dispatcher, &mut table, &mut out)
            .unwrap();
        assert_eq!(reports.len(), 2);

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("boot x\nsystem x\n\nPrimaryAndBoot exec time: "));
        assert!(table.get("PrimaryAndBoot").unwrap() >= 0.0);
    }

    #[test]
    fn test_combined_variants_agree() {
        let dispatcher = Dispatcher::new(0).unwrap();
        let mut table = TimingTable::new();
        let mut out = Vec::new();
        let parallel = Variant::Combined.run(&sets(), &dispatcher, &mut table, &mut out).unwrap();
        let sequential = Variant::CombinedSequential
            .run(&sets(), &dispatcher, &mut table, &mut out)
            .unwrap();
        assert_eq!(parallel, sequential);
        assert_eq!(parallel.len(), 6);
    }
}

use hostfacts::{
    DispatchMode, Dispatcher, HostfactsError, Report, Routine, RoutineSet, TimingTable, Variant,
    VariantRoutines,
};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

fn report(label: &str, value: &str) -> Report {
    [(label, value)].into_iter().collect()
}

fn delayed(name: &'static str, value: &'static str, delay_ms: u64) -> Routine {
    Routine::new(name, move || {
        thread::sleep(Duration::from_millis(delay_ms));
        Ok(report(name, value))
    })
}

fn stub_sets() -> VariantRoutines {
    VariantRoutines {
        primary: RoutineSet::new()
            .with("system_information", || Ok(report("System: ", "Linux")))
            .with("boot_time", || Ok(report("Boot Time: 2024/1/2 3:4:5", ""))),
        resource: RoutineSet::new()
            .with("cpu_information", || Ok(report("Total cores: ", "8")))
            .with("memory_information", || Ok(report("Total: ", "1.00GB")))
            .with("disk_information", || Ok(report("Total read: ", "0.00B")))
            .with("network_information", || Ok(report("Total Bytes Sent: ", "0.00B"))),
    }
}

#[test]
fn parallel_results_follow_submission_order() {
    let routines = vec![delayed("a", "1", 80), delayed("b", "2", 40), delayed("c", "3", 0)];
    let dispatcher = Dispatcher::new(3).unwrap();

    let reports = dispatcher.dispatch(&routines, DispatchMode::Parallel).unwrap();

    assert_eq!(reports, vec![report("a", "1"), report("b", "2"), report("c", "3")]);
}

#[test]
fn failing_second_routine_yields_no_results() {
    let routines = vec![
        delayed("a", "1", 0),
        Routine::new("b", || Err(HostfactsError::Parse("permission denied".to_string()))),
        delayed("c", "3", 20),
    ];
    let dispatcher = Dispatcher::new(0).unwrap();

    for mode in [DispatchMode::Parallel, DispatchMode::Sequential] {
        let result = dispatcher.dispatch(&routines, mode);
        assert!(matches!(
            result,
            Err(HostfactsError::Collection { ref routine, .. }) if routine == "b"
        ));
    }
}

#[test]
fn every_variant_records_one_timing() {
    let dispatcher = Dispatcher::new(0).unwrap();
    let mut table = TimingTable::new();
    let mut out = Vec::new();

    hostfacts::variants::run_all(&stub_sets(), &dispatcher, &mut table, &mut out).unwrap();

    let names: Vec<&str> = table.iter().map(|(name, _)| name).collect();
    assert_eq!(names, vec!["PrimaryAndBoot", "ResourceUsage", "Combined", "CombinedSequential"]);
    assert!(table.iter().all(|(_, seconds)| seconds >= 0.0));

    let text = String::from_utf8(out).unwrap();
    assert_eq!(text.matches("exec time: ").count(), 4);
    // 2 + 4 + 6 + 6 report lines
    assert_eq!(text.matches("System:  Linux").count(), 3);
    assert_eq!(text.matches("Total:  1.00GB").count(), 3);
}

/// Elapsed seconds printed on the last `exec time:` line
fn last_printed_elapsed(out: &[u8]) -> f64 {
    let text = String::from_utf8(out.to_vec()).unwrap();
    let line = text.lines().rev().find(|l| l.contains(" exec time: ")).unwrap();
    line.rsplit(' ').next().unwrap().parse().unwrap()
}

#[test]
fn rerunning_a_variant_overwrites_its_entry() {
    // Each run sleeps longer than the previous one
    let delay_ms = Arc::new(AtomicU64::new(0));
    let sleeper = delay_ms.clone();
    let sets = VariantRoutines {
        primary: RoutineSet::new(),
        resource: RoutineSet::new().with("cpu_information", move || {
            let ms = sleeper.fetch_add(50, Ordering::SeqCst);
            thread::sleep(Duration::from_millis(ms));
            Ok(report("Total cores: ", "8"))
        }),
    };
    let dispatcher = Dispatcher::new(2).unwrap();
    let mut table = TimingTable::new();
    let mut out = Vec::new();

    Variant::ResourceUsage.run(&sets, &dispatcher, &mut table, &mut out).unwrap();
    let first = table.get("ResourceUsage").unwrap();
    assert_eq!(last_printed_elapsed(&out), first);

    Variant::ResourceUsage.run(&sets, &dispatcher, &mut table, &mut out).unwrap();
    let second = table.get("ResourceUsage").unwrap();

    assert_eq!(table.len(), 1);
    assert_eq!(second, last_printed_elapsed(&out));
    assert!(second >= 0.05);
    assert!(second > first);
}

#[test]
fn failing_variant_stops_before_timing_line() {
    let sets = VariantRoutines {
        primary: RoutineSet::new().with("system_information", || {
            Err(HostfactsError::Parse("uname".to_string()))
        }),
        resource: RoutineSet::new(),
    };
    let dispatcher = Dispatcher::new(1).unwrap();
    let mut table = TimingTable::new();
    let mut out = Vec::new();

    assert!(hostfacts::variants::run_all(&sets, &dispatcher, &mut table, &mut out).is_err());
    assert!(table.is_empty());
    assert!(out.is_empty());
}

#[test]
fn empty_variant_still_times() {
    let dispatcher = Dispatcher::new(1).unwrap();
    let mut table = TimingTable::new();
    let mut out = Vec::new();

    let reports = Variant::PrimaryAndBoot
        .run(&VariantRoutines::default(), &dispatcher, &mut table, &mut out)
        .unwrap();

    assert!(reports.is_empty());
    assert_eq!(table.len(), 1);
}

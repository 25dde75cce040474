//! Wall-clock timing of variant runs

use crate::error::Result;
use std::io::Write;
use std::time::Instant;
use tracing::debug;

/// Variant name to elapsed seconds, in first-insertion order.
///
/// Owned by the entry point and lent to each run; recording a name again
/// overwrites its value but keeps its position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimingTable {
    entries: Vec<(String, f64)>,
}

impl TimingTable {
    pub fn new() -> Self {
        TimingTable::default()
    }

    pub fn record(&mut self, name: &str, seconds: f64) {
        match self.entries.iter_mut().find(|(n, _)| n == name) {
            Some(entry) => entry.1 = seconds,
            None => self.entries.push((name.to_string(), seconds)),
        }
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, s)| *s)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(n, s)| (n.as_str(), *s))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Run `op`, then record and print how long it took under `name`.
///
/// Nothing is recorded or printed when `op` fails.
pub fn timed<T, W, F>(table: &mut TimingTable, name: &str, out: &mut W, op: F) -> Result<T>
where
    W: Write,
    F: FnOnce(&mut W) -> Result<T>,
{
    let start = Instant::now();
    let value = op(out)?;
    let elapsed = start.elapsed().as_secs_f64();

    table.record(name, elapsed);
    debug!("{} finished in {:.6}s", name, elapsed);
    writeln!(out, "\n{} exec time: {}", name, elapsed)?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HostfactsError;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_record_overwrites_in_place() {
        let mut table = TimingTable::new();
        table.record("first", 1.0);
        table.record("second", 2.0);
        table.record("first", 3.0);

        assert_eq!(table.len(), 2);
        assert_eq!(table.iter().collect::<Vec<_>>(), vec![("first", 3.0), ("second", 2.0)]);
    }

    #[test]
    fn test_timed_records_and_prints() {
        let mut table = TimingTable::new();
        let mut out = Vec::new();

        let value = timed(&mut table, "Sleepy", &mut out, |out| {
            writeln!(out, "body")?;
            thread::sleep(Duration::from_millis(5));
            Ok(42)
        })
        .unwrap();

        assert_eq!(value, 42);
        let elapsed = table.get("Sleepy").unwrap();
        assert!(elapsed >= 0.005);

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("body\n\nSleepy exec time: "));
    }

    #[test]
    fn test_failed_op_records_nothing() {
        let mut table = TimingTable::new();
        let mut out = Vec::new();

        let result: Result<()> = timed(&mut table, "Broken", &mut out, |_| {
            Err(HostfactsError::Parse("nope".to_string()))
        });

        assert!(result.is_err());
        assert!(table.is_empty());
        assert!(out.is_empty());
    }
}

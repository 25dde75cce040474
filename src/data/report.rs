//! Ordered label/value report produced by every collection routine

const BANNER_FILL: usize = 40;
const SECTION_FILL: usize = 20;

/// An ordered sequence of (label, value) pairs.
///
/// Insertion order is display order and labels may repeat: memory and swap
/// both contribute a `Total: ` line and both are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    entries: Vec<(String, String)>,
}

impl Report {
    pub fn new() -> Self {
        Report::default()
    }

    /// Start a report with a top-level `==== Title ====` banner line
    pub fn with_banner(title: &str) -> Self {
        let mut report = Report::new();
        report.push(banner(title, BANNER_FILL), "");
        report
    }

    /// Add a smaller sub-banner inside the report
    pub fn section(&mut self, title: &str) {
        self.push(banner(title, SECTION_FILL), "");
    }

    pub fn push(&mut self, label: impl Into<String>, value: impl Into<String>) {
        self.entries.push((label.into(), value.into()));
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First value recorded under `label`
    pub fn get(&self, label: &str) -> Option<&str> {
        self.iter().find(|(k, _)| *k == label).map(|(_, v)| v)
    }

    /// Every value recorded under `label`, in order
    pub fn values_of(&self, label: &str) -> Vec<&str> {
        self.iter().filter(|(k, _)| *k == label).map(|(_, v)| v).collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Report {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Report {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

fn banner(title: &str, fill: usize) -> String {
    let bar = "=".repeat(fill);
    format!("{} {} {}", bar, title, bar)
}

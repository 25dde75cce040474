//! Explicit registration of collection routines
//!
//! A [`RoutineSet`] is the compile-time list of routines a variant runs.
//! [`enumerate`] turns it into the ordered sequence handed to the dispatcher:
//! public routines only, sorted by name, each name once.

use crate::data::Report;
use crate::error::Result;
use std::fmt;
use std::sync::Arc;
use tracing::warn;

/// Names starting with this prefix are internal and never dispatched
pub const INTERNAL_PREFIX: char = '_';

pub type RoutineFn = dyn Fn() -> Result<Report> + Send + Sync;

/// A named, zero-argument collection operation
#[derive(Clone)]
pub struct Routine {
    name: String,
    func: Arc<RoutineFn>,
}

impl Routine {
    pub fn new<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn() -> Result<Report> + Send + Sync + 'static,
    {
        Routine {
            name: name.into(),
            func: Arc::new(func),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_public(&self) -> bool {
        !self.name.starts_with(INTERNAL_PREFIX)
    }

    pub fn call(&self) -> Result<Report> {
        (self.func)()
    }
}

impl fmt::Debug for Routine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Routine").field("name", &self.name).finish()
    }
}

#[derive(Debug, Clone, Default)]
pub struct RoutineSet {
    routines: Vec<Routine>,
}

impl RoutineSet {
    pub fn new() -> Self {
        RoutineSet::default()
    }

    /// Builder form of [`RoutineSet::insert`]
    pub fn with<F>(mut self, name: impl Into<String>, func: F) -> Self
    where
        F: Fn() -> Result<Report> + Send + Sync + 'static,
    {
        self.insert(Routine::new(name, func));
        self
    }

    /// Register a routine; a later registration under the same name replaces the earlier one
    pub fn insert(&mut self, routine: Routine) {
        match self.routines.iter_mut().find(|r| r.name == routine.name) {
            Some(existing) => {
                warn!("routine '{}' registered twice, keeping the latest", routine.name);
                *existing = routine;
            }
            None => self.routines.push(routine),
        }
    }

    /// Routines of `self` followed by those of `other` whose names are new.
    /// On a name collision the routine from `self` wins.
    pub fn union(&self, other: &RoutineSet) -> RoutineSet {
        let mut merged = self.clone();
        for routine in &other.routines {
            if merged.contains(routine.name()) {
                warn!(
                    "routine '{}' defined by both sets, keeping the first definition",
                    routine.name()
                );
                continue;
            }
            merged.routines.push(routine.clone());
        }
        merged
    }

    pub fn contains(&self, name: &str) -> bool {
        self.routines.iter().any(|r| r.name == name)
    }

    /// Registered names in registration order
    pub fn names(&self) -> Vec<&str> {
        self.routines.iter().map(Routine::name).collect()
    }

    pub fn len(&self) -> usize {
        self.routines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routines.is_empty()
    }
}

/// Public routines of `set`, sorted by name
pub fn enumerate(set: &RoutineSet) -> Vec<Routine> {
    let mut routines: Vec<Routine> =
        set.routines.iter().filter(|r| r.is_public()).cloned().collect();
    routines.sort_by(|a, b| a.name.cmp(&b.name));
    routines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marker(label: &'static str) -> impl Fn() -> Result<Report> + Send + Sync + 'static {
        move || Ok([(label, "")].into_iter().collect())
    }

    fn names(routines: &[Routine]) -> Vec<&str> {
        routines.iter().map(Routine::name).collect()
    }

    #[test]
    fn test_enumerate_sorts_and_hides_internal() {
        let set = RoutineSet::new()
            .with("system_information", marker("s"))
            .with("_get_size", marker("internal"))
            .with("boot_time", marker("b"));

        let routines = enumerate(&set);
        assert_eq!(names(&routines), vec!["boot_time", "system_information"]);
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn test_enumerate_empty_set() {
        assert!(enumerate(&RoutineSet::new()).is_empty());
    }

    #[test]
    fn test_insert_same_name_replaces() {
        let set = RoutineSet::new().with("a", marker("first")).with("a", marker("second"));
        assert_eq!(set.len(), 1);
        let report = enumerate(&set)[0].call().unwrap();
        assert_eq!(report.get("second"), Some(""));
    }

    #[test]
    fn test_union_includes_each_name_once() {
        let primary = RoutineSet::new()
            .with("boot_time", marker("b"))
            .with("shared", marker("from primary"));
        let resource = RoutineSet::new()
            .with("cpu_information", marker("c"))
            .with("shared", marker("from resource"));

        let combined = primary.union(&resource);
        assert_eq!(combined.names(), vec!["boot_time", "shared", "cpu_information"]);

        let routines = enumerate(&combined);
        assert_eq!(names(&routines), vec!["boot_time", "cpu_information", "shared"]);
        let shared = routines.iter().find(|r| r.name() == "shared").unwrap();
        assert_eq!(shared.call().unwrap().get("from primary"), Some(""));
    }

    #[test]
    fn test_union_of_disjoint_sets_keeps_everything() {
        let a = RoutineSet::new().with("x", marker("x"));
        let b = RoutineSet::new().with("y", marker("y")).with("z", marker("z"));
        let combined = a.union(&b);
        assert_eq!(combined.len(), 3);
        assert!(combined.contains("z"));
        assert!(a.union(&RoutineSet::new()).contains("x"));
    }
}

use super::PackageName;
use std::collections::{BTreeMap, BTreeSet};

/// ReverseGraph aggregate: package -> set of packages that list it as a direct dependency
///
/// Always derived from a [`super::ForwardGraph`]; see
/// [`crate::graph_exploration::services::ReverseIndex`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReverseGraph {
    entries: BTreeMap<PackageName, BTreeSet<PackageName>>,
}

impl ReverseGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that `dependent` directly depends on `dependency`.
    pub fn add_edge(&mut self, dependency: PackageName, dependent: PackageName) {
        self.entries.entry(dependency).or_default().insert(dependent);
    }

    pub fn dependents_of(&self, package: &PackageName) -> Option<&BTreeSet<PackageName>> {
        self.entries.get(package)
    }

    pub fn contains(&self, package: &PackageName) -> bool {
        self.entries.contains_key(package)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PackageName, &BTreeSet<PackageName>)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

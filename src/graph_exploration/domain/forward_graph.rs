use super::PackageName;
use std::collections::{BTreeMap, BTreeSet};

/// ForwardGraph aggregate: package -> ordered direct dependencies
///
/// Holds one entry per package that was expanded during a build. Dependency
/// lists keep the order the dependency source returned them in. Packages that
/// were filtered out or cut off by the depth limit never become keys, but may
/// still appear inside another package's list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ForwardGraph {
    entries: BTreeMap<PackageName, Vec<PackageName>>,
    visit_order: Vec<PackageName>,
}

impl ForwardGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the dependencies of a freshly expanded package.
    ///
    /// Re-inserting a package replaces its list but keeps its original
    /// position in the visit order.
    pub fn insert(&mut self, package: PackageName, dependencies: Vec<PackageName>) {
        if !self.entries.contains_key(&package) {
            self.visit_order.push(package.clone());
        }
        self.entries.insert(package, dependencies);
    }

    pub fn dependencies_of(&self, package: &PackageName) -> Option<&[PackageName]> {
        self.entries.get(package).map(Vec::as_slice)
    }

    pub fn contains(&self, package: &PackageName) -> bool {
        self.entries.contains_key(package)
    }

    /// Iterates entries sorted by package name
    pub fn iter(&self) -> impl Iterator<Item = (&PackageName, &[PackageName])> {
        self.entries.iter().map(|(k, v)| (k, v.as_slice()))
    }

    /// Packages in the order they were expanded
    pub fn visit_order(&self) -> &[PackageName] {
        &self.visit_order
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of expanded packages (keys)
    pub fn package_count(&self) -> usize {
        self.entries.len()
    }

    /// Number of recorded edges, including edges to filtered or unexpanded targets
    pub fn edge_count(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    /// Every package that appears in the graph, as a key or as an edge target
    pub fn referenced_packages(&self) -> BTreeSet<&PackageName> {
        self.entries
            .iter()
            .flat_map(|(k, v)| std::iter::once(k).chain(v.iter()))
            .collect()
    }
}

use crate::graph_exploration::domain::PackageName;
use crate::shared::Result;

/// DependencySource port for resolving a package's direct dependencies
///
/// This port abstracts where dependency information comes from: the PyPI
/// registry, a static fixture table, or a flat adjacency file. The graph
/// builder calls it once per expanded package, synchronously.
pub trait DependencySource {
    /// Resolves the direct dependencies of a package
    ///
    /// # Arguments
    /// * `package` - Name of the package to resolve
    ///
    /// # Returns
    /// Direct dependency names in source order, without duplicates.
    /// An empty list means the package has no dependencies (or, for a
    /// source with an exhausted request budget, that it was not explored).
    ///
    /// # Errors
    /// Returns an error if the source cannot answer for this package. The
    /// graph builder aborts the whole build on the first error.
    fn resolve(&self, package: &PackageName) -> Result<Vec<PackageName>>;

    /// Every package this source has an entry for, if it can enumerate them
    ///
    /// Local sources can; a registry cannot and returns `None`.
    fn known_packages(&self) -> Option<Vec<PackageName>> {
        None
    }

    /// Packages whose resolution was skipped and answered with an empty list
    fn degraded_packages(&self) -> Vec<PackageName> {
        Vec::new()
    }

    /// Short human-readable description used in progress output and reports
    fn describe(&self) -> String;
}

impl<S: DependencySource + ?Sized> DependencySource for &S {
    fn resolve(&self, package: &PackageName) -> Result<Vec<PackageName>> {
        (**self).resolve(package)
    }

    fn known_packages(&self) -> Option<Vec<PackageName>> {
        (**self).known_packages()
    }

    fn degraded_packages(&self) -> Vec<PackageName> {
        (**self).degraded_packages()
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

impl<S: DependencySource + ?Sized> DependencySource for Box<S> {
    fn resolve(&self, package: &PackageName) -> Result<Vec<PackageName>> {
        (**self).resolve(package)
    }

    fn known_packages(&self) -> Option<Vec<PackageName>> {
        (**self).known_packages()
    }

    fn degraded_packages(&self) -> Vec<PackageName> {
        (**self).degraded_packages()
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

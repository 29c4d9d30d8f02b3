use super::PackageName;

/// Advisory record of a dependency cycle observed during a build
///
/// `package` was reached again while its own expansion was still in progress.
/// `path` runs from the first expansion of `package` down to the edge that
/// closed the cycle, so it starts and ends with `package`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleWarning {
    package: PackageName,
    path: Vec<PackageName>,
}

impl CycleWarning {
    pub fn new(package: PackageName, path: Vec<PackageName>) -> Self {
        Self { package, path }
    }

    pub fn package(&self) -> &PackageName {
        &self.package
    }

    pub fn path(&self) -> &[PackageName] {
        &self.path
    }

    /// Renders the path as `J -> K -> J`
    pub fn describe(&self) -> String {
        self.path
            .iter()
            .map(PackageName::as_str)
            .collect::<Vec<_>>()
            .join(" -> ")
    }
}

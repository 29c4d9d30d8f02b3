use crate::graph_exploration::domain::PackageName;
use crate::ports::outbound::DependencySource;
use crate::shared::Result;
use std::collections::BTreeMap;

/// Built-in table used in test mode when no adjacency file is configured
const DEMO_TABLE: &[(&str, &[&str])] = &[
    ("requests", &["urllib3", "chardet", "certifi", "idna"]),
    ("numpy", &[]),
    ("django", &["asgiref", "sqlparse", "tzdata"]),
    ("flask", &["Werkzeug", "Jinja2", "itsdangerous", "click"]),
];

/// StaticDependencySource adapter backed by an in-memory adjacency table
///
/// Packages without an entry resolve to an empty list. The table can be
/// enumerated, so reverse queries over it cover every known package.
#[derive(Debug, Clone, Default)]
pub struct StaticDependencySource {
    table: BTreeMap<PackageName, Vec<PackageName>>,
    label: String,
}

impl StaticDependencySource {
    pub fn new(table: BTreeMap<PackageName, Vec<PackageName>>, label: impl Into<String>) -> Self {
        Self {
            table,
            label: label.into(),
        }
    }

    /// Builds a table from string pairs, validating every name
    pub fn from_pairs(rows: &[(&str, &[&str])], label: impl Into<String>) -> Result<Self> {
        let mut table = BTreeMap::new();
        for (package, dependencies) in rows {
            let dependencies = dependencies
                .iter()
                .map(|d| PackageName::new(*d))
                .collect::<Result<Vec<_>>>()?;
            table.insert(PackageName::new(*package)?, dependencies);
        }
        Ok(Self::new(table, label))
    }

    /// The built-in demo table (`requests`, `numpy`, `django`, `flask`)
    pub fn demo() -> Result<Self> {
        Self::from_pairs(DEMO_TABLE, "built-in demo table")
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl DependencySource for StaticDependencySource {
    fn resolve(&self, package: &PackageName) -> Result<Vec<PackageName>> {
        Ok(self.table.get(package).cloned().unwrap_or_default())
    }

    fn known_packages(&self) -> Option<Vec<PackageName>> {
        Some(self.table.keys().cloned().collect())
    }

    fn describe(&self) -> String {
        self.label.clone()
    }
}

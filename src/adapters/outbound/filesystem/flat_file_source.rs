use crate::adapters::outbound::fixtures::StaticDependencySource;
use crate::graph_exploration::domain::PackageName;
use crate::ports::outbound::DependencySource;
use crate::shared::error::VisualizerError;
use crate::shared::security::safe_read_to_string;
use crate::shared::Result;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// FlatFileDependencySource adapter for adjacency-list files
///
/// Each non-empty line has the form `NAME: DEP1, DEP2, ...`; nothing after the
/// colon means no dependencies. Lines starting with `#` are comments. The
/// whole file is parsed up front, so malformed content fails at construction
/// rather than in the middle of a build.
#[derive(Debug)]
pub struct FlatFileDependencySource {
    path: PathBuf,
    table: StaticDependencySource,
}

impl FlatFileDependencySource {
    /// Reads and parses the adjacency file
    ///
    /// # Errors
    /// - `FileUnreadable` if the file is missing, a symlink, not a regular
    ///   file, too large, or not valid UTF-8
    /// - `SourceUnavailable` if a line is malformed
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = safe_read_to_string(path, "dependency file")?;
        let table = Self::parse(&content, &path.display().to_string())?;
        tracing::debug!(path = %path.display(), packages = table.len(), "loaded adjacency file");

        Ok(Self {
            path: path.to_path_buf(),
            table,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parses adjacency-list content into a static table
    pub fn parse(content: &str, source_name: &str) -> Result<StaticDependencySource> {
        let malformed = |line_number: usize, details: String| VisualizerError::SourceUnavailable {
            source_name: source_name.to_string(),
            details: format!("line {}: {}", line_number, details),
        };

        let mut table: BTreeMap<PackageName, Vec<PackageName>> = BTreeMap::new();

        for (index, raw_line) in content.lines().enumerate() {
            let line_number = index + 1;
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let Some((name_part, deps_part)) = line.split_once(':') else {
                return Err(malformed(line_number, format!("expected 'NAME: DEPS', got '{}'", line)).into());
            };

            let package = PackageName::new(name_part.trim())
                .map_err(|e| malformed(line_number, e.to_string()))?;

            let mut dependencies: Vec<PackageName> = Vec::new();
            for token in deps_part.split(',').map(str::trim).filter(|t| !t.is_empty()) {
                let dependency =
                    PackageName::new(token).map_err(|e| malformed(line_number, e.to_string()))?;
                if !dependencies.contains(&dependency) {
                    dependencies.push(dependency);
                }
            }

            if table.contains_key(&package) {
                return Err(malformed(
                    line_number,
                    format!("package '{}' is defined more than once", package),
                )
                .into());
            }
            table.insert(package, dependencies);
        }

        Ok(StaticDependencySource::new(
            table,
            format!("adjacency file {}", source_name),
        ))
    }
}

impl DependencySource for FlatFileDependencySource {
    fn resolve(&self, package: &PackageName) -> Result<Vec<PackageName>> {
        self.table.resolve(package)
    }

    fn known_packages(&self) -> Option<Vec<PackageName>> {
        self.table.known_packages()
    }

    fn describe(&self) -> String {
        self.table.describe()
    }
}

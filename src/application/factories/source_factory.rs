use crate::adapters::outbound::filesystem::FlatFileDependencySource;
use crate::adapters::outbound::fixtures::StaticDependencySource;
use crate::adapters::outbound::network::{CachingDependencySource, PyPiDependencySource};
use crate::ports::outbound::DependencySource;
use crate::shared::Result;
use std::path::PathBuf;

/// Which dependency source to build
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceType {
    /// PyPI-compatible JSON API
    Registry {
        repository_url: String,
        include_optional: bool,
    },
    /// Built-in demo table
    Demo,
    /// Adjacency-list file
    FlatFile(PathBuf),
}

/// Factory for creating dependency sources
///
/// Every source is wrapped in [`CachingDependencySource`], so repeated lookups
/// within a run never reach the underlying source twice.
pub struct SourceFactory;

impl SourceFactory {
    /// Creates the source, optionally limited to `max_requests` underlying calls
    ///
    /// # Errors
    /// Returns an error if the registry URL is invalid, the HTTP client cannot
    /// be built, or the adjacency file cannot be read or parsed.
    pub fn create(
        source_type: SourceType,
        max_requests: Option<usize>,
    ) -> Result<Box<dyn DependencySource>> {
        let inner: Box<dyn DependencySource> = match source_type {
            SourceType::Registry {
                repository_url,
                include_optional,
            } => Box::new(PyPiDependencySource::new(&repository_url, include_optional)?),
            SourceType::Demo => Box::new(StaticDependencySource::demo()?),
            SourceType::FlatFile(path) => Box::new(FlatFileDependencySource::from_path(&path)?),
        };

        Ok(Box::new(
            CachingDependencySource::new(inner).with_max_requests(max_requests),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph_exploration::domain::PackageName;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_create_demo_source() {
        let source = SourceFactory::create(SourceType::Demo, None).unwrap();
        let deps = source.resolve(&PackageName::new("django").unwrap()).unwrap();
        assert_eq!(deps.len(), 3);
        assert_eq!(source.known_packages().unwrap().len(), 4);
    }

    #[test]
    fn test_create_flat_file_source() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("repo.txt");
        fs::write(&path, "A: B\nB:\n").unwrap();

        let source = SourceFactory::create(SourceType::FlatFile(path), Some(1)).unwrap();
        let a = PackageName::new("A").unwrap();
        let b = PackageName::new("B").unwrap();

        assert_eq!(source.resolve(&a).unwrap(), vec![b.clone()]);
        // Budget of one request is spent
        assert!(source.resolve(&b).unwrap().is_empty());
        assert_eq!(source.degraded_packages(), vec![b]);
    }

    #[test]
    fn test_create_registry_source_rejects_bad_url() {
        let result = SourceFactory::create(
            SourceType::Registry {
                repository_url: "not a url".to_string(),
                include_optional: true,
            },
            Some(10),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_create_registry_source() {
        let source = SourceFactory::create(
            SourceType::Registry {
                repository_url: "https://pypi.org/simple/".to_string(),
                include_optional: true,
            },
            Some(10),
        )
        .unwrap();
        assert_eq!(source.describe(), "registry https://pypi.org/pypi");
        assert!(source.known_packages().is_none());
    }

    #[test]
    fn test_create_flat_file_source_missing_file() {
        let result = SourceFactory::create(SourceType::FlatFile(PathBuf::from("/no/such/file")), None);
        assert!(result.is_err());
    }
}

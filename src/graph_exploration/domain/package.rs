use crate::shared::error::VisualizerError;
use crate::shared::Result;
use serde::Serialize;

/// Maximum length for package names (security limit)
pub const MAX_PACKAGE_NAME_LENGTH: usize = 255;

/// NewType wrapper for package name with validation
///
/// Names are opaque and case-sensitive: equality is exact string equality and
/// no normalization is applied. Ordering is byte-wise, which is the order used
/// for every sorted list the tool reports.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct PackageName(String);

impl PackageName {
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();

        if name.is_empty() {
            return Err(VisualizerError::config("Package name cannot be empty").into());
        }

        // Security: Length limit to prevent DoS
        if name.len() > MAX_PACKAGE_NAME_LENGTH {
            return Err(VisualizerError::config(format!(
                "Package name is too long ({} bytes). Maximum allowed: {} bytes",
                name.len(),
                MAX_PACKAGE_NAME_LENGTH
            ))
            .into());
        }

        // Whitespace, ':' and ',' are separators in adjacency files and config lists
        if let Some(bad) = name
            .chars()
            .find(|c| c.is_whitespace() || *c == ':' || *c == ',')
        {
            return Err(VisualizerError::config(format!(
                "Package name '{}' contains the separator character {:?}",
                name, bad
            ))
            .into());
        }

        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PackageName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for PackageName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

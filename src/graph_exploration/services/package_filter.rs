use crate::shared::error::VisualizerError;
use crate::shared::Result;
use std::cell::Cell;

/// Maximum length of the filter substring to prevent DoS attacks
const MAX_FILTER_LENGTH: usize = 255;

/// PackageFilter - Excludes packages whose name contains a substring
///
/// Matching is literal substring containment: no wildcards, no case folding,
/// no normalization. An empty substring disables filtering. The same filter
/// is used while building the graph and while rendering it.
#[derive(Debug, Default)]
pub struct PackageFilter {
    substring: String,
    matched: Cell<bool>,
}

impl PackageFilter {
    /// Creates a new PackageFilter from the configured substring
    ///
    /// # Errors
    /// Returns `ConfigInvalid` if the substring exceeds the length limit
    pub fn new(substring: impl Into<String>) -> Result<Self> {
        let substring = substring.into();

        if substring.len() > MAX_FILTER_LENGTH {
            return Err(VisualizerError::config(format!(
                "Filter substring is too long ({} chars). Maximum: {} chars",
                substring.len(),
                MAX_FILTER_LENGTH
            ))
            .into());
        }

        Ok(Self {
            substring,
            matched: Cell::new(false),
        })
    }

    /// A filter that excludes nothing
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Returns true iff the package must be excluded
    pub fn matches(&self, package_name: &str) -> bool {
        let is_match = self.is_active() && package_name.contains(self.substring.as_str());
        if is_match {
            self.matched.set(true);
        }
        is_match
    }

    pub fn is_active(&self) -> bool {
        !self.substring.is_empty()
    }

    pub fn substring(&self) -> &str {
        &self.substring
    }

    /// Whether any call to [`Self::matches`] has excluded a package so far
    pub fn was_matched(&self) -> bool {
        self.matched.get()
    }
}

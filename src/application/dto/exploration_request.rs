use crate::graph_exploration::domain::PackageName;

/// ExplorationRequest - Internal request DTO for the exploration use case
#[derive(Debug, Clone)]
pub struct ExplorationRequest {
    /// Package the traversal starts from
    pub root: PackageName,
    /// Maximum number of edges from the root that will be expanded
    pub max_depth: usize,
    /// Substring excluding matching packages; empty disables filtering
    pub filter_substring: String,
    /// Whether to compute reverse dependents of the root
    pub show_reverse: bool,
}

impl ExplorationRequest {
    pub fn new(
        root: PackageName,
        max_depth: usize,
        filter_substring: String,
        show_reverse: bool,
    ) -> Self {
        Self {
            root,
            max_depth,
            filter_substring,
            show_reverse,
        }
    }
}

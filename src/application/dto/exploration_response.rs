use crate::graph_exploration::domain::{CycleWarning, ForwardGraph, PackageName};
use serde::Serialize;

/// Which graph the reverse index was derived from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReverseScope {
    /// Every package the source can enumerate was expanded
    AllKnownPackages,
    /// Only the graph explored from the root
    ExploredGraph,
}

impl std::fmt::Display for ReverseScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReverseScope::AllKnownPackages => write!(f, "all known packages"),
            ReverseScope::ExploredGraph => write!(f, "explored graph"),
        }
    }
}

/// Reverse dependency query results for one target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReverseDependencies {
    pub target: PackageName,
    /// Packages listing `target` directly, sorted
    pub direct: Vec<PackageName>,
    /// Every package from which `target` is reachable, sorted
    pub transitive: Vec<PackageName>,
    pub scope: ReverseScope,
    /// Packages the reverse search answered with an empty list because the
    /// request budget ran out; the lists above may be incomplete
    pub under_explored: Vec<PackageName>,
}

/// ExplorationResponse - Internal response DTO from the exploration use case
///
/// Carries the domain results; formatters work from the read model built
/// out of it rather than from this struct directly.
#[derive(Debug, Clone)]
pub struct ExplorationResponse {
    pub root: PackageName,
    pub max_depth: usize,
    pub filter_substring: String,
    /// Forward graph explored from the root
    pub forward_graph: ForwardGraph,
    /// Cycles observed while exploring from the root
    pub cycles: Vec<CycleWarning>,
    /// Packages of the forward graph answered with an empty list because the
    /// request budget ran out
    pub under_explored: Vec<PackageName>,
    /// Present only when reverse reporting was requested
    pub reverse: Option<ReverseDependencies>,
    pub source_description: String,
}

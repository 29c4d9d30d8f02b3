//! Report read model for query operations
//!
//! This module provides the main read model struct that aggregates
//! all exploration data in a presentation-ready format.

use super::tree_view::TreeLine;
use serde::Serialize;
use std::collections::BTreeMap;

/// Main read model for an exploration report
///
/// Plain strings and numbers only, so every formatter (including the JSON
/// one, which serializes it directly) sees the same data.
#[derive(Debug, Clone, Serialize)]
pub struct ReportReadModel {
    pub metadata: ReportMetadataView,
    pub settings: SettingsView,
    /// Tree lines in display order; empty when the root was filtered out
    pub tree: Vec<TreeLine>,
    pub statistics: StatisticsView,
    /// Rendered cycle paths, e.g. `J -> K -> J`
    pub cycles: Vec<String>,
    /// Packages not explored because the request budget ran out
    pub under_explored: Vec<String>,
    /// Forward adjacency, keys sorted
    pub dependencies: BTreeMap<String, Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reverse: Option<ReverseView>,
}

/// View representation of report metadata
#[derive(Debug, Clone, Serialize)]
pub struct ReportMetadataView {
    /// RFC 3339 timestamp of report creation
    pub timestamp: String,
    pub tool_name: String,
    pub tool_version: String,
    /// Unique identifier of this run
    pub run_id: String,
}

/// Echo of the settings the exploration ran with
#[derive(Debug, Clone, Serialize)]
pub struct SettingsView {
    pub root: String,
    pub max_depth: usize,
    /// `None` when filtering was disabled
    pub filter: Option<String>,
    pub source: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatisticsView {
    /// Packages with an entry in the forward graph
    pub package_count: usize,
    /// Sum of all dependency list lengths
    pub edge_count: usize,
    pub cycle_count: usize,
    pub under_explored_count: usize,
}

/// Reverse dependency lists for the root package
#[derive(Debug, Clone, Serialize)]
pub struct ReverseView {
    pub target: String,
    pub direct: Vec<String>,
    pub transitive: Vec<String>,
    /// Human-readable description of the graph the lists were computed over
    pub scope: String,
    /// Packages left unresolved during the reverse search
    pub under_explored: Vec<String>,
}

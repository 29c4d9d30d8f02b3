//! Builder for constructing ReportReadModel from an exploration response
//!
//! This module provides the builder that transforms domain results into
//! the presentation-ready read model, including the tree layout.

use super::report_read_model::{
    ReportMetadataView, ReportReadModel, ReverseView, SettingsView, StatisticsView,
};
use super::tree_view::{TreeLine, TreeMarker};
use crate::application::dto::ExplorationResponse;
use crate::graph_exploration::domain::{ForwardGraph, PackageName};
use crate::graph_exploration::services::PackageFilter;
use crate::shared::Result;
use std::collections::HashSet;

/// Tree walk frame; `Exit` pops a package off the current branch
enum Step {
    Enter {
        name: PackageName,
        depth: usize,
        is_last: bool,
        guides: Vec<bool>,
    },
    Exit(PackageName),
}

/// Builder for constructing ReportReadModel from an ExplorationResponse
pub struct ReportReadModelBuilder;

impl ReportReadModelBuilder {
    /// Builds a read model stamped with the current time and a fresh run id
    ///
    /// # Errors
    /// Returns an error if the response carries an invalid filter substring
    pub fn build(response: &ExplorationResponse) -> Result<ReportReadModel> {
        Self::build_with_metadata(response, Self::current_metadata())
    }

    /// Builds a read model with caller-supplied metadata
    pub fn build_with_metadata(
        response: &ExplorationResponse,
        metadata: ReportMetadataView,
    ) -> Result<ReportReadModel> {
        let filter = PackageFilter::new(response.filter_substring.as_str())?;

        Ok(ReportReadModel {
            metadata,
            settings: Self::build_settings(response),
            tree: Self::build_tree(response, &filter),
            statistics: Self::build_statistics(response),
            cycles: response.cycles.iter().map(|c| c.describe()).collect(),
            under_explored: response
                .under_explored
                .iter()
                .map(PackageName::to_string)
                .collect(),
            dependencies: Self::build_dependencies(&response.forward_graph),
            reverse: response.reverse.as_ref().map(|reverse| ReverseView {
                target: reverse.target.to_string(),
                direct: reverse.direct.iter().map(PackageName::to_string).collect(),
                transitive: reverse
                    .transitive
                    .iter()
                    .map(PackageName::to_string)
                    .collect(),
                scope: reverse.scope.to_string(),
                under_explored: reverse
                    .under_explored
                    .iter()
                    .map(PackageName::to_string)
                    .collect(),
            }),
        })
    }

    fn current_metadata() -> ReportMetadataView {
        ReportMetadataView {
            timestamp: chrono::Utc::now().to_rfc3339(),
            tool_name: env!("CARGO_PKG_NAME").to_string(),
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
            run_id: uuid::Uuid::new_v4().to_string(),
        }
    }

    fn build_settings(response: &ExplorationResponse) -> SettingsView {
        SettingsView {
            root: response.root.to_string(),
            max_depth: response.max_depth,
            filter: (!response.filter_substring.is_empty())
                .then(|| response.filter_substring.clone()),
            source: response.source_description.clone(),
        }
    }

    fn build_statistics(response: &ExplorationResponse) -> StatisticsView {
        StatisticsView {
            package_count: response.forward_graph.package_count(),
            edge_count: response.forward_graph.edge_count(),
            cycle_count: response.cycles.len(),
            under_explored_count: response.under_explored.len(),
        }
    }

    fn build_dependencies(
        graph: &ForwardGraph,
    ) -> std::collections::BTreeMap<String, Vec<String>> {
        graph
            .iter()
            .map(|(package, deps)| {
                (
                    package.to_string(),
                    deps.iter().map(PackageName::to_string).collect(),
                )
            })
            .collect()
    }

    /// Lays out the forward graph as a tree rooted at the response's root
    ///
    /// Filtered children are omitted. Children of a package at `max_depth` are
    /// listed but not expanded. A package is expanded at most once; later
    /// occurrences are marked instead, so the walk terminates on cycles.
    fn build_tree(response: &ExplorationResponse, filter: &PackageFilter) -> Vec<TreeLine> {
        let graph = &response.forward_graph;
        if filter.matches(response.root.as_str()) {
            return Vec::new();
        }

        let degraded: HashSet<&PackageName> = response.under_explored.iter().collect();
        let mut expanded: HashSet<PackageName> = HashSet::new();
        let mut on_branch: HashSet<PackageName> = HashSet::new();
        let mut lines = Vec::new();

        let mut stack = vec![Step::Enter {
            name: response.root.clone(),
            depth: 0,
            is_last: true,
            guides: Vec::new(),
        }];

        while let Some(step) = stack.pop() {
            let (name, depth, is_last, guides) = match step {
                Step::Exit(name) => {
                    on_branch.remove(&name);
                    continue;
                }
                Step::Enter {
                    name,
                    depth,
                    is_last,
                    guides,
                } => (name, depth, is_last, guides),
            };

            let has_children = graph
                .dependencies_of(&name)
                .is_some_and(|deps| !deps.is_empty());
            let marker = if on_branch.contains(&name) {
                Some(TreeMarker::Cycle)
            } else if degraded.contains(&name) {
                Some(TreeMarker::UnderExplored)
            } else if expanded.contains(&name) && has_children {
                Some(TreeMarker::Repeated)
            } else {
                None
            };

            lines.push(TreeLine {
                name: name.to_string(),
                depth,
                is_last,
                guides: guides.clone(),
                marker,
            });

            if marker.is_some() || depth > response.max_depth {
                continue;
            }
            let Some(dependencies) = graph.dependencies_of(&name) else {
                continue;
            };
            expanded.insert(name.clone());

            let visible: Vec<&PackageName> = dependencies
                .iter()
                .filter(|dep| !filter.matches(dep.as_str()))
                .collect();
            if visible.is_empty() {
                continue;
            }

            let child_guides = if depth == 0 {
                Vec::new()
            } else {
                let mut g = guides;
                g.push(!is_last);
                g
            };

            on_branch.insert(name.clone());
            stack.push(Step::Exit(name));
            let last_index = visible.len() - 1;
            for (index, child) in visible.into_iter().enumerate().rev() {
                stack.push(Step::Enter {
                    name: child.clone(),
                    depth: depth + 1,
                    is_last: index == last_index,
                    guides: child_guides.clone(),
                });
            }
        }

        lines
    }
}

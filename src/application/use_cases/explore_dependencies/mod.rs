use crate::application::dto::{
    ExplorationRequest, ExplorationResponse, ReverseDependencies, ReverseScope,
};
use crate::graph_exploration::domain::{ForwardGraph, PackageName};
use crate::graph_exploration::services::{GraphBuilder, PackageFilter, ReverseIndex};
use crate::ports::outbound::{DependencySource, ProgressReporter};
use crate::shared::Result;
use std::cell::Cell;

/// Source decorator that reports every resolution to the progress reporter
struct ReportingSource<'a, S, PR> {
    inner: &'a S,
    reporter: &'a PR,
    resolved: Cell<usize>,
}

impl<S: DependencySource, PR: ProgressReporter> DependencySource for ReportingSource<'_, S, PR> {
    fn resolve(&self, package: &PackageName) -> Result<Vec<PackageName>> {
        let dependencies = self.inner.resolve(package)?;
        let resolved = self.resolved.get() + 1;
        self.resolved.set(resolved);
        self.reporter.report_activity(resolved, package.as_str());
        Ok(dependencies)
    }

    fn known_packages(&self) -> Option<Vec<PackageName>> {
        self.inner.known_packages()
    }

    fn degraded_packages(&self) -> Vec<PackageName> {
        self.inner.degraded_packages()
    }

    fn describe(&self) -> String {
        self.inner.describe()
    }
}

/// ExploreDependenciesUseCase - Core use case for dependency exploration
///
/// This use case orchestrates the exploration workflow using generic
/// dependency injection for all infrastructure dependencies.
///
/// # Type Parameters
/// * `S` - DependencySource implementation
/// * `PR` - ProgressReporter implementation
pub struct ExploreDependenciesUseCase<S, PR> {
    source: S,
    progress_reporter: PR,
}

impl<S, PR> ExploreDependenciesUseCase<S, PR>
where
    S: DependencySource,
    PR: ProgressReporter,
{
    /// Creates a new ExploreDependenciesUseCase with injected dependencies
    pub fn new(source: S, progress_reporter: PR) -> Self {
        Self {
            source,
            progress_reporter,
        }
    }

    /// Executes the exploration use case
    ///
    /// # Arguments
    /// * `request` - Root package, depth limit, filter, and reverse flag
    ///
    /// # Returns
    /// ExplorationResponse with the forward graph, cycle warnings,
    /// under-explored packages and, if requested, reverse dependents
    ///
    /// # Errors
    /// Returns `ConfigInvalid` for an invalid filter and `ResolutionFailed`
    /// if the source fails for any package.
    pub fn execute(&self, request: ExplorationRequest) -> Result<ExplorationResponse> {
        let filter = PackageFilter::new(request.filter_substring.as_str())?;
        let builder = GraphBuilder::new(request.max_depth, &filter);
        let source = ReportingSource {
            inner: &self.source,
            reporter: &self.progress_reporter,
            resolved: Cell::new(0),
        };

        // Step 1: Explore from the root
        self.progress_reporter.report(&format!(
            "🔍 Exploring dependencies of '{}' (max depth {}) using {}",
            request.root,
            request.max_depth,
            self.source.describe()
        ));
        let outcome = builder.build(&request.root, &source)?;
        tracing::info!(
            root = %request.root,
            packages = outcome.graph().package_count(),
            resolutions = outcome.resolutions(),
            "exploration finished"
        );
        let (forward_graph, cycles) = outcome.into_parts();

        self.progress_reporter.report_completion(&format!(
            "✅ Explored {} package(s) with {} dependency edge(s)",
            forward_graph.package_count(),
            forward_graph.edge_count()
        ));

        for cycle in &cycles {
            self.progress_reporter.report_error(&format!(
                "⚠️  Warning: Dependency cycle detected: {}",
                cycle.describe()
            ));
        }

        // Snapshot forward-only state before the reverse search touches the source
        let under_explored = self.source.degraded_packages();
        let filter_matched = filter.was_matched();

        if !under_explored.is_empty() {
            self.progress_reporter.report_error(&format!(
                "⚠️  Warning: Request limit reached; {} package(s) were not explored",
                under_explored.len()
            ));
        }
        if filter.is_active() && !filter_matched {
            self.progress_reporter.report_error(&format!(
                "⚠️  Warning: Filter '{}' did not match any package",
                filter.substring()
            ));
        }

        // Step 2: Reverse dependents if requested
        let reverse = if request.show_reverse {
            Some(self.find_reverse_dependents(
                &request.root,
                &builder,
                &source,
                &forward_graph,
                &under_explored,
            )?)
        } else {
            None
        };

        Ok(ExplorationResponse {
            root: request.root,
            max_depth: request.max_depth,
            filter_substring: request.filter_substring,
            forward_graph,
            cycles,
            under_explored,
            reverse,
            source_description: self.source.describe(),
        })
    }

    /// Computes direct and transitive reverse dependents of `target`
    ///
    /// Sources that can enumerate their packages get a universe graph built
    /// from all of them; otherwise the explored forward graph is used.
    fn find_reverse_dependents(
        &self,
        target: &PackageName,
        builder: &GraphBuilder<'_>,
        source: &ReportingSource<'_, S, PR>,
        explored: &ForwardGraph,
        forward_degraded: &[PackageName],
    ) -> Result<ReverseDependencies> {
        let (reverse_graph, scope) = match source.known_packages() {
            Some(mut known) => {
                known.sort();
                self.progress_reporter.report(&format!(
                    "🔁 Indexing reverse dependencies across {} known package(s)...",
                    known.len()
                ));
                let universe = builder.build_from_roots(&known, source)?;
                (
                    ReverseIndex::build_reverse(universe.graph()),
                    ReverseScope::AllKnownPackages,
                )
            }
            None => (
                ReverseIndex::build_reverse(explored),
                ReverseScope::ExploredGraph,
            ),
        };

        let under_explored: Vec<PackageName> = source
            .degraded_packages()
            .into_iter()
            .filter(|package| !forward_degraded.contains(package))
            .collect();
        if !under_explored.is_empty() {
            self.progress_reporter.report_error(&format!(
                "⚠️  Warning: Request limit reached during the reverse search; {} package(s) were not explored and the reverse lists may be incomplete",
                under_explored.len()
            ));
        }

        let direct = ReverseIndex::direct_dependents(target, &reverse_graph);
        let transitive = ReverseIndex::reverse_dependents(target, &reverse_graph);
        tracing::debug!(
            target = %target,
            direct = direct.len(),
            transitive = transitive.len(),
            ?scope,
            "reverse dependents computed"
        );

        Ok(ReverseDependencies {
            target: target.clone(),
            direct,
            transitive,
            scope,
            under_explored,
        })
    }
}

use crate::graph_exploration::domain::{CycleWarning, ForwardGraph, PackageName};
use crate::graph_exploration::services::PackageFilter;
use crate::ports::outbound::DependencySource;
use crate::shared::error::VisualizerError;
use crate::shared::Result;
use std::collections::HashSet;

/// Result of one graph build
#[derive(Debug, Clone, Default)]
pub struct BuildOutcome {
    graph: ForwardGraph,
    cycles: Vec<CycleWarning>,
    resolutions: usize,
}

impl BuildOutcome {
    pub fn graph(&self) -> &ForwardGraph {
        &self.graph
    }

    pub fn into_graph(self) -> ForwardGraph {
        self.graph
    }

    /// Cycle warnings in the order they were observed, at most one per package
    pub fn cycles(&self) -> &[CycleWarning] {
        &self.cycles
    }

    /// Number of `resolve` calls issued to the dependency source
    pub fn resolutions(&self) -> usize {
        self.resolutions
    }

    pub fn into_parts(self) -> (ForwardGraph, Vec<CycleWarning>) {
        (self.graph, self.cycles)
    }
}

/// Explicit-stack frame
///
/// `Exit` sits beneath a package's children and is popped once all of them
/// are done, which ends that package's expansion.
enum Frame {
    Enter { package: PackageName, depth: usize },
    Exit,
}

/// GraphBuilder service for depth-bounded dependency graph construction
///
/// Runs an iterative depth-first traversal with an explicit stack, so deep or
/// cyclic inputs never touch the call stack. All traversal state (visited set,
/// current path, graph under construction) lives inside one `build` call.
pub struct GraphBuilder<'f> {
    max_depth: usize,
    filter: &'f PackageFilter,
}

impl<'f> GraphBuilder<'f> {
    pub fn new(max_depth: usize, filter: &'f PackageFilter) -> Self {
        Self { max_depth, filter }
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Builds the forward graph reachable from `root`
    ///
    /// # Errors
    /// Returns `ResolutionFailed` naming the package whose resolution failed.
    /// No partial graph is returned.
    pub fn build<S>(&self, root: &PackageName, source: &S) -> Result<BuildOutcome>
    where
        S: DependencySource + ?Sized,
    {
        self.build_from_roots(std::slice::from_ref(root), source)
    }

    /// Builds one forward graph from several roots sharing a single visited set
    ///
    /// Every root starts at depth 0; the first root is expanded first.
    pub fn build_from_roots<S>(&self, roots: &[PackageName], source: &S) -> Result<BuildOutcome>
    where
        S: DependencySource + ?Sized,
    {
        let mut graph = ForwardGraph::new();
        let mut cycles = Vec::new();
        let mut resolutions = 0usize;

        let mut visited: HashSet<PackageName> = HashSet::new();
        let mut reported: HashSet<PackageName> = HashSet::new();
        // Packages whose expansion is in progress, outermost first
        let mut path: Vec<PackageName> = Vec::new();
        let mut on_path: HashSet<PackageName> = HashSet::new();

        let mut stack: Vec<Frame> = roots
            .iter()
            .rev()
            .map(|root| Frame::Enter {
                package: root.clone(),
                depth: 0,
            })
            .collect();

        while let Some(frame) = stack.pop() {
            let (package, depth) = match frame {
                Frame::Exit => {
                    if let Some(done) = path.pop() {
                        on_path.remove(&done);
                    }
                    continue;
                }
                Frame::Enter { package, depth } => (package, depth),
            };

            if depth > self.max_depth {
                tracing::trace!(package = %package, depth, "beyond max depth, not expanded");
                continue;
            }

            if visited.contains(&package) {
                // on_path mirrors path, so a package found in one is in the other
                if !on_path.contains(&package) || reported.contains(&package) {
                    continue;
                }
                if let Some(start) = path.iter().position(|p| p == &package) {
                    let mut cycle_path = path[start..].to_vec();
                    cycle_path.push(package.clone());
                    reported.insert(package.clone());
                    let warning = CycleWarning::new(package, cycle_path);
                    tracing::debug!(cycle = %warning.describe(), "dependency cycle detected");
                    cycles.push(warning);
                }
                continue;
            }
            visited.insert(package.clone());

            if self.filter.matches(package.as_str()) {
                tracing::debug!(package = %package, "excluded by filter");
                continue;
            }

            let dependencies =
                source
                    .resolve(&package)
                    .map_err(|e| VisualizerError::ResolutionFailed {
                        package: package.to_string(),
                        details: format!("{:#}", e),
                    })?;
            resolutions += 1;
            tracing::debug!(
                package = %package,
                depth,
                dependencies = dependencies.len(),
                "resolved"
            );

            stack.push(Frame::Exit);
            path.push(package.clone());
            on_path.insert(package.clone());

            // Reverse push so the first dependency is popped first
            for dependency in dependencies.iter().rev() {
                stack.push(Frame::Enter {
                    package: dependency.clone(),
                    depth: depth + 1,
                });
            }

            graph.insert(package, dependencies);
        }

        Ok(BuildOutcome {
            graph,
            cycles,
            resolutions,
        })
    }
}

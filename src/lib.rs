//! dep-visualizer - dependency graph explorer
//!
//! This library explores a package's transitive dependencies up to a depth
//! limit, detects cycles, filters packages by name and answers reverse
//! dependency queries, following hexagonal architecture and Domain-Driven
//! Design principles.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`graph_exploration`): Graph models, traversal and reverse index
//! - **Application Layer** (`application`): Use cases, read models and factories
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Registry client, local sources, formatters and presenters
//! - **Config** (`config`): `dep-visualizer.toml` loading and settings merge
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use dep_visualizer::prelude::*;
//!
//! # fn main() -> Result<()> {
//! let source = StaticDependencySource::demo()?;
//! let progress_reporter = StderrProgressReporter::new();
//! let use_case = ExploreDependenciesUseCase::new(source, progress_reporter);
//!
//! let request = ExplorationRequest::new(PackageName::new("requests")?, 3, String::new(), true);
//! let response = use_case.execute(request)?;
//!
//! let model = ReportReadModelBuilder::build(&response)?;
//! let output = TextTreeFormatter::new(TreeStyle::Unicode).format(&model)?;
//! println!("{}", output);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod config;
pub mod graph_exploration;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{
        FileSystemWriter, FlatFileDependencySource, StdoutPresenter,
    };
    pub use crate::adapters::outbound::fixtures::StaticDependencySource;
    pub use crate::adapters::outbound::formatters::{
        JsonFormatter, MarkdownFormatter, TextTreeFormatter, TreeStyle,
    };
    pub use crate::adapters::outbound::network::{CachingDependencySource, PyPiDependencySource};
    pub use crate::application::dto::{
        ExplorationRequest, ExplorationResponse, OutputFormat, ReverseDependencies, ReverseScope,
    };
    pub use crate::application::read_models::{ReportReadModel, ReportReadModelBuilder};
    pub use crate::application::use_cases::ExploreDependenciesUseCase;
    pub use crate::graph_exploration::domain::{CycleWarning, ForwardGraph, PackageName, ReverseGraph};
    pub use crate::graph_exploration::services::{GraphBuilder, PackageFilter, ReverseIndex};
    pub use crate::ports::outbound::{
        DependencySource, OutputPresenter, ProgressReporter, ReportFormatter,
    };
    pub use crate::shared::Result;
}

mod graph_builder;
mod package_filter;
mod reverse_index;

pub use graph_builder::{BuildOutcome, GraphBuilder};
pub use package_filter::PackageFilter;
pub use reverse_index::ReverseIndex;

pub mod cycle_warning;
pub mod forward_graph;
pub mod package;
pub mod reverse_graph;

pub use cycle_warning::CycleWarning;
pub use forward_graph::ForwardGraph;
pub use package::PackageName;
pub use reverse_graph::ReverseGraph;

/// Filesystem adapters for file I/O operations
mod file_writer;
mod flat_file_source;

pub use file_writer::{FileSystemWriter, StdoutPresenter};
pub use flat_file_source::FlatFileDependencySource;

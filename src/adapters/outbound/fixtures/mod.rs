/// In-memory dependency tables
mod static_source;

pub use static_source::StaticDependencySource;

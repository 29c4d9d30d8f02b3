/// Network adapters for external API calls
mod caching_source;
mod pypi_client;

pub use caching_source::CachingDependencySource;
pub use pypi_client::{PyPiDependencySource, DEFAULT_REPOSITORY_URL};

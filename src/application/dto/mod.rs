/// Data Transfer Objects for application layer
///
/// DTOs are used to transfer data between the application layer
/// and adapters, keeping the domain layer isolated.
mod exploration_request;
mod exploration_response;
mod output_format;

pub use exploration_request::ExplorationRequest;
pub use exploration_response::{ExplorationResponse, ReverseDependencies, ReverseScope};
pub use output_format::OutputFormat;

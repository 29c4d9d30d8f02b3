/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (registry, file system, console, etc.).
pub mod dependency_source;
pub mod output_presenter;
pub mod progress_reporter;
pub mod report_formatter;

pub use dependency_source::DependencySource;
pub use output_presenter::OutputPresenter;
pub use progress_reporter::ProgressReporter;
pub use report_formatter::ReportFormatter;

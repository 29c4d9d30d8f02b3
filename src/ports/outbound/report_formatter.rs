use crate::application::read_models::ReportReadModel;
use crate::shared::Result;

/// ReportFormatter port for rendering an exploration report
///
/// This port abstracts the formatting logic for the supported output
/// formats (indented text tree, Markdown, JSON).
pub trait ReportFormatter {
    /// Formats the report using the read model
    ///
    /// # Errors
    /// Returns an error if formatting or serialization fails
    fn format(&self, model: &ReportReadModel) -> Result<String>;
}

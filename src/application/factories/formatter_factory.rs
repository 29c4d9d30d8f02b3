use crate::adapters::outbound::formatters::{
    JsonFormatter, MarkdownFormatter, TextTreeFormatter, TreeStyle,
};
use crate::application::dto::OutputFormat;
use crate::ports::outbound::ReportFormatter;

/// Factory for creating report formatters
///
/// This factory encapsulates the creation logic for different formatter implementations,
/// following the Factory Pattern. It belongs in the application layer as it orchestrates
/// the selection of infrastructure adapters based on application needs.
pub struct FormatterFactory;

impl FormatterFactory {
    /// Creates a formatter instance for the specified output format
    ///
    /// `tree_style` only affects the text format.
    ///
    /// # Examples
    /// ```
    /// use dep_visualizer::adapters::outbound::formatters::TreeStyle;
    /// use dep_visualizer::application::dto::OutputFormat;
    /// use dep_visualizer::application::factories::FormatterFactory;
    ///
    /// let formatter = FormatterFactory::create(OutputFormat::Text, TreeStyle::Ascii);
    /// ```
    pub fn create(format: OutputFormat, tree_style: TreeStyle) -> Box<dyn ReportFormatter> {
        match format {
            OutputFormat::Text => Box::new(TextTreeFormatter::new(tree_style)),
            OutputFormat::Markdown => Box::new(MarkdownFormatter::new()),
            OutputFormat::Json => Box::new(JsonFormatter::new()),
        }
    }

    /// Returns the progress message for the specified output format
    ///
    /// # Examples
    /// ```
    /// use dep_visualizer::application::dto::OutputFormat;
    /// use dep_visualizer::application::factories::FormatterFactory;
    ///
    /// let message = FormatterFactory::progress_message(OutputFormat::Json);
    /// assert_eq!(message, "📝 Generating JSON output...");
    /// ```
    pub fn progress_message(format: OutputFormat) -> &'static str {
        match format {
            OutputFormat::Text => "📝 Generating dependency tree...",
            OutputFormat::Markdown => "📝 Generating Markdown output...",
            OutputFormat::Json => "📝 Generating JSON output...",
        }
    }
}

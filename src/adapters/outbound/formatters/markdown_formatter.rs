use crate::application::read_models::{ReportReadModel, ReverseView};
use crate::ports::outbound::ReportFormatter;
use crate::shared::Result;

/// Markdown table header for the settings echo
const SETTINGS_TABLE_HEADER: &str = "| Setting | Value |\n|---------|-------|\n";

/// Markdown table header for statistics
const STATS_TABLE_HEADER: &str = "| Metric | Count |\n|--------|-------|\n";

/// MarkdownFormatter adapter for generating a Markdown dependency report
///
/// This adapter implements the ReportFormatter port for Markdown format. The
/// tree is rendered as a nested bullet list; package names are code spans.
pub struct MarkdownFormatter;

impl MarkdownFormatter {
    pub fn new() -> Self {
        Self
    }

    /// Escapes pipe characters and newlines for safe Markdown table rendering
    fn escape_markdown_table_cell(text: &str) -> String {
        text.replace('|', "\\|").replace('\n', " ")
    }

    fn render_numbered_list(output: &mut String, items: &[String]) {
        if items.is_empty() {
            output.push_str("*None*\n\n");
            return;
        }
        for (index, item) in items.iter().enumerate() {
            output.push_str(&format!("{}. `{}`\n", index + 1, item));
        }
        output.push('\n');
    }
}

/// Helper methods for rendering sections
impl MarkdownFormatter {
    fn render_header(&self, output: &mut String, model: &ReportReadModel) {
        let settings = &model.settings;
        output.push_str(&format!("# Dependency Report: `{}`\n\n", settings.root));
        output.push_str(SETTINGS_TABLE_HEADER);
        output.push_str(&format!("| Root package | `{}` |\n", settings.root));
        output.push_str(&format!("| Max depth | {} |\n", settings.max_depth));
        match &settings.filter {
            Some(filter) => output.push_str(&format!(
                "| Filter | `{}` |\n",
                Self::escape_markdown_table_cell(filter)
            )),
            None => output.push_str("| Filter | *(none)* |\n"),
        }
        output.push_str(&format!(
            "| Source | {} |\n",
            Self::escape_markdown_table_cell(&settings.source)
        ));
        output.push_str(&format!(
            "| Generated | {} ({} {}) |\n\n",
            model.metadata.timestamp, model.metadata.tool_name, model.metadata.tool_version
        ));
    }

    fn render_tree(&self, output: &mut String, model: &ReportReadModel) {
        output.push_str("## Dependency Tree\n\n");
        if model.tree.is_empty() {
            output.push_str("*The root package was excluded by the filter.*\n\n");
            return;
        }
        for line in &model.tree {
            output.push_str(&"  ".repeat(line.depth));
            output.push_str(&format!("- `{}`", line.name));
            if let Some(marker) = line.marker {
                output.push_str(&format!(" *{}*", marker.label()));
            }
            output.push('\n');
        }
        output.push('\n');
    }

    fn render_warnings(&self, output: &mut String, model: &ReportReadModel) {
        if !model.cycles.is_empty() {
            output.push_str("## Cycles\n\n");
            Self::render_numbered_list(output, &model.cycles);
        }
        if !model.under_explored.is_empty() {
            output.push_str("## Not Explored\n\n");
            output.push_str("These packages were not resolved because the request limit was reached.\n\n");
            Self::render_numbered_list(output, &model.under_explored);
        }
    }

    fn render_reverse(&self, output: &mut String, reverse: &ReverseView) {
        output.push_str(&format!("## Reverse Dependencies of `{}`\n\n", reverse.target));
        output.push_str(&format!("Searched: {}.\n\n", reverse.scope));
        output.push_str("### Direct\n\n");
        Self::render_numbered_list(output, &reverse.direct);
        output.push_str("### Transitive\n\n");
        Self::render_numbered_list(output, &reverse.transitive);
        if !reverse.under_explored.is_empty() {
            output.push_str("### Not Explored\n\n");
            output.push_str("The request limit was reached during the reverse search; the lists above may be incomplete.\n\n");
            Self::render_numbered_list(output, &reverse.under_explored);
        }
    }

    fn render_statistics(&self, output: &mut String, model: &ReportReadModel) {
        let stats = &model.statistics;
        output.push_str("## Statistics\n\n");
        output.push_str(STATS_TABLE_HEADER);
        output.push_str(&format!("| Packages | {} |\n", stats.package_count));
        output.push_str(&format!("| Dependency edges | {} |\n", stats.edge_count));
        output.push_str(&format!("| Cycles | {} |\n", stats.cycle_count));
        output.push_str(&format!("| Not explored | {} |\n", stats.under_explored_count));
    }
}

impl Default for MarkdownFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for MarkdownFormatter {
    fn format(&self, model: &ReportReadModel) -> Result<String> {
        let mut output = String::new();

        self.render_header(&mut output, model);
        self.render_tree(&mut output, model);
        self.render_warnings(&mut output, model);

        if let Some(reverse) = &model.reverse {
            self.render_reverse(&mut output, reverse);
        }

        self.render_statistics(&mut output, model);

        Ok(output)
    }
}

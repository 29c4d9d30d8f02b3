use crate::application::read_models::{ReportReadModel, TreeLine};
use crate::ports::outbound::ReportFormatter;
use crate::shared::Result;

/// Connector set used to draw the tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TreeStyle {
    /// `+--`, `\--` and `|`; safe on any terminal
    #[default]
    Ascii,
    /// Box-drawing characters
    Unicode,
}

impl TreeStyle {
    fn branch(&self) -> &'static str {
        match self {
            TreeStyle::Ascii => "+-- ",
            TreeStyle::Unicode => "├── ",
        }
    }

    fn last_branch(&self) -> &'static str {
        match self {
            TreeStyle::Ascii => "\\-- ",
            TreeStyle::Unicode => "└── ",
        }
    }

    fn vertical(&self) -> &'static str {
        match self {
            TreeStyle::Ascii => "|   ",
            TreeStyle::Unicode => "│   ",
        }
    }
}

/// TextTreeFormatter adapter for the default terminal report
///
/// Renders the indented tree followed by cycle warnings, reverse dependency
/// lists and statistics, all as plain text.
pub struct TextTreeFormatter {
    style: TreeStyle,
}

impl TextTreeFormatter {
    pub fn new(style: TreeStyle) -> Self {
        Self { style }
    }

    fn render_line(&self, line: &TreeLine) -> String {
        let mut rendered = String::new();
        if line.depth > 0 {
            for &open in &line.guides {
                rendered.push_str(if open { self.style.vertical() } else { "    " });
            }
            rendered.push_str(if line.is_last {
                self.style.last_branch()
            } else {
                self.style.branch()
            });
        }
        rendered.push_str(&line.name);
        if let Some(marker) = line.marker {
            rendered.push(' ');
            rendered.push_str(marker.label());
        }
        rendered
    }

    fn render_tree(&self, output: &mut String, model: &ReportReadModel) {
        let settings = &model.settings;
        let mut header = format!(
            "Dependency tree for '{}' (max depth {}",
            settings.root, settings.max_depth
        );
        if let Some(filter) = &settings.filter {
            header.push_str(&format!(", excluding names containing '{}'", filter));
        }
        header.push_str("):\n");
        output.push_str(&header);

        if model.tree.is_empty() {
            output.push_str("  (root package was excluded by the filter)\n");
            return;
        }
        for line in &model.tree {
            output.push_str(&self.render_line(line));
            output.push('\n');
        }
    }

    fn render_numbered(output: &mut String, title: &str, items: &[String]) {
        output.push('\n');
        output.push_str(title);
        output.push_str(":\n");
        if items.is_empty() {
            output.push_str("  (none)\n");
            return;
        }
        for (index, item) in items.iter().enumerate() {
            output.push_str(&format!("  {}. {}\n", index + 1, item));
        }
        output.push_str(&format!("Total: {}\n", items.len()));
    }

    fn render_statistics(output: &mut String, model: &ReportReadModel) {
        let stats = &model.statistics;
        output.push_str("\nStatistics:\n");
        output.push_str(&format!("  Packages: {}\n", stats.package_count));
        output.push_str(&format!("  Dependency edges: {}\n", stats.edge_count));
        output.push_str(&format!("  Cycles: {}\n", stats.cycle_count));
        if stats.under_explored_count > 0 {
            output.push_str(&format!("  Not explored: {}\n", stats.under_explored_count));
        }
    }
}

impl Default for TextTreeFormatter {
    fn default() -> Self {
        Self::new(TreeStyle::default())
    }
}

impl ReportFormatter for TextTreeFormatter {
    fn format(&self, model: &ReportReadModel) -> Result<String> {
        let mut output = String::new();

        self.render_tree(&mut output, model);

        if !model.cycles.is_empty() {
            Self::render_numbered(&mut output, "Cycles detected", &model.cycles);
        }
        if !model.under_explored.is_empty() {
            Self::render_numbered(
                &mut output,
                "Not explored (request limit reached)",
                &model.under_explored,
            );
        }

        if let Some(reverse) = &model.reverse {
            Self::render_numbered(
                &mut output,
                &format!("Direct reverse dependencies of '{}'", reverse.target),
                &reverse.direct,
            );
            Self::render_numbered(
                &mut output,
                &format!(
                    "All reverse dependencies of '{}' (searched: {})",
                    reverse.target, reverse.scope
                ),
                &reverse.transitive,
            );
            if !reverse.under_explored.is_empty() {
                Self::render_numbered(
                    &mut output,
                    "Not explored during the reverse search (request limit reached, lists may be incomplete)",
                    &reverse.under_explored,
                );
            }
        }

        Self::render_statistics(&mut output, model);

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::outbound::formatters::test_support::create_test_read_model;

    #[test]
    fn test_ascii_tree() {
        let output = TextTreeFormatter::new(TreeStyle::Ascii)
            .format(&create_test_read_model())
            .unwrap();

        let expected_tree = "\
Dependency tree for 'J' (max depth 3):
J
+-- K
|   \\-- J (cycle)
\\-- L
    \\-- M
";
        assert!(output.starts_with(expected_tree), "got:\n{}", output);
    }

    #[test]
    fn test_unicode_tree() {
        let output = TextTreeFormatter::new(TreeStyle::Unicode)
            .format(&create_test_read_model())
            .unwrap();

        assert!(output.contains("├── K\n│   └── J (cycle)\n└── L\n    └── M\n"));
    }

    #[test]
    fn test_numbered_sections() {
        let output = TextTreeFormatter::default()
            .format(&create_test_read_model())
            .unwrap();

        assert!(output.contains("Cycles detected:\n  1. J -> K -> J\nTotal: 1\n"));
        assert!(output.contains("Direct reverse dependencies of 'J':\n  1. K\nTotal: 1\n"));
        assert!(output.contains("All reverse dependencies of 'J' (searched: all known packages):"));
        assert!(output.contains("Statistics:\n  Packages: 4\n  Dependency edges: 4\n  Cycles: 1\n"));
        assert!(!output.contains("Not explored"));
    }

    #[test]
    fn test_empty_lists_and_filtered_root() {
        let mut model = create_test_read_model();
        model.tree.clear();
        model.cycles.clear();
        model.settings.filter = Some("J".to_string());
        if let Some(reverse) = model.reverse.as_mut() {
            reverse.direct.clear();
            reverse.transitive.clear();
        }

        let output = TextTreeFormatter::default().format(&model).unwrap();

        assert!(output.contains("excluding names containing 'J'"));
        assert!(output.contains("(root package was excluded by the filter)"));
        assert!(output.contains("Direct reverse dependencies of 'J':\n  (none)\n"));
        assert!(!output.contains("Cycles detected"));
    }

    #[test]
    fn test_under_explored_section() {
        let mut model = create_test_read_model();
        model.under_explored = vec!["M".to_string()];
        model.statistics.under_explored_count = 1;

        let output = TextTreeFormatter::default().format(&model).unwrap();

        assert!(output.contains("Not explored (request limit reached):\n  1. M\n"));
        assert!(output.contains("  Not explored: 1\n"));
        assert!(!output.contains("during the reverse search"));
    }

    #[test]
    fn test_reverse_under_explored_section() {
        let mut model = create_test_read_model();
        if let Some(reverse) = model.reverse.as_mut() {
            reverse.under_explored = vec!["L".to_string(), "M".to_string()];
        }

        let output = TextTreeFormatter::default().format(&model).unwrap();

        assert!(output.contains(
            "Not explored during the reverse search (request limit reached, lists may be incomplete):\n  1. L\n  2. M\nTotal: 2\n"
        ));
        assert!(!output.contains("Not explored (request limit reached)"));
        assert!(!output.contains("  Not explored: "));
    }
}

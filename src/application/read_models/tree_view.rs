use serde::Serialize;

/// Annotation shown after a package in the tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TreeMarker {
    /// Package is an ancestor of this line; following it would loop
    Cycle,
    /// Package was already expanded earlier in the tree
    Repeated,
    /// Package was not explored because the request budget ran out
    UnderExplored,
}

impl TreeMarker {
    pub fn label(&self) -> &'static str {
        match self {
            TreeMarker::Cycle => "(cycle)",
            TreeMarker::Repeated => "(*)",
            TreeMarker::UnderExplored => "(not explored: request limit reached)",
        }
    }
}

/// One line of the rendered dependency tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeLine {
    pub name: String,
    /// Edges from the root; the root line has depth 0
    pub depth: usize,
    /// Whether this is the last child of its parent
    pub is_last: bool,
    /// One entry per ancestor level between the root and this line's parent:
    /// true when that level still has siblings below and needs a vertical bar
    #[serde(skip)]
    pub guides: Vec<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<TreeMarker>,
}

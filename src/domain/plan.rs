use std::fmt;

use crate::domain::version::SemanticVersion;

/// The mutation a workflow is about to perform
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Plan {
    /// Create one tag for `to`; `from` is `None` when no version tag exists yet
    Apply {
        from: Option<SemanticVersion>,
        to: SemanticVersion,
        label: String,
    },
    /// Delete every listed tag, in order
    Purge { tags: Vec<String> },
}

impl Plan {
    /// The `<current> -> <proposed>` line, or the comma-separated tag list
    pub fn summary(&self) -> String {
        match self {
            Plan::Apply { from, to, .. } => {
                let from = from
                    .as_ref()
                    .map(ToString::to_string)
                    .unwrap_or_else(|| "none".to_string());
                format!("{} -> {}", from, to)
            }
            Plan::Purge { tags } => tags.join(", "),
        }
    }

    /// Question put to the user before the plan is carried out
    pub fn confirmation_prompt(&self) -> String {
        match self {
            Plan::Apply { label, .. } => format!("Create tag '{}'?", label),
            Plan::Purge { tags } => format!("Delete {} tag(s)?", tags.len()),
        }
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Plan::Apply { label, .. } => write!(f, "apply {} (tag '{}')", self.summary(), label),
            Plan::Purge { tags } => write!(f, "purge {} tag(s): {}", tags.len(), self.summary()),
        }
    }
}

//! Text diffs for reviewing a patch before it is proposed

use similar::{ChangeTag, TextDiff};

/// Unified diff with `a/` and `b/` headers and three lines of context
pub fn unified_diff(path: &str, old: &str, new: &str) -> String {
    TextDiff::from_lines(old, new)
        .unified_diff()
        .context_radius(3)
        .header(&format!("a/{path}"), &format!("b/{path}"))
        .to_string()
}

/// Line counts for a diff
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DiffSummary {
    /// Lines added
    pub insertions: usize,
    /// Lines removed
    pub deletions: usize,
}

impl DiffSummary {
    /// Count changed lines between two texts
    pub fn between(old: &str, new: &str) -> Self {
        let mut summary = Self::default();
        for change in TextDiff::from_lines(old, new).iter_all_changes() {
            match change.tag() {
                ChangeTag::Insert => summary.insertions += 1,
                ChangeTag::Delete => summary.deletions += 1,
                ChangeTag::Equal => {}
            }
        }
        summary
    }

    /// Format as a one-line summary
    pub fn one_line(&self) -> String {
        format!(
            "{} insertion(s), {} deletion(s)",
            self.insertions, self.deletions
        )
    }
}

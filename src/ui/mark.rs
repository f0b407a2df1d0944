//! Status mark rendering.

use console::Style;

use crate::cache::{CommitStatus, StatusPolicy};

/// Renders statuses as single glyphs according to a [`StatusPolicy`].
///
/// # Example
///
/// ```
/// use github_commit_status_mark::cache::{CommitStatus, StatusPolicy};
/// use github_commit_status_mark::ui::MarkRenderer;
///
/// let policy = StatusPolicy::default();
/// let plain = MarkRenderer::new(&policy, false);
/// assert_eq!(plain.render(CommitStatus::Success), "✓");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct MarkRenderer<'a> {
    policy: &'a StatusPolicy,
    colors: bool,
}

impl<'a> MarkRenderer<'a> {
    /// Create a renderer; `colors` wraps glyphs in ANSI codes.
    pub fn new(policy: &'a StatusPolicy, colors: bool) -> Self {
        Self { policy, colors }
    }

    /// The glyph for `status`, colored if enabled and the status has a color.
    pub fn render(&self, status: CommitStatus) -> String {
        let rule = self.policy.rule(status);
        match rule.color {
            Some(color) if self.colors => Style::new()
                .fg(color)
                .force_styling(true)
                .apply_to(rule.glyph)
                .to_string(),
            _ => rule.glyph.to_string(),
        }
    }
}

use crate::theme::{Role, Theme};
use ratatui::text::{Line, Span};

const SEPARATOR: &str = " • ";

/// A key and what it does, as shown in a footer
pub type HelpEntry = (&'static str, &'static str);

pub fn main_view_entries(copy_available: bool) -> Vec<HelpEntry> {
    let mut entries = vec![("↑/k", "up"), ("↓/j", "down")];
    if copy_available {
        entries.push(("c", "copy"));
    }
    entries.extend([("d", "delete"), ("q", "quit")]);
    entries
}

pub const CONFIRM_ENTRIES: &[HelpEntry] = &[("y", "yes"), ("n", "no"), ("q", "quit")];

pub const BLOCKED_ENTRIES: &[HelpEntry] = &[("n", "go back"), ("q", "quit")];

/// Render entries as a single footer line, e.g. `y yes • n no • q quit`
pub fn footer_line(entries: &[HelpEntry], theme: &Theme) -> Line<'static> {
    let mut spans = Vec::with_capacity(entries.len() * 4);
    for (i, (key, description)) in entries.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(SEPARATOR, theme.style(Role::HelpText)));
        }
        spans.push(Span::styled(*key, theme.style(Role::HelpKey)));
        spans.push(Span::styled(format!(" {description}"), theme.style(Role::HelpText)));
    }
    Line::from(spans)
}

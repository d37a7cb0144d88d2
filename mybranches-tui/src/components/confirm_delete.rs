use super::help;
use crate::theme::{Role, Theme};
use mybranches_core::browser::DeletionContext;
use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};

const BLOCKED_MESSAGE: &str =
    ":( Can't delete the branch you're currently on. Switch to a different branch first.";

/// Confirmation prompt, or the refusal when the target is the current branch
pub fn draw(f: &mut Frame, area: Rect, deletion: &DeletionContext, current_branch: &str, theme: &Theme) {
    let lines = if deletion.branch_name == current_branch {
        vec![
            Line::default(),
            Line::styled(BLOCKED_MESSAGE, theme.style(Role::Error)),
            Line::default(),
            help::footer_line(help::BLOCKED_ENTRIES, theme),
        ]
    } else {
        vec![
            Line::default(),
            Line::from(vec![
                Span::raw("Delete '"),
                Span::styled(deletion.branch_name.clone(), theme.style(Role::Selected)),
                Span::raw("'?"),
            ]),
            Line::default(),
            help::footer_line(help::CONFIRM_ENTRIES, theme),
        ]
    };
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
}

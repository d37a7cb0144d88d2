use super::help;
use crate::theme::{Role, Theme};
use mybranches_core::browser::BrowserState;
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph},
};

/// Data the main view shows besides the browser state itself
pub struct BranchListView<'a> {
    pub pattern: &'a str,
    /// Current branch as of this frame; empty if it could not be determined
    pub current_branch: &'a str,
    pub copy_available: bool,
}

pub fn draw(f: &mut Frame, area: Rect, state: &BrowserState, view: &BranchListView<'_>, theme: &Theme) {
    let chunks = Layout::vertical([
        Constraint::Length(2),
        Constraint::Min(1),
        Constraint::Length(2),
    ])
    .split(area);

    let title = Line::from(vec![
        Span::raw("Branches containing '"),
        Span::styled(view.pattern.to_string(), theme.style(Role::Selected)),
        Span::raw("'"),
    ]);
    f.render_widget(Paragraph::new(title), chunks[0]);

    let items: Vec<ListItem> = state
        .branches()
        .iter()
        .enumerate()
        .map(|(i, name)| branch_row(name, i == state.cursor(), name == view.current_branch, theme))
        .collect();

    let mut list_state = ListState::default();
    list_state.select(Some(state.cursor()));
    f.render_stateful_widget(List::new(items), chunks[1], &mut list_state);

    let footer = help::footer_line(&help::main_view_entries(view.copy_available), theme);
    f.render_widget(Paragraph::new(vec![Line::default(), footer]), chunks[2]);
}

fn branch_row<'a>(name: &'a str, under_cursor: bool, is_current: bool, theme: &Theme) -> ListItem<'a> {
    let mut spans = if under_cursor {
        vec![
            Span::styled("(*) ", theme.style(Role::Selected)),
            Span::styled(name, theme.style(Role::Selected)),
        ]
    } else {
        vec![Span::raw("( ) "), Span::raw(name)]
    };
    if is_current {
        spans.push(Span::styled(" (current)", theme.style(Role::Current)));
    }
    ListItem::new(Line::from(spans))
}
